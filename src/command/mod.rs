//! Grammars for the SQL statements which can be run against a database (`SELECT`), and the
//! statements stored in the schema table (`CREATE TABLE`).

mod token;

use lib_parse::{
    common::{
        delimiter::{LeftParenthesis, Parenthesis},
        token::{CommonToken, Ident, Literal},
    },
    prelude::*,
};

use self::token::is_constraint_keyword;
use crate::Token;

/// Parse a complete statement from a string.
pub fn parse_command<T: Parse<CommonToken>>(command: &str) -> Result<T, String> {
    lib_parse::parse_str::<T, CommonToken>(command)
}

/// Text of a single token, as it would be written.
fn token_text(token: CommonToken) -> String {
    match token {
        CommonToken::Ident(ident) => ident.into_string(),
        CommonToken::Punct(punct) => punct.as_char().to_string(),
        CommonToken::Literal(Literal::String(s)) => format!("'{}'", s.replace('\'', "''")),
        CommonToken::Literal(Literal::Number(n)) => n,
    }
}

/// Consume the remaining tokens of the parser, producing their text.
fn remaining_text(parser: BufferParser<'_, CommonToken>) -> Result<String, String> {
    let mut text = String::new();

    while !parser.is_empty() {
        text.push_str(&token_text(parser.parse()?));
    }

    Ok(text)
}

/// Consume a single token, or an entire parenthesised group.
fn skip_token(parser: BufferParser<'_, CommonToken>) -> Result<(), String> {
    if parser.peek::<LeftParenthesis>() {
        parser.group::<Parenthesis>()?;
    } else {
        parser.parse::<CommonToken>()?;
    }

    Ok(())
}

/// Consume tokens up until the next `,` which isn't within parenthesis, or the end of input.
fn skip_until_comma(parser: BufferParser<'_, CommonToken>) -> Result<(), String> {
    while !parser.is_empty() && !parser.peek::<Token![,]>() {
        skip_token(parser)?;
    }

    Ok(())
}

/// A name, optionally prefixed with the schema it's in (`main.apples`).
#[derive(Clone, Debug)]
pub struct QualifiedName {
    pub schema: Option<Ident>,
    pub name: Ident,
}

impl Parse<CommonToken> for QualifiedName {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        let first = parser.parse::<Ident>()?;

        if !parser.peek::<Token![.]>() {
            return Ok(Self {
                schema: None,
                name: first,
            });
        }

        parser.parse::<Token![.]>()?;

        Ok(Self {
            schema: Some(first),
            name: parser.parse()?,
        })
    }
}

#[allow(unused)]
#[derive(Clone, Debug)]
pub enum ResultColumn {
    All(Token![*]),
    /// A function call. The arguments are retained as text.
    Function {
        name: Ident,
        arguments: String,
    },
    Column(Ident),
}

impl ResultColumn {
    /// Text of the result column, as it was written.
    pub fn text(&self) -> String {
        match self {
            ResultColumn::All(_) => "*".to_string(),
            ResultColumn::Function { name, arguments } => format!("{}({arguments})", name.as_str()),
            ResultColumn::Column(name) => name.to_string(),
        }
    }
}

impl Parse<CommonToken> for ResultColumn {
    fn parse(input: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        let mut lookahead = input.lookahead();

        if lookahead.peek::<Token![*]>() {
            Ok(Self::All(input.parse()?))
        } else if lookahead.peek::<Ident>() {
            let name = input.parse::<Ident>()?;

            if !input.peek::<LeftParenthesis>() {
                return Ok(Self::Column(name));
            }

            let (_parens, arguments) = input.group::<Parenthesis>()?;

            Ok(Self::Function {
                name,
                arguments: remaining_text(&arguments)?,
            })
        } else {
            Err(lookahead.error())
        }
    }
}

/// One side of a comparison.
#[derive(Clone, Debug)]
enum Operand {
    Column(Ident),
    Literal(Literal),
}

impl Parse<CommonToken> for Operand {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        let mut lookahead = parser.lookahead();

        if lookahead.peek::<Ident>() {
            Ok(Self::Column(parser.parse()?))
        } else if lookahead.peek::<Literal>() {
            Ok(Self::Literal(parser.parse()?))
        } else {
            Err(lookahead.error())
        }
    }
}

/// A `WHERE` clause comparing a column with a literal, written either way around.
#[derive(Clone, Debug)]
pub struct WhereClause {
    pub column: Ident,
    pub value: Literal,
}

impl Parse<CommonToken> for WhereClause {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        parser.parse::<Token![where]>()?;
        let lhs = parser.parse::<Operand>()?;
        parser.parse::<Token![=]>()?;
        let rhs = parser.parse::<Operand>()?;

        match (lhs, rhs) {
            (Operand::Column(column), Operand::Literal(value))
            | (Operand::Literal(value), Operand::Column(column)) => Ok(Self { column, value }),
            _ => Err("expected a comparison between a column and a literal".into()),
        }
    }
}

#[allow(unused)]
#[derive(Clone, Debug)]
pub struct SelectStatement {
    select: Token![select],
    pub result_columns: Punctuated<ResultColumn, Token![,]>,
    from: Token![from],
    pub table: QualifiedName,
    pub where_clause: Option<WhereClause>,
}

impl Parse<CommonToken> for SelectStatement {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        let statement = Self {
            select: parser.parse()?,
            result_columns: parser.parse_with(Punctuated::parse_separated_non_empty)?,
            from: parser.parse()?,
            table: parser.parse()?,
            where_clause: if parser.peek::<Token![where]>() {
                Some(parser.parse()?)
            } else {
                None
            },
        };

        if parser.peek::<Token![;]>() {
            parser.parse::<Token![;]>()?;
        }

        if !parser.is_empty() {
            return Err("unexpected input after statement".into());
        }

        Ok(statement)
    }
}

/// A column definition within `CREATE TABLE`.
#[derive(Clone, Debug)]
pub struct ColumnDef {
    pub name: Ident,
    /// Declared type, which is empty if no type was provided.
    pub type_name: String,
    pub primary_key: bool,
}

impl Parse<CommonToken> for ColumnDef {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        let name = parser.parse::<Ident>()?;

        let mut type_name = Vec::new();
        while let Ok(word) = parser.step(|cursor| match cursor.token::<Ident>() {
            Some((ident, cursor)) if ident.is_quoted() || !is_constraint_keyword(&ident) => {
                Ok((ident, cursor))
            }
            _ => Err("expected type name".to_string()),
        }) {
            type_name.push(word.into_string());
        }

        let mut type_name = type_name.join(" ");
        if !type_name.is_empty() && parser.peek::<LeftParenthesis>() {
            let (_parens, arguments) = parser.group::<Parenthesis>()?;
            type_name = format!("{type_name}({})", remaining_text(&arguments)?);
        }

        // Constraints other than the primary key have no bearing on reading the table.
        let mut primary_key = false;
        while !parser.is_empty() && !parser.peek::<Token![,]>() {
            if parser.peek::<Token![primary]>() {
                parser.parse::<Token![primary]>()?;
                parser.parse::<Token![key]>()?;
                primary_key = true;
            } else {
                skip_token(parser)?;
            }
        }

        Ok(Self {
            name,
            type_name,
            primary_key,
        })
    }
}

/// Name of a column within a table constraint. Any ordering or collation is ignored.
fn indexed_column(parser: BufferParser<'_, CommonToken>) -> Result<Ident, String> {
    let name = parser.parse()?;
    skip_until_comma(parser)?;
    Ok(name)
}

#[derive(Clone, Debug)]
pub enum TableConstraint {
    PrimaryKey(Vec<Ident>),
    /// Any other constraint, which has no bearing on reading the table.
    Other,
}

impl TableConstraint {
    fn peek(parser: BufferParser<'_, CommonToken>) -> bool {
        parser.peek::<Token![constraint]>()
            || parser.peek::<Token![primary]>()
            || parser.peek::<Token![unique]>()
            || parser.peek::<Token![check]>()
            || parser.peek::<Token![foreign]>()
    }
}

impl Parse<CommonToken> for TableConstraint {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        if parser.peek::<Token![constraint]>() {
            parser.parse::<Token![constraint]>()?;
            parser.parse::<Ident>()?;
        }

        if !parser.peek::<Token![primary]>() {
            skip_until_comma(parser)?;
            return Ok(Self::Other);
        }

        parser.parse::<Token![primary]>()?;
        parser.parse::<Token![key]>()?;

        let (_parens, columns) = parser.group::<Parenthesis>()?;
        let columns = Punctuated::<Ident, Token![,]>::parse_terminated_with(&columns, indexed_column)?;

        // Conflict clauses.
        skip_until_comma(parser)?;

        Ok(Self::PrimaryKey(columns.into_iter().collect()))
    }
}

#[derive(Clone, Debug)]
enum TableItem {
    Column(ColumnDef),
    Constraint(TableConstraint),
}

impl Parse<CommonToken> for TableItem {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        if TableConstraint::peek(parser) {
            Ok(Self::Constraint(parser.parse()?))
        } else {
            Ok(Self::Column(parser.parse()?))
        }
    }
}

#[derive(Clone, Debug)]
pub struct CreateTableStatement {
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
}

impl Parse<CommonToken> for CreateTableStatement {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        parser.parse::<Token![create]>()?;

        if parser.peek::<Token![temp]>() {
            parser.parse::<Token![temp]>()?;
        } else if parser.peek::<Token![temporary]>() {
            parser.parse::<Token![temporary]>()?;
        }

        let is_virtual = parser.peek::<Token![virtual]>();
        if is_virtual {
            parser.parse::<Token![virtual]>()?;
        }

        parser.parse::<Token![table]>()?;

        if parser.peek::<Token![if]>() {
            parser.parse::<Token![if]>()?;
            parser.parse::<Token![not]>()?;
            parser.parse::<Token![exists]>()?;
        }

        // The name in the schema table is used instead.
        parser.parse::<QualifiedName>()?;

        let mut columns = Vec::new();
        let mut constraints = Vec::new();

        if is_virtual {
            // Columns of virtual tables are declared by the module, not the statement.
            parser.parse::<Token![using]>()?;
        } else {
            let (_parens, body) = parser.group::<Parenthesis>()?;

            for item in Punctuated::<TableItem, Token![,]>::parse_terminated(&body)? {
                match item {
                    TableItem::Column(column) => columns.push(column),
                    TableItem::Constraint(constraint) => constraints.push(constraint),
                }
            }
        }

        // Any table options (such as `WITHOUT ROWID`) or module arguments are ignored.

        Ok(Self {
            columns,
            constraints,
        })
    }
}
