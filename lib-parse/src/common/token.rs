use std::{
    fmt::{self, Display},
    iter::{self, Peekable},
};

use derive_more::{Deref, From};

use crate::{
    buffer::{BufferToken, Cursor, IntoToken, Outcome},
    parse::{BufferParser, Parse, Token},
    util,
};

/// An identifier. Can begin with any letter or an underscore, and can contain any letter, number,
/// underscore or `$`. Identifiers may also be quoted with `"`, `` ` `` or `[...]`, in which case
/// they may contain any character.
///
/// Comparison against a string ignores ASCII case. Quoted identifiers never compare equal to a
/// string, so that they can't be mistaken for a keyword.
#[derive(Clone, Debug, Deref, PartialEq)]
pub struct Ident {
    #[deref]
    value: String,
    quoted: bool,
}

impl Ident {
    pub fn new(ident: impl ToString) -> Self {
        Self {
            value: ident.to_string(),
            quoted: false,
        }
    }

    pub fn new_quoted(ident: impl ToString) -> Self {
        Self {
            value: ident.to_string(),
            quoted: true,
        }
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        !self.quoted && self.value.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for Ident {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Parse<CommonToken> for Ident {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        parser.step(|cursor| {
            cursor
                .token::<Ident>()
                .ok_or_else(|| "unexpected token (expected identifier)".to_string())
        })
    }
}

impl Token<CommonToken> for Ident {
    fn peek(cursor: Cursor<'_, CommonToken>) -> bool {
        cursor.token::<Ident>().is_some()
    }

    fn display() -> &'static str {
        "identifier"
    }
}

impl IntoToken<Ident> for CommonToken {
    fn into_token(self) -> Option<Ident> {
        match self {
            CommonToken::Ident(ident) => Some(ident),
            _ => None,
        }
    }
}

/// A punctuation symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Punct {
    Asterisk,
    Comma,
    Semicolon,
    LeftSmooth,
    RightSmooth,
    Equals,
    Dot,
    /// Any other ASCII punctuation, which has no special meaning.
    Other(char),
}

impl Punct {
    fn from_char(c: char) -> Self {
        match c {
            '*' => Punct::Asterisk,
            ',' => Punct::Comma,
            ';' => Punct::Semicolon,
            '(' => Punct::LeftSmooth,
            ')' => Punct::RightSmooth,
            '=' => Punct::Equals,
            '.' => Punct::Dot,
            c => Punct::Other(c),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Punct::Asterisk => '*',
            Punct::Comma => ',',
            Punct::Semicolon => ';',
            Punct::LeftSmooth => '(',
            Punct::RightSmooth => ')',
            Punct::Equals => '=',
            Punct::Dot => '.',
            Punct::Other(c) => *c,
        }
    }
}

impl PartialEq<str> for Punct {
    fn eq(&self, other: &str) -> bool {
        let mut chars = other.chars();
        chars.next() == Some(self.as_char()) && chars.next().is_none()
    }
}

impl PartialEq<&str> for Punct {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Parse<CommonToken> for Punct {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        parser.step(|cursor| {
            cursor
                .token::<Punct>()
                .ok_or_else(|| "unexpected token (expected punctuation)".to_string())
        })
    }
}

impl Token<CommonToken> for Punct {
    fn peek(cursor: Cursor<'_, CommonToken>) -> bool {
        cursor.token::<Punct>().is_some()
    }

    fn display() -> &'static str {
        "punctuation"
    }
}

impl IntoToken<Punct> for CommonToken {
    fn into_token(self) -> Option<Punct> {
        match self {
            CommonToken::Punct(punct) => Some(punct),
            _ => None,
        }
    }
}

/// A literal value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    /// A string surrounded by `'`, with any escaped quotes resolved.
    String(String),
    /// The source text of a numeric literal.
    Number(String),
}

impl Literal {
    /// The value of the literal, as it would be written without quotes.
    pub fn as_str(&self) -> &str {
        match self {
            Literal::String(s) | Literal::Number(s) => s,
        }
    }
}

impl Parse<CommonToken> for Literal {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        parser.step(|cursor| {
            cursor
                .token::<Literal>()
                .ok_or_else(|| "unexpected token (expected literal)".to_string())
        })
    }
}

impl Token<CommonToken> for Literal {
    fn peek(cursor: Cursor<'_, CommonToken>) -> bool {
        cursor.token::<Literal>().is_some()
    }

    fn display() -> &'static str {
        "literal"
    }
}

impl IntoToken<Literal> for CommonToken {
    fn into_token(self) -> Option<Literal> {
        match self {
            CommonToken::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

/// A token comprising of an identifier, a piece of punctuation, or a literal. Any whitespace or
/// comments encountered will be ignored.
#[derive(Clone, Debug, From, PartialEq)]
pub enum CommonToken {
    Ident(Ident),
    Punct(Punct),
    Literal(Literal),
}

impl BufferToken for CommonToken {
    fn from_char(c: char, chars: &mut Peekable<impl Iterator<Item = char>>) -> Outcome<Self> {
        match c {
            c @ ('a'..='z' | 'A'..='Z' | '_') => {
                let ident = iter::once(c)
                    .chain(util::take_while(chars, |c| {
                        c.is_alphanumeric() || *c == '_' || *c == '$'
                    }))
                    .collect::<String>();

                Outcome::Token(Ident::new(ident).into())
            }
            quote @ ('"' | '`') => match util::take_quoted(chars, quote) {
                Some(ident) => Outcome::Token(Ident::new_quoted(ident).into()),
                None => Outcome::Unexpected,
            },
            '[' => {
                let ident = util::take_while(chars, |c| *c != ']').collect::<String>();

                match chars.next() {
                    Some(']') => Outcome::Token(Ident::new_quoted(ident).into()),
                    _ => Outcome::Unexpected,
                }
            }
            '\'' => match util::take_quoted(chars, '\'') {
                Some(s) => Outcome::Token(Literal::String(s).into()),
                None => Outcome::Unexpected,
            },
            c if c.is_ascii_digit() => {
                let number = iter::once(c)
                    .chain(util::take_while(chars, |c| {
                        c.is_ascii_alphanumeric() || *c == '.'
                    }))
                    .collect::<String>();

                Outcome::Token(Literal::Number(number).into())
            }
            '-' if chars.next_if_eq(&'-').is_some() => {
                // Line comment
                util::take_while(chars, |c| *c != '\n').for_each(drop);
                Outcome::Skip
            }
            '/' if chars.next_if_eq(&'*').is_some() => {
                // Block comment
                let mut previous = None;
                for c in chars.by_ref() {
                    if previous == Some('*') && c == '/' {
                        return Outcome::Skip;
                    }

                    previous = Some(c);
                }

                Outcome::Unexpected
            }
            c if c.is_ascii_punctuation() => Outcome::Token(Punct::from_char(c).into()),
            c if c.is_whitespace() => Outcome::Skip,
            _ => Outcome::Unexpected,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rstest::rstest;

    use crate::TokenBuffer;

    /// Turn the provided [`str`] into the required parameters for [`BufferToken::from_char`].
    fn prepare(s: &'static str) -> (char, Peekable<impl Iterator<Item = char>>) {
        let mut chars = s.chars().peekable();
        (chars.next().expect("at least one char"), chars)
    }

    /// Parse a token from the string, and assert that it's successfully produced.
    fn parse_token<T: BufferToken>(s: &'static str) -> T {
        let (c, mut chars) = prepare(s);
        match T::from_char(c, &mut chars) {
            Outcome::Token(token) => token,
            Outcome::Unexpected => panic!("expected `Outcome::Token`, found `Outcome::Unexpected`"),
            Outcome::Skip => panic!("expected `Outcome::Token`, found `Outcome::Skip`"),
        }
    }

    /// Attempt to parse a token from the string, and assert that [`Outcome::Unexpected`] is
    /// produced.
    fn parse_unexpected<T: BufferToken>(s: &'static str) {
        let (c, mut chars) = prepare(s);
        assert!(matches!(T::from_char(c, &mut chars), Outcome::Unexpected));
    }

    /// Attempt to parse a token from the string, and assert that [`Outcome::Skip`] is produced.
    fn parse_skip<T: BufferToken>(s: &'static str) {
        let (c, mut chars) = prepare(s);
        assert!(matches!(T::from_char(c, &mut chars), Outcome::Skip));
    }

    mod common_token {
        use super::*;

        #[rstest]
        #[case("a", Ident::new("a").into())]
        #[case("_", Ident::new("_").into())]
        #[case("abc_abc", Ident::new("abc_abc").into())]
        #[case("abc123", Ident::new("abc123").into())]
        #[case("abc$1", Ident::new("abc$1").into())]
        #[case("\"some column\"", Ident::new_quoted("some column").into())]
        #[case("`a\"b`", Ident::new_quoted("a\"b").into())]
        #[case("[select]", Ident::new_quoted("select").into())]
        #[case("'Dark Red'", Literal::String("Dark Red".into()).into())]
        #[case("'it''s'", Literal::String("it's".into()).into())]
        #[case("123", Literal::Number("123".into()).into())]
        #[case("1.5", Literal::Number("1.5".into()).into())]
        #[case("*", Punct::Asterisk.into())]
        #[case(",", Punct::Comma.into())]
        #[case(";", Punct::Semicolon.into())]
        #[case("(", Punct::LeftSmooth.into())]
        #[case("=", Punct::Equals.into())]
        #[case(">", Punct::Other('>').into())]
        #[case("-1", Punct::Other('-').into())]
        fn valid(#[case] token: &'static str, #[case] expected: CommonToken) {
            let token = parse_token::<CommonToken>(token);
            assert_eq!(token, expected);
        }

        #[rstest]
        #[case("'unterminated")]
        #[case("\"unterminated")]
        #[case("[unterminated")]
        #[case("/* unterminated")]
        #[case("é")]
        fn unexpected(#[case] token: &'static str) {
            parse_unexpected::<CommonToken>(token);
        }

        #[rstest]
        #[case(" ")]
        #[case("\t")]
        #[case("\n")]
        #[case(" abc")]
        #[case("-- comment")]
        #[case("/* comment */")]
        fn skip(#[case] token: &'static str) {
            parse_skip::<CommonToken>(token);
        }
    }

    #[test]
    fn comments_are_skipped() {
        let buffer =
            TokenBuffer::<CommonToken>::new("a -- trailing\n/* block */ b").unwrap();

        assert_eq!(buffer.len(), 2);
        assert_eq!(
            buffer.parser().parse::<Ident>().unwrap(),
            "a"
        );
    }

    #[rstest]
    #[case(Ident::new("SELECT"), "select", true)]
    #[case(Ident::new("select"), "SELECT", true)]
    #[case(Ident::new("selects"), "select", false)]
    #[case(Ident::new_quoted("select"), "select", false)]
    fn ident_comparison(#[case] ident: Ident, #[case] other: &str, #[case] equal: bool) {
        assert_eq!(ident == other, equal);
    }

    #[test]
    fn punct_comparison() {
        assert_eq!(Punct::Asterisk, "*");
        assert_ne!(Punct::Asterisk, "**");
        assert_eq!(Punct::Other('>'), ">");
    }

    #[test]
    fn ident_does_not_parse_punct() {
        let buffer = TokenBuffer::<CommonToken>::new(", a").unwrap();
        let parser = buffer.parser();

        assert!(parser.parse::<Ident>().is_err());
        assert_eq!(parser.parse::<Punct>().unwrap(), Punct::Comma);
        assert_eq!(parser.parse::<Ident>().unwrap(), "a");
    }
}
