use crate::{BufferParser, Cursor, Parse, Token, parse::Delimiter};

use super::token::{CommonToken, Punct};

/// A group surrounded by `(` and `)`.
#[derive(Clone, Copy, Debug)]
pub struct Parenthesis;
impl Delimiter<CommonToken> for Parenthesis {
    type Left = LeftParenthesis;
    type Right = RightParenthesis;

    fn new(_left: Self::Left, _right: Self::Right) -> Self {
        Self
    }
}

/// Parse a single [`Punct`], only advancing if it matches `expected`.
fn parse_punct(parser: BufferParser<'_, CommonToken>, expected: Punct) -> Result<(), String> {
    parser.step(|cursor| match cursor.token::<Punct>() {
        Some((punct, cursor)) if punct == expected => Ok(((), cursor)),
        _ => Err(format!("expected `{}`", expected.as_char())),
    })
}

fn peek_punct(cursor: Cursor<'_, CommonToken>, expected: Punct) -> bool {
    cursor
        .token::<Punct>()
        .is_some_and(|(punct, _)| punct == expected)
}

#[derive(Clone, Copy, Debug)]
pub struct LeftParenthesis;
impl Parse<CommonToken> for LeftParenthesis {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        parse_punct(parser, Punct::LeftSmooth).map(|_| LeftParenthesis)
    }
}
impl Token<CommonToken> for LeftParenthesis {
    fn peek(cursor: Cursor<'_, CommonToken>) -> bool {
        peek_punct(cursor, Punct::LeftSmooth)
    }

    fn display() -> &'static str {
        "("
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RightParenthesis;
impl Parse<CommonToken> for RightParenthesis {
    fn parse(parser: BufferParser<'_, CommonToken>) -> Result<Self, String> {
        parse_punct(parser, Punct::RightSmooth).map(|_| RightParenthesis)
    }
}
impl Token<CommonToken> for RightParenthesis {
    fn peek(cursor: Cursor<'_, CommonToken>) -> bool {
        peek_punct(cursor, Punct::RightSmooth)
    }

    fn display() -> &'static str {
        ")"
    }
}
