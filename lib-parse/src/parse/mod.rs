pub mod lookahead;
pub mod punctuated;
pub mod token;

use std::cell::Cell;

pub use self::{lookahead::Lookahead, punctuated::Punctuated};

use crate::buffer::{BufferToken, Cursor, TokenBuffer};

/// All available entrypoints for parsing.
pub mod entrypoint {
    use super::*;

    /// Parse `T` from a string. Will use `BaseToken` as the low-level token when parsing.
    pub fn parse_str<T: Parse<BaseToken>, BaseToken: BufferToken>(s: &str) -> Result<T, String> {
        let buffer = TokenBuffer::<BaseToken>::new(s)?;
        let parser = buffer.parser();

        T::parse(&parser)
    }
}

/// A value which can be parsed from a [`BufferParser`] containing `BaseToken`s.
pub trait Parse<BaseToken>: Sized {
    /// Parse a value with the provided parser.
    fn parse(parser: BufferParser<'_, BaseToken>) -> Result<Self, String>;
}

impl<T> Parse<T> for T
where
    T: BufferToken,
{
    fn parse(parser: BufferParser<'_, T>) -> Result<Self, String> {
        parser.step(|cursor| {
            cursor.token().ok_or_else(|| {
                if cursor.eof() {
                    "unexpected end of input".to_string()
                } else {
                    "unexpected token".to_string()
                }
            })
        })
    }
}

/// A value which represents a single `BaseToken`.
pub trait Token<BaseToken>: Sized {
    /// Determine if the cursor currently points to this token.
    fn peek(cursor: Cursor<'_, BaseToken>) -> bool;

    /// A string representation of this value.
    fn display() -> &'static str;
}

/// A reference to [`FullBufferParser`]. Simplifies the ergonomics of passing around the same
/// instance of a parser to multiple functions.
pub type BufferParser<'b, BaseToken> = &'b FullBufferParser<'b, BaseToken>;

/// A parser which operates over a slice of `BaseToken`s with a [`Cursor`].
#[derive(Clone, Debug)]
pub struct FullBufferParser<'b, BaseToken> {
    /// Tokens available to this parser.
    tokens: &'b [BaseToken],
    /// Current location of this parser.
    ///
    /// [`Cell`] provides mutable access behind a reference, which is required for
    /// [`BufferParser`].
    offset: Cell<usize>,
}

impl<'b, BaseToken> FullBufferParser<'b, BaseToken> {
    /// Create a new parser from a [`Cursor`].
    pub(crate) fn new(cursor: Cursor<'b, BaseToken>) -> Self {
        Self {
            tokens: cursor.tokens(),
            offset: Cell::new(cursor.offset()),
        }
    }

    /// Parse `T` with the provided function.
    pub fn parse_with<T>(
        &self,
        function: fn(BufferParser<'_, BaseToken>) -> Result<T, String>,
    ) -> Result<T, String> {
        function(self)
    }

    /// Parse `T` with the [`Parse`] implementation.
    pub fn parse<T: Parse<BaseToken>>(&self) -> Result<T, String> {
        self.parse_with(T::parse)
    }

    /// Attempt to parse a token from the stream, only advancing the stream if the parse is
    /// successful.
    pub fn step<T>(
        &self,
        function: impl FnOnce(Cursor<'b, BaseToken>) -> Result<(T, Cursor<'b, BaseToken>), String>,
    ) -> Result<T, String> {
        let (result, cursor) = function(self.cursor())?;
        self.offset.set(cursor.offset());
        Ok(result)
    }

    /// Parse a group surrounded by the delimiter `D`, producing a new parser which only contains
    /// the tokens between the delimiters. Nested pairs of the delimiter are kept in the group.
    pub fn group<D: Delimiter<BaseToken>>(
        &self,
    ) -> Result<(D, FullBufferParser<'b, BaseToken>), String> {
        let opening = self.parse::<D::Left>()?;

        let start = self.cursor();
        let mut cursor = start;
        let mut depth = 0usize;

        // Scan ahead to find the closing delimiter.
        loop {
            if cursor.eof() {
                return Err(format!(
                    "unclosed delimiter (expected {})",
                    D::Right::display()
                ));
            }

            if D::Right::peek(cursor) {
                if depth == 0 {
                    break;
                }

                depth -= 1;
            } else if D::Left::peek(cursor) {
                depth += 1;
            }

            cursor = cursor.next_cursor();
        }

        let inner = FullBufferParser {
            tokens: &self.tokens[start.offset()..cursor.offset()],
            offset: Cell::new(0),
        };

        self.offset.set(cursor.offset());
        let closing = self.parse::<D::Right>()?;

        Ok((D::new(opening, closing), inner))
    }

    /// Determine if the next token is `T`, without advancing.
    pub fn peek<T: Token<BaseToken>>(&self) -> bool {
        T::peek(self.cursor())
    }

    /// Begin a lookahead from this position in the buffer.
    pub fn lookahead(&self) -> Lookahead<'b, BaseToken> {
        Lookahead::new(self.cursor())
    }

    /// Check if the end of the buffer has been reached.
    pub fn is_empty(&self) -> bool {
        self.cursor().eof()
    }

    /// Provide a copy of the current [`Cursor`].
    pub(crate) fn cursor(&self) -> Cursor<'b, BaseToken> {
        Cursor::new_with_offset(self.tokens, self.offset.get())
    }
}

pub trait Delimiter<BaseToken> {
    type Left: Parse<BaseToken> + Token<BaseToken>;
    type Right: Parse<BaseToken> + Token<BaseToken>;

    fn new(left: Self::Left, right: Self::Right) -> Self;
}
