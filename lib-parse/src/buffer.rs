//! Lexing of statement text into a [`TokenBuffer`]. Each token is built from its first [`char`],
//! pulling any further characters it needs from the same iterator (identifiers, quoted strings,
//! comments). Characters which produce no token (whitespace, comments) are dropped.

use std::iter::Peekable;

use derive_more::Deref;

use crate::parse::FullBufferParser;

/// A low level token, which is directly constructed from at least one character.
pub trait BufferToken: Clone + Sized {
    /// Create a new token from a [`char`], and an iterator of additional [`char`]s.
    fn from_char(c: char, chars: &mut Peekable<impl Iterator<Item = char>>) -> Outcome<Self>;
}

/// Narrow a token into one of the types it can represent, such as a single variant of an enum of
/// tokens.
pub trait IntoToken<T>: BufferToken {
    fn into_token(self) -> Option<T>;
}

impl<T: BufferToken> IntoToken<T> for T {
    fn into_token(self) -> Option<Self> {
        Some(self)
    }
}

/// Outcome when lexing a [`BufferToken`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T: Sized> {
    Token(T),
    /// The characters consumed don't form a token.
    Skip,
    /// The character can't begin a token.
    Unexpected,
}

/// Lexed tokens of a statement.
#[derive(Debug, Deref)]
pub struct TokenBuffer<BaseToken> {
    buffer: Box<[BaseToken]>,
}

impl<BaseToken> TokenBuffer<BaseToken> {
    /// Lex the entire source. Fails on the first character which can't begin a token, reporting
    /// its byte position within the source.
    pub fn new(source: &str) -> Result<Self, String>
    where
        BaseToken: BufferToken,
    {
        let mut chars = source.chars().peekable();
        let mut buffer = Vec::new();

        loop {
            let rest = chars.clone();
            let Some(c) = chars.next() else {
                break;
            };

            match BaseToken::from_char(c, &mut chars) {
                Outcome::Token(token) => buffer.push(token),
                Outcome::Skip => {}
                Outcome::Unexpected => {
                    let position = source.len() - rest.map(char::len_utf8).sum::<usize>();
                    return Err(format!(
                        "unexpected character `{c}` at position {position}"
                    ));
                }
            }
        }

        Ok(Self::new_with_tokens(buffer))
    }

    pub fn new_with_tokens(tokens: Vec<BaseToken>) -> Self {
        Self {
            buffer: tokens.into_boxed_slice(),
        }
    }

    pub fn empty() -> Self {
        Self::new_with_tokens(Vec::new())
    }

    /// Create a new cursor at the start of this buffer.
    pub fn cursor(&self) -> Cursor<'_, BaseToken> {
        Cursor::new(&self.buffer)
    }

    /// Create a new parser over every token in this buffer.
    pub fn parser(&self) -> FullBufferParser<'_, BaseToken> {
        FullBufferParser::new(self.cursor())
    }
}

/// Position within a [`TokenBuffer`]. Cursors are copied rather than advanced in place, so any
/// number may be held at once.
pub struct Cursor<'b, BaseToken> {
    tokens: &'b [BaseToken],
    /// Offset of the next token.
    offset: usize,
}
impl<BaseToken> Clone for Cursor<'_, BaseToken> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<BaseToken> Copy for Cursor<'_, BaseToken> {}

impl<'b, BaseToken> Cursor<'b, BaseToken> {
    pub fn new(tokens: &'b [BaseToken]) -> Self {
        Self::new_with_offset(tokens, 0)
    }

    /// The offset isn't checked against the tokens.
    pub(crate) fn new_with_offset(tokens: &'b [BaseToken], offset: usize) -> Self {
        Self { tokens, offset }
    }

    pub(crate) fn tokens(&self) -> &'b [BaseToken] {
        self.tokens
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn next_cursor(self) -> Self {
        Self::new_with_offset(self.tokens, self.offset + 1)
    }

    pub fn eof(&self) -> bool {
        self.offset >= self.tokens.len()
    }

    /// If the next token can be narrowed into `T`, produce it along with a cursor past it.
    pub fn token<T>(self) -> Option<(T, Self)>
    where
        BaseToken: IntoToken<T>,
    {
        let token = self.tokens.get(self.offset)?.clone().into_token()?;
        Some((token, self.next_cursor()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rstest::rstest;

    /// Words separated by whitespace and commas.
    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Word {
        Word(String),
        Comma,
    }
    impl BufferToken for Word {
        fn from_char(c: char, chars: &mut Peekable<impl Iterator<Item = char>>) -> Outcome<Self> {
            match c {
                ',' => Outcome::Token(Self::Comma),
                c if c.is_alphabetic() => {
                    let mut word = c.to_string();
                    while let Some(c) = chars.next_if(|c| c.is_alphabetic()) {
                        word.push(c);
                    }

                    Outcome::Token(Self::Word(word))
                }
                c if c.is_whitespace() => Outcome::Skip,
                _ => Outcome::Unexpected,
            }
        }
    }
    impl IntoToken<String> for Word {
        fn into_token(self) -> Option<String> {
            match self {
                Self::Word(word) => Some(word),
                Self::Comma => None,
            }
        }
    }

    fn word(word: &str) -> Word {
        Word::Word(word.into())
    }

    #[rstest]
    #[case::empty("", &[])]
    #[case::whitespace("  \n\t", &[])]
    #[case::single("apples", &[word("apples")])]
    #[case::list("apples, oranges", &[word("apples"), Word::Comma, word("oranges")])]
    #[case::unicode("äpfel,", &[word("äpfel"), Word::Comma])]
    fn lex(#[case] source: &str, #[case] expected: &[Word]) {
        let buffer = TokenBuffer::<Word>::new(source).unwrap();
        assert_eq!(&**buffer, expected);
    }

    #[rstest]
    #[case("1", "unexpected character `1` at position 0")]
    #[case("apples; oranges", "unexpected character `;` at position 6")]
    #[case("äpfel 2", "unexpected character `2` at position 7")]
    fn unexpected(#[case] source: &str, #[case] message: &str) {
        assert_eq!(TokenBuffer::<Word>::new(source).unwrap_err(), message);
    }

    #[rstest]
    #[case(TokenBuffer::empty(), true)]
    #[case(TokenBuffer::new("a").unwrap(), false)]
    fn eof(#[case] buffer: TokenBuffer<Word>, #[case] expected: bool) {
        assert_eq!(buffer.cursor().eof(), expected);
    }

    #[test]
    fn cursors_are_independent() {
        let buffer = TokenBuffer::<Word>::new("apples oranges").unwrap();
        let start = buffer.cursor();

        let (first, next) = start.token::<Word>().unwrap();
        assert_eq!(first, word("apples"));
        assert_eq!(next.offset(), 1);

        // The original cursor hasn't moved.
        assert_eq!(start.token::<Word>().unwrap().0, word("apples"));

        let (_second, end) = next.token::<Word>().unwrap();
        assert!(end.eof());
        assert!(end.token::<Word>().is_none());
    }

    #[test]
    fn narrowed_token() {
        let buffer = TokenBuffer::<Word>::new(", apples").unwrap();
        let cursor = buffer.cursor();

        // A comma isn't a word, and doesn't advance the cursor.
        assert!(cursor.token::<String>().is_none());

        let (_comma, cursor) = cursor.token::<Word>().unwrap();
        let (word, cursor): (String, _) = cursor.token().unwrap();
        assert_eq!(word, "apples");
        assert!(cursor.eof());
    }
}
