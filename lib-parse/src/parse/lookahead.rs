use super::*;

/// Tries several alternatives for the next token without advancing, remembering each one which
/// didn't match so that a single error can describe all of them.
pub struct Lookahead<'b, BaseToken> {
    cursor: Cursor<'b, BaseToken>,
    /// Display names of the tokens which didn't match, without duplicates.
    expected: Vec<&'static str>,
}

impl<'b, BaseToken> Lookahead<'b, BaseToken> {
    pub(crate) fn new(cursor: Cursor<'b, BaseToken>) -> Self {
        Self {
            cursor,
            expected: Vec::new(),
        }
    }

    pub fn peek<T: Token<BaseToken>>(&mut self) -> bool {
        if T::peek(self.cursor) {
            return true;
        }

        if !self.expected.contains(&T::display()) {
            self.expected.push(T::display());
        }

        false
    }

    /// Describe every alternative which was attempted, such as `expected identifier or literal`.
    pub fn error(self) -> String {
        let found = if self.cursor.eof() {
            "end of input"
        } else {
            "unexpected token"
        };

        match self.expected.as_slice() {
            [] => found.to_string(),
            [only] => format!("expected {only}, found {found}"),
            [rest @ .., last] => format!("expected {} or {last}, found {found}", rest.join(", ")),
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;
    use crate::common::{
        delimiter::LeftParenthesis,
        token::{CommonToken, Ident, Literal, Punct},
    };

    #[test]
    fn match_does_not_advance() {
        let buffer = TokenBuffer::<CommonToken>::new("apples").unwrap();
        let parser = buffer.parser();
        let mut lookahead = parser.lookahead();

        assert!(lookahead.peek::<Ident>());
        assert!(lookahead.expected.is_empty());
        assert!(!parser.is_empty());
    }

    #[rstest]
    #[case::nothing_attempted("'fuji'", 0, "unexpected token")]
    #[case::end_of_input("", 1, "expected identifier, found end of input")]
    #[case::two("'fuji'", 2, "expected identifier or punctuation, found unexpected token")]
    #[case::three("'fuji'", 3, "expected identifier, punctuation or (, found unexpected token")]
    fn error(#[case] source: &str, #[case] attempts: usize, #[case] message: &str) {
        let buffer = TokenBuffer::<CommonToken>::new(source).unwrap();
        let parser = buffer.parser();
        let mut lookahead = parser.lookahead();

        let peeks: [fn(&mut Lookahead<'_, CommonToken>) -> bool; 3] = [
            |lookahead| lookahead.peek::<Ident>(),
            |lookahead| lookahead.peek::<Punct>(),
            |lookahead| lookahead.peek::<LeftParenthesis>(),
        ];
        for peek in &peeks[..attempts] {
            assert!(!peek(&mut lookahead));
        }

        assert_eq!(lookahead.error(), message);
    }

    #[test]
    fn repeated_attempts_reported_once() {
        let buffer = TokenBuffer::<CommonToken>::new("*").unwrap();
        let parser = buffer.parser();
        let mut lookahead = parser.lookahead();

        assert!(!lookahead.peek::<Literal>());
        assert!(!lookahead.peek::<Literal>());
        assert!(lookahead.peek::<Punct>());

        assert_eq!(lookahead.error(), "expected literal, found unexpected token");
    }
}
