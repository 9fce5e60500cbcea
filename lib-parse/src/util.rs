use std::iter::{self, Peekable};

/// Utility to continually consume items from an iterator whilst a condition is true, without
/// consuming the iterator.
pub fn take_while<T>(
    chars: &mut Peekable<impl Iterator<Item = T>>,
    test: impl Fn(&T) -> bool,
) -> impl Iterator<Item = T> {
    iter::from_fn(move || chars.next_if(|c| test(c)))
}

/// Consume characters up to (and including) the closing `quote`. A doubled `quote` is an escaped
/// quote character. Produces `None` if the input ends before the closing quote.
pub fn take_quoted(
    chars: &mut Peekable<impl Iterator<Item = char>>,
    quote: char,
) -> Option<String> {
    let mut value = String::new();

    loop {
        let c = chars.next()?;

        if c != quote {
            value.push(c);
            continue;
        }

        if chars.next_if_eq(&quote).is_some() {
            value.push(quote);
            continue;
        }

        return Some(value);
    }
}
