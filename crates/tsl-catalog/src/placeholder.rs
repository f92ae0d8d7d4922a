//! printf-style placeholder scanning.
//!
//! A placeholder is `%` followed by optional flags (`-+ #0`), width digits,
//! a `.precision`, a length modifier (`h`, `l`, `L`) and one conversion
//! character out of `diouxXeEfFgGcrsa`. `%%` is an escaped percent sign.
//! A `%` that does not start a valid token is plain text.

/// A piece of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied as-is.
    Literal(&'a str),
    /// An escaped percent sign (`%%`).
    Percent,
    /// A positional placeholder, including the leading `%`.
    Placeholder(&'a str),
}

/// Iterator over the [`Segment`]s of a text, left to right.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find('%') {
            Some(0) => match token_len(self.rest) {
                Some(2) if self.rest.starts_with("%%") => {
                    self.rest = &self.rest[2..];
                    Some(Segment::Percent)
                }
                Some(len) => {
                    let (token, rest) = self.rest.split_at(len);
                    self.rest = rest;
                    Some(Segment::Placeholder(token))
                }
                None => {
                    let (literal, rest) = self.rest.split_at(1);
                    self.rest = rest;
                    Some(Segment::Literal(literal))
                }
            },
            Some(idx) => {
                let (literal, rest) = self.rest.split_at(idx);
                self.rest = rest;
                Some(Segment::Literal(literal))
            }
            None => {
                let literal = self.rest;
                self.rest = "";
                Some(Segment::Literal(literal))
            }
        }
    }
}

/// Split `text` into literals, escaped percents and placeholders.
#[must_use]
pub fn segments(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

/// Placeholder tokens in order of appearance.
pub fn placeholders(text: &str) -> impl Iterator<Item = &str> {
    segments(text).filter_map(|segment| match segment {
        Segment::Placeholder(token) => Some(token),
        _ => None,
    })
}

/// Number of positional placeholders in `text`.
#[must_use]
pub fn count(text: &str) -> usize {
    placeholders(text).count()
}

/// Byte length of the token at the start of `s` (which begins with `%`).
fn token_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(1) == Some(&b'%') {
        return Some(2);
    }
    let mut i = 1;
    while matches!(bytes.get(i), Some(b'-' | b'+' | b' ' | b'#' | b'0')) {
        i += 1;
    }
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'h' | b'l' | b'L')) {
        i += 1;
    }
    match bytes.get(i) {
        Some(
            b'd' | b'i' | b'o' | b'u' | b'x' | b'X' | b'e' | b'E' | b'f' | b'F' | b'g' | b'G'
            | b'c' | b'r' | b's' | b'a',
        ) => Some(i + 1),
        _ => None,
    }
}
