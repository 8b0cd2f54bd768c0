//! Character cursor shared by every parser in the crate.
//!
//! A [`Cursor`] walks a `&str` one `char` at a time while tracking a
//! 1-indexed line and column. Ordered choice is built on [`Cursor::mark`] and
//! [`Cursor::reset`]: a branch that fails restores the mark, so lookahead
//! never consumes input. The config decoder and the structured value reader
//! advance the same cursor, which keeps their positions in lock-step.

use std::fmt;

use crate::error::ParseError;

/// A 1-indexed line/column position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub const START: Location = Location { line: 1, column: 1 };
}

impl Default for Location {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A saved cursor state, restored with [`Cursor::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    offset: usize,
    location: Location,
}

impl Mark {
    pub fn location(&self) -> Location {
        self.location
    }
}

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    offset: usize,
    location: Location,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            location: Location::START,
        }
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume one character, updating line and column.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
        Some(c)
    }

    pub fn looking_at(&self, token: &str) -> bool {
        self.rest().starts_with(token)
    }

    /// Consume `token` if the input starts with it. Consumes nothing otherwise.
    pub fn eat(&mut self, token: &str) -> bool {
        if !self.looking_at(token) {
            return false;
        }
        for _ in token.chars() {
            self.bump();
        }
        true
    }

    pub fn eat_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the longest run of characters matching `pred`.
    pub fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
        &self.input[start..self.offset]
    }

    pub fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    pub fn mark(&self) -> Mark {
        Mark {
            offset: self.offset,
            location: self.location,
        }
    }

    pub fn reset(&mut self, mark: Mark) {
        self.offset = mark.offset;
        self.location = mark.location;
    }

    /// The input consumed since `mark`.
    pub fn since(&self, mark: Mark) -> &'a str {
        &self.input[mark.offset..self.offset]
    }

    /// Run `f`, rewinding to the current position if it fails.
    pub fn attempt<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let mark = self.mark();
        let result = f(self);
        if result.is_err() {
            self.reset(mark);
        }
        result
    }

    /// Consume `token` or fail with an expected-vs-found error.
    pub fn expect(&mut self, token: &str) -> Result<(), ParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected(format!("'{token}'")))
        }
    }

    /// Build an error at the current position describing what was expected.
    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::Unexpected {
            location: self.location,
            expected: expected.into(),
            found: self.describe_next(),
        }
    }

    fn describe_next(&self) -> String {
        match self.peek() {
            Some(c) => format!("{c:?}"),
            None => "end of input".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_tracks_lines_and_columns() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.bump();
        cursor.bump();
        assert_eq!(cursor.location(), Location { line: 1, column: 3 });
        cursor.bump();
        assert_eq!(cursor.location(), Location { line: 2, column: 1 });
        cursor.bump();
        assert_eq!(cursor.location(), Location { line: 2, column: 2 });
    }

    #[test]
    fn columns_count_chars_not_bytes() {
        let mut cursor = Cursor::new("éx");
        cursor.bump();
        assert_eq!(cursor.location().column, 2);
        assert_eq!(cursor.peek(), Some('x'));
    }

    #[test]
    fn eat_consumes_only_on_match() {
        let mut cursor = Cursor::new("<fc=red>");
        assert!(!cursor.eat("</fc>"));
        assert_eq!(cursor.rest(), "<fc=red>");
        assert!(cursor.eat("<fc="));
        assert_eq!(cursor.rest(), "red>");
    }

    #[test]
    fn attempt_rewinds_on_failure() {
        let mut cursor = Cursor::new("abc");
        let result: Result<(), ()> = cursor.attempt(|c| {
            c.bump();
            c.bump();
            Err(())
        });
        assert!(result.is_err());
        assert_eq!(cursor.rest(), "abc");
        assert_eq!(cursor.location(), Location::START);
    }

    #[test]
    fn attempt_keeps_progress_on_success() {
        let mut cursor = Cursor::new("abc");
        let result: Result<char, ()> = cursor.attempt(|c| c.bump().ok_or(()));
        assert_eq!(result, Ok('a'));
        assert_eq!(cursor.rest(), "bc");
    }

    #[test]
    fn since_returns_consumed_slice() {
        let mut cursor = Cursor::new("hello world");
        let mark = cursor.mark();
        cursor.take_while(|c| c != ' ');
        assert_eq!(cursor.since(mark), "hello");
    }

    #[test]
    fn expect_reports_found_token() {
        let mut cursor = Cursor::new("x");
        let err = cursor.expect("{").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unexpected {
                location: Location::START,
                expected: "'{'".into(),
                found: "'x'".into(),
            }
        );
    }

    #[test]
    fn expect_at_end_reports_end_of_input() {
        let mut cursor = Cursor::new("");
        let err = cursor.expect("}").unwrap_err();
        assert!(err.to_string().contains("end of input"));
    }
}
