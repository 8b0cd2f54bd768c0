//! Reader for structured literal values embedded in a config block.
//!
//! Fields such as `position` and `commands` hold arbitrary literals:
//!
//! ```text
//! position = TopW L 90
//! position = Static { xpos = 0, ypos = 0, width = 1024, height = 16 }
//! commands = [Run (Com "uname" ["-s"] "" 36000), Run StdinReader]
//! ```
//!
//! [`read_value`] turns such a literal into a [`serde_json::Value`] using the
//! externally tagged enum layout serde expects, so any `Deserialize` type can
//! be produced from it with [`read_as`]:
//!
//! | Literal | Value |
//! |---------|-------|
//! | `Top` | `"Top"` |
//! | `True` / `False` | `true` / `false` |
//! | `Run StdinReader` | `{"Run": "StdinReader"}` |
//! | `TopW L 90` | `{"TopW": ["L", 90]}` |
//! | `Static { xpos = 0 }` | `{"Static": {"xpos": 0}}` |
//! | `[1, 2]` / `(1, 2)` | `[1, 2]` |
//! | `()` | `null` |
//!
//! The reader advances the caller's [`Cursor`], so parsing resumes exactly
//! where the literal ended. The returned [`Spanned`] also reports how much
//! input was consumed.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::cursor::{Cursor, Location};
use crate::error::ParseError;

/// A value together with the input span it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub start: Location,
    pub end: Location,
}

impl<T> Spanned<T> {
    /// Number of line breaks crossed while reading.
    pub fn lines_consumed(&self) -> usize {
        self.end.line - self.start.line
    }

    /// Columns consumed on the last line read.
    pub fn columns_consumed(&self) -> usize {
        if self.lines_consumed() == 0 {
            self.end.column - self.start.column
        } else {
            self.end.column - 1
        }
    }
}

/// Read one literal value starting at the cursor.
pub fn read_value(cursor: &mut Cursor<'_>) -> Result<Spanned<Value>, ParseError> {
    let start = cursor.location();
    let value = expression(cursor, 0)?;
    Ok(Spanned {
        value,
        start,
        end: cursor.location(),
    })
}

/// Read one literal value and deserialize it as `T`.
///
/// `field` names the config field in error messages.
pub fn read_as<T: DeserializeOwned>(cursor: &mut Cursor<'_>, field: &str) -> Result<T, ParseError> {
    let spanned = read_value(cursor)?;
    serde_json::from_value(spanned.value).map_err(|e| ParseError::InvalidValue {
        field: field.to_string(),
        location: spanned.start,
        reason: e.to_string(),
    })
}

/// Parse a complete string as a single literal value.
pub fn parse_value(input: &str) -> Result<Value, ParseError> {
    let mut cursor = Cursor::new(input);
    cursor.skip_whitespace();
    let value = expression(&mut cursor, 0)?;
    cursor.skip_whitespace();
    if !cursor.is_eof() {
        return Err(cursor.unexpected("end of input"));
    }
    Ok(value)
}

/// Read a double-quoted string literal with backslash escapes.
pub(crate) fn string_literal(cursor: &mut Cursor<'_>) -> Result<String, ParseError> {
    cursor.expect("\"")?;
    let mut out = String::new();
    loop {
        let escape_at = cursor.mark();
        match cursor.bump() {
            Some('"') => return Ok(out),
            Some('\\') => match cursor.bump() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                _ => {
                    cursor.reset(escape_at);
                    return Err(cursor.unexpected("a valid escape sequence"));
                }
            },
            Some(c) => out.push(c),
            None => return Err(cursor.unexpected("'\"'")),
        }
    }
}

/// Deepest nesting of lists, tuples and records a literal may use.
pub const MAX_DEPTH: usize = 128;

/// Step one level deeper into a bracketed literal at the cursor.
fn enter(cursor: &Cursor<'_>, depth: usize) -> Result<usize, ParseError> {
    if depth >= MAX_DEPTH {
        return Err(cursor.unexpected(format!("a value nested at most {MAX_DEPTH} deep")));
    }
    Ok(depth + 1)
}

fn is_constructor_start(c: char) -> bool {
    c.is_uppercase()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

/// A constructor application, or a single atom.
fn expression(cursor: &mut Cursor<'_>, depth: usize) -> Result<Value, ParseError> {
    if !cursor.peek().is_some_and(is_constructor_start) {
        return atom(cursor, depth);
    }

    let name = cursor.take_while(is_ident_char);
    if let Some(fields) = record(cursor, depth)? {
        return Ok(tagged(name, Value::Object(fields)));
    }

    let mut args = Vec::new();
    while let Some(arg) = argument(cursor, depth)? {
        args.push(arg);
    }
    Ok(apply(name, args))
}

/// The next atom after optional whitespace, if one starts there.
fn argument(cursor: &mut Cursor<'_>, depth: usize) -> Result<Option<Value>, ParseError> {
    let mark = cursor.mark();
    cursor.skip_whitespace();
    match cursor.peek() {
        Some(c) if starts_atom(c, cursor) => atom(cursor, depth).map(Some),
        _ => {
            cursor.reset(mark);
            Ok(None)
        }
    }
}

fn starts_atom(c: char, cursor: &Cursor<'_>) -> bool {
    match c {
        '"' | '[' | '(' => true,
        '-' => cursor.rest()[1..].starts_with(|d: char| d.is_ascii_digit()),
        c => c.is_ascii_digit() || is_constructor_start(c),
    }
}

fn atom(cursor: &mut Cursor<'_>, depth: usize) -> Result<Value, ParseError> {
    match cursor.peek() {
        Some('"') => string_literal(cursor).map(Value::String),
        Some('[') => list(cursor, depth),
        Some('(') => parenthesized(cursor, depth),
        Some(c) if c.is_ascii_digit() || c == '-' => number(cursor),
        Some(c) if is_constructor_start(c) => {
            let name = cursor.take_while(is_ident_char);
            match record(cursor, depth)? {
                Some(fields) => Ok(tagged(name, Value::Object(fields))),
                None => Ok(bare(name)),
            }
        }
        _ => Err(cursor.unexpected("a value")),
    }
}

fn bare(name: &str) -> Value {
    match name {
        "True" => Value::Bool(true),
        "False" => Value::Bool(false),
        _ => Value::String(name.to_string()),
    }
}

fn tagged(name: &str, payload: Value) -> Value {
    let mut map = Map::new();
    map.insert(name.to_string(), payload);
    Value::Object(map)
}

fn apply(name: &str, mut args: Vec<Value>) -> Value {
    match args.len() {
        0 => bare(name),
        1 => tagged(name, args.remove(0)),
        _ => tagged(name, Value::Array(args)),
    }
}

fn list(cursor: &mut Cursor<'_>, depth: usize) -> Result<Value, ParseError> {
    let depth = enter(cursor, depth)?;
    cursor.expect("[")?;
    let items = comma_separated(cursor, ']', depth)?;
    Ok(Value::Array(items))
}

/// `()`, `(expr)`, or a tuple `(a, b, …)`.
fn parenthesized(cursor: &mut Cursor<'_>, depth: usize) -> Result<Value, ParseError> {
    let depth = enter(cursor, depth)?;
    cursor.expect("(")?;
    let mut items = comma_separated(cursor, ')', depth)?;
    Ok(match items.len() {
        0 => Value::Null,
        1 => items.remove(0),
        _ => Value::Array(items),
    })
}

/// Items separated by commas, up to and including `close`.
fn comma_separated(
    cursor: &mut Cursor<'_>,
    close: char,
    depth: usize,
) -> Result<Vec<Value>, ParseError> {
    let mut items = Vec::new();
    cursor.skip_whitespace();
    if cursor.eat_char(close) {
        return Ok(items);
    }
    loop {
        cursor.skip_whitespace();
        items.push(expression(cursor, depth)?);
        cursor.skip_whitespace();
        if cursor.eat_char(close) {
            return Ok(items);
        }
        if !cursor.eat_char(',') {
            return Err(cursor.unexpected(format!("',' or '{close}'")));
        }
    }
}

/// `{ field = value, … }` following a constructor name, if present.
fn record(cursor: &mut Cursor<'_>, depth: usize) -> Result<Option<Map<String, Value>>, ParseError> {
    let mark = cursor.mark();
    cursor.skip_whitespace();
    if !cursor.looking_at("{") {
        cursor.reset(mark);
        return Ok(None);
    }
    let depth = enter(cursor, depth)?;
    cursor.bump();

    let mut fields = Map::new();
    cursor.skip_whitespace();
    if cursor.eat_char('}') {
        return Ok(Some(fields));
    }
    loop {
        cursor.skip_whitespace();
        let at = cursor.location();
        let name = cursor.take_while(is_ident_char);
        if name.is_empty() {
            return Err(cursor.unexpected("a field name"));
        }
        if fields.contains_key(name) {
            return Err(ParseError::DuplicateField {
                name: name.to_string(),
                location: at,
            });
        }
        cursor.skip_whitespace();
        cursor.expect("=")?;
        cursor.skip_whitespace();
        let value = expression(cursor, depth)?;
        fields.insert(name.to_string(), value);
        cursor.skip_whitespace();
        if cursor.eat_char('}') {
            return Ok(Some(fields));
        }
        if !cursor.eat_char(',') {
            return Err(cursor.unexpected("',' or '}'"));
        }
    }
}

fn number(cursor: &mut Cursor<'_>) -> Result<Value, ParseError> {
    let start = cursor.mark();
    cursor.eat_char('-');
    if cursor.take_while(|c| c.is_ascii_digit()).is_empty() {
        return Err(cursor.unexpected("a digit"));
    }

    let fraction = cursor.mark();
    let is_float = cursor.eat_char('.') && !cursor.take_while(|c| c.is_ascii_digit()).is_empty();
    if !is_float {
        cursor.reset(fraction);
    }

    let literal = cursor.since(start);
    let parsed = if is_float {
        literal.parse::<f64>().ok().map(Value::from)
    } else {
        literal.parse::<i64>().ok().map(Value::from)
    };
    parsed.ok_or_else(|| ParseError::Unexpected {
        location: start.location(),
        expected: "a number in range".to_string(),
        found: literal.to_string(),
    })
}
