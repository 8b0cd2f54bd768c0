//! Decoding of `Config { … }` blocks.
//!
//! A block lists `name = value` assignments in any order:
//!
//! ```text
//! Config { font = "xft:Mono-9"
//!        , position = TopW L 90
//!        , commands = [Run StdinReader]
//!        }
//! ```
//!
//! Each of the nine known fields has a static descriptor pairing its name
//! with a value parser and a renderer. Decoding repeatedly reads the next
//! assignment name, finds it among the descriptors not yet satisfied, parses
//! its value, and retires the descriptor. When no assignment follows, the
//! block must close with `}` and end of input.
//!
//! Fields that never appear keep the value from the baseline record and are
//! listed, in canonical order, in the returned [`DefaultLog`].
//!
//! Unknown names, repeated names, malformed values and leftover input all
//! fail the whole decode; no partial record is returned.

use std::fmt;

use crate::config::Config;
use crate::cursor::Cursor;
use crate::error::{ParseError, RenderError};
use crate::render::{quote, to_source};
use crate::value::{read_as, string_literal};

/// Names of the fields that were absent and took their baseline value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultLog(Vec<&'static str>);

impl DefaultLog {
    pub fn fields(&self) -> &[&'static str] {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for DefaultLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub config: Config,
    pub defaults: DefaultLog,
}

impl Decoded {
    pub fn into_parts(self) -> (Config, DefaultLog) {
        (self.config, self.defaults)
    }
}

/// One recognized config field.
pub(crate) struct Field {
    pub(crate) name: &'static str,
    decode: fn(&mut Cursor<'_>, &mut Config) -> Result<(), ParseError>,
    render: fn(&Config) -> Result<String, RenderError>,
}

impl Field {
    pub(crate) fn render(&self, config: &Config) -> Result<String, RenderError> {
        (self.render)(config)
    }
}

/// The recognized fields, in canonical order.
pub(crate) static FIELDS: [Field; 9] = [
    Field {
        name: "font",
        decode: |c, config| {
            config.font = string_literal(c)?;
            Ok(())
        },
        render: |config| Ok(quote(&config.font)),
    },
    Field {
        name: "bgColor",
        decode: |c, config| {
            config.bg_color = string_literal(c)?;
            Ok(())
        },
        render: |config| Ok(quote(&config.bg_color)),
    },
    Field {
        name: "fgColor",
        decode: |c, config| {
            config.fg_color = string_literal(c)?;
            Ok(())
        },
        render: |config| Ok(quote(&config.fg_color)),
    },
    Field {
        name: "position",
        decode: |c, config| {
            config.position = read_as(c, "position")?;
            Ok(())
        },
        render: |config| to_source(&config.position),
    },
    Field {
        name: "lowerOnStart",
        decode: |c, config| {
            config.lower_on_start = keyword(c, BOOL_LITERALS)?;
            Ok(())
        },
        render: |config| to_source(&config.lower_on_start),
    },
    Field {
        name: "commands",
        decode: |c, config| {
            config.commands = read_as(c, "commands")?;
            Ok(())
        },
        render: |config| to_source(&config.commands),
    },
    Field {
        name: "sepChar",
        decode: |c, config| {
            config.sep_char = single_char(c, "sepChar")?;
            Ok(())
        },
        render: |config| to_source(&config.sep_char),
    },
    Field {
        name: "alignSep",
        decode: |c, config| {
            config.align_sep = string_literal(c)?;
            Ok(())
        },
        render: |config| Ok(quote(&config.align_sep)),
    },
    Field {
        name: "template",
        decode: |c, config| {
            config.template = string_literal(c)?;
            Ok(())
        },
        render: |config| Ok(quote(&config.template)),
    },
];

/// Printed names of `bool` in config syntax.
const BOOL_LITERALS: &[(&str, bool)] = &[("True", true), ("False", false)];

/// Match one of a fixed set of keywords, taken verbatim.
fn keyword<T: Copy>(cursor: &mut Cursor<'_>, choices: &[(&str, T)]) -> Result<T, ParseError> {
    cursor.attempt(|c| {
        let word = c.take_while(|ch| ch.is_alphanumeric() || ch == '_');
        choices
            .iter()
            .find(|(name, _)| *name == word)
            .map(|(_, value)| *value)
            .ok_or(())
    })
    .map_err(|()| {
        let names: Vec<&str> = choices.iter().map(|(name, _)| *name).collect();
        cursor.unexpected(format!("one of {}", names.join(", ")))
    })
}

/// A quoted string holding exactly one character.
fn single_char(cursor: &mut Cursor<'_>, field: &str) -> Result<char, ParseError> {
    let start = cursor.location();
    let text = string_literal(cursor)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::InvalidValue {
            field: field.to_string(),
            location: start,
            reason: format!("expected a single character, found {text:?}"),
        }),
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Decode a config block using [`Config::default`] for absent fields.
pub fn parse_config(input: &str) -> Result<Decoded, ParseError> {
    decode(input, &Config::default())
}

/// Decode a config block, taking absent fields from `baseline`.
pub fn decode(input: &str, baseline: &Config) -> Result<Decoded, ParseError> {
    let mut cursor = Cursor::new(input);
    cursor.skip_whitespace();
    cursor.expect("Config")?;
    cursor.skip_whitespace();
    cursor.expect("{")?;

    let mut config = baseline.clone();
    let mut pending: Vec<&Field> = FIELDS.iter().collect();
    let mut first = true;

    loop {
        let before = cursor.mark();
        cursor.skip_whitespace();
        if !first && !cursor.eat_char(',') {
            cursor.reset(before);
            break;
        }
        cursor.skip_whitespace();

        let at = cursor.location();
        let name = cursor.take_while(is_name_char);
        if name.is_empty() {
            cursor.reset(before);
            break;
        }
        let Some(index) = pending.iter().position(|field| field.name == name) else {
            let name = name.to_string();
            return Err(if FIELDS.iter().any(|field| field.name == name) {
                ParseError::DuplicateField { name, location: at }
            } else {
                ParseError::UnknownField { name, location: at }
            });
        };

        cursor.skip_whitespace();
        cursor.expect("=")?;
        cursor.skip_whitespace();
        let field = pending.remove(index);
        (field.decode)(&mut cursor, &mut config)?;
        tracing::trace!(field = field.name, "decoded config field");
        first = false;
    }

    cursor.skip_whitespace();
    cursor.expect("}")?;
    cursor.skip_whitespace();
    if !cursor.is_eof() {
        return Err(cursor.unexpected("end of input"));
    }

    let defaults = DefaultLog(pending.iter().map(|field| field.name).collect());
    Ok(Decoded { config, defaults })
}

/// Render `config` as a complete block listing every field.
///
/// Decoding the result yields `config` again with an empty [`DefaultLog`].
pub fn render_config(config: &Config) -> Result<String, RenderError> {
    let mut out = String::from("Config { ");
    for (i, field) in FIELDS.iter().enumerate() {
        if i > 0 {
            out.push_str("\n       , ");
        }
        out.push_str(field.name);
        out.push_str(" = ");
        out.push_str(&field.render(config)?);
    }
    out.push_str("\n       }\n");
    Ok(out)
}
