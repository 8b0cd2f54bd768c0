use thiserror::Error;

use crate::cursor::Location;

/// A failure to parse markup, a template, or a config block.
///
/// Every variant carries the [`Location`] of the offending input so callers
/// can point users at the exact line and column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{location}: expected {expected}, found {found}")]
    Unexpected {
        location: Location,
        expected: String,
        found: String,
    },

    #[error("Unknown field '{name}' at {location}")]
    UnknownField { name: String, location: Location },

    #[error("Duplicate field '{name}' at {location}")]
    DuplicateField { name: String, location: Location },

    #[error("Invalid value for '{field}' at {location}: {reason}")]
    InvalidValue {
        field: String,
        location: Location,
        reason: String,
    },
}

impl ParseError {
    /// Where in the input the failure was detected.
    pub fn location(&self) -> Location {
        match self {
            ParseError::Unexpected { location, .. }
            | ParseError::UnknownField { location, .. }
            | ParseError::DuplicateField { location, .. }
            | ParseError::InvalidValue { location, .. } => *location,
        }
    }
}

/// A value could not be written back out in config syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot render value: {0}")]
pub struct RenderError(pub(crate) String);

impl serde::ser::Error for RenderError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        RenderError(msg.to_string())
    }
}

/// Umbrella error for [`BarParser::handle`](crate::BarParser::handle).
#[derive(Debug, Error)]
pub enum BarError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
