//! Parse operations: field listing, source generation, markup and template
//! inspection, and the `ParseReport` type callers use to display results.
//!
//! Provides the logic behind `parse list`, `parse gen`, `parse defaults`,
//! `parse markup` and `parse template`.

use std::fmt;

use crate::config::Config;
use crate::decode::{DefaultLog, FIELDS, render_config};
use crate::error::RenderError;
use crate::markup::{StyledFragment, parse_markup};
use crate::template::{ResolvedSegment, TemplateContext, parse_template};

/// Result of a parse operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseReport {
    /// Colored runs of a markup string.
    Fragments(Vec<StyledFragment>),
    /// Resolved segments of a template.
    Segments(Vec<ResolvedSegment>),
    /// Every config field with its value in config syntax.
    Listing { entries: Vec<(String, String)> },
    /// Fields that were absent from the source.
    Defaults(DefaultLog),
    /// A complete, re-parseable config block.
    Source(String),
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseReport::Fragments(fragments) => {
                for (i, fragment) in fragments.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "[{}] {:?}", fragment.color, fragment.text)?;
                }
                Ok(())
            }
            ParseReport::Segments(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(
                        f,
                        "{:?} <{}> {:?}",
                        segment.prefix,
                        segment.command.alias(),
                        segment.suffix
                    )?;
                }
                Ok(())
            }
            ParseReport::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ParseReport::Defaults(log) if log.is_empty() => write!(f, "No defaulted fields"),
            ParseReport::Defaults(log) => {
                for (i, name) in log.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{name}")?;
                }
                Ok(())
            }
            ParseReport::Source(source) => write!(f, "{source}"),
        }
    }
}

/// List every field of `config` in canonical order.
pub fn list_fields(config: &Config) -> Result<ParseReport, RenderError> {
    let entries = FIELDS
        .iter()
        .map(|field| Ok((field.name.to_string(), field.render(config)?)))
        .collect::<Result<Vec<_>, RenderError>>()?;
    Ok(ParseReport::Listing { entries })
}

/// Render `config` as a complete config block.
pub fn generate_source(config: &Config) -> Result<ParseReport, RenderError> {
    render_config(config).map(ParseReport::Source)
}

/// Parse markup in the given ambient color.
pub fn markup_fragments(ambient: &str, input: &str) -> ParseReport {
    ParseReport::Fragments(parse_markup(ambient, input))
}

/// Tokenize and resolve `input` with the config's separator.
pub fn template_segments(config: &Config, context: &TemplateContext, input: &str) -> ParseReport {
    ParseReport::Segments(parse_template(config.sep_char, context, input))
}
