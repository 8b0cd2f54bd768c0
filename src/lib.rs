//! Parsers for the text formats of a status bar: color markup, output
//! templates, and the `Config { … }` block that ties them together.
//!
//! ```ignore
//! let parser = BarParser::builder()
//!     .source(std::fs::read_to_string("bar.conf")?)
//!     .build()?;
//!
//! for segment in parser.template() {
//!     println!("{} -> {}", segment.command.alias(), segment.suffix);
//! }
//! ```
//!
//! That call decodes the config block, fills absent fields from the
//! defaults, builds the command alias table, and resolves the configured
//! template against it.
//!
//! # The three formats
//!
//! **Markup** colors runs of text with nestable `<fc=COLOR>…</fc>` blocks.
//! [`parse_markup`] turns a string into [`StyledFragment`]s, each carrying
//! its text and effective color. Malformed markup never fails the caller:
//! it becomes one fragment reading `could not parse string: …` in the
//! ambient color. [`try_parse_markup`] exposes the underlying error.
//!
//! **Templates** interleave literal text with command references delimited
//! by a separator character, `%` by default:
//!
//! ```text
//! %StdinReader% }{ <fc=#00FF00>%uname%</fc> * %theDate%
//! ```
//!
//! [`split_template`] tokenizes into prefix/reference/suffix [`Segment`]s;
//! [`parse_template`] then resolves each reference through a
//! [`TemplateContext`]. A reference with no matching alias becomes
//! [`Runnable::placeholder`], so resolution always succeeds. The
//! [`split_alignment`] helper cuts a template into left, center and right
//! parts on the two-character `alignSep`.
//!
//! **Config blocks** assign the nine known fields in any order:
//!
//! ```text
//! Config { font = "xft:Mono-9"
//!        , position = TopW L 90
//!        , commands = [ Run (Date "%H:%M" "clock" 10), Run StdinReader ]
//!        , template = "%StdinReader% }{ %clock%"
//!        }
//! ```
//!
//! [`parse_config`] and [`decode`] return a [`Decoded`] record plus a
//! [`DefaultLog`] naming every field that was absent and kept its default.
//! Each field may appear at most once; unknown fields, trailing input and
//! malformed values are errors with line and column.
//!
//! # Structured values
//!
//! `position` and `commands` hold constructor terms such as
//! `Static { xpos = 0, ypos = 0, width = 800, height = 18 }` or
//! `Run (Com "uname" ["-s"] "" 36000)`. The [`value`] module reads these
//! into a generic tree and deserializes them with serde, so any
//! `Deserialize` type with the same shape can be read the same way.
//! [`to_source`] goes the other direction for any `Serialize` type, and
//! [`render_config`] writes a whole block that decodes back to the same
//! record.
//!
//! # Core library and CLI
//!
//! [`BarParser`] and [`ParseAction`] need no CLI framework. With the `clap`
//! Cargo feature (on by default) the [`ParseArgs`] adapter provides
//! `list|gen|defaults|markup|template` subcommands that convert into a
//! `ParseAction` via [`ParseArgs::into_action`].
//!
//! # Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events and installs
//! no subscriber. Markup fallbacks and configs replaced by their baseline
//! are reported at `warn`, defaulted fields at `info`, tolerated unmatched
//! template separators at `debug`, and each decoded field at `trace`.
//!
//! # Error handling
//!
//! Parsing fails with [`ParseError`], which always carries the
//! [`Location`] of the problem. Rendering fails with [`RenderError`], and
//! [`BarError`] wraps both for [`BarParser::handle`].

pub mod cursor;
pub mod error;
pub mod types;
pub mod value;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod command;
mod config;
mod decode;
mod markup;
mod ops;
mod render;
mod template;

#[cfg(test)]
mod fixtures;

pub use builder::{BarParser, BarParserBuilder};
#[cfg(feature = "clap")]
pub use cli::{ParseArgs, ParseSubcommand};
pub use command::{Command, DEFAULT_RATE, Runnable};
pub use config::{Align, Config, Position};
pub use cursor::Location;
pub use decode::{Decoded, DefaultLog, decode, parse_config, render_config};
pub use error::{BarError, ParseError, RenderError};
pub use markup::{FAILURE_PREFIX, StyledFragment, parse_markup, try_parse_markup};
pub use ops::ParseReport;
pub use render::to_source;
pub use template::{
    Aligned, ResolvedSegment, Segment, TemplateContext, parse_template, resolve_segments,
    split_alignment, split_template,
};
pub use types::ParseAction;
