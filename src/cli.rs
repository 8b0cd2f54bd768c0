//! Clap adapter for barparse.
//!
//! This module is the **optional integration layer** between the
//! framework-agnostic parsers and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`ParseArgs`] and [`ParseSubcommand`] can be embedded directly into a clap
//! `#[derive(Parser)]` struct to get `list|gen|defaults|markup|template`
//! subcommands with no boilerplate.
//!
//! The only bridge to the core is [`ParseArgs::into_action()`], which
//! converts clap-parsed arguments into a [`ParseAction`](crate::ParseAction).
//! From there, all logic flows through
//! [`BarParser::handle()`](crate::BarParser::handle).

use clap::{Args, Subcommand};

use crate::types::ParseAction;

/// Clap-derived args for the parse subcommand group.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Parse(ParseArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ParseArgs {
    #[command(subcommand)]
    pub action: Option<ParseSubcommand>,
}

/// Available parse subcommands.
#[derive(Debug, Subcommand)]
pub enum ParseSubcommand {
    /// Show every config field in config syntax.
    List,
    /// Print the effective config as a complete config block.
    Gen,
    /// Show which fields were left at their default.
    Defaults,
    /// Split a markup string into colored fragments.
    Markup {
        /// Markup text, e.g. "<fc=red>hot</fc>".
        input: String,
        /// Ambient color (default: the config's fgColor).
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Tokenize a template and resolve its command references.
    Template {
        /// Template text (default: the config's template).
        input: Option<String>,
    },
}

impl ParseArgs {
    /// Convert clap-parsed args into a framework-agnostic `ParseAction`.
    ///
    /// Bare invocation (no subcommand) and explicit `list` both map to
    /// `ParseAction::List`.
    pub fn into_action(self) -> ParseAction {
        match self.action {
            None | Some(ParseSubcommand::List) => ParseAction::List,
            Some(ParseSubcommand::Gen) => ParseAction::Gen,
            Some(ParseSubcommand::Defaults) => ParseAction::Defaults,
            Some(ParseSubcommand::Markup { input, color }) => ParseAction::Markup { input, color },
            Some(ParseSubcommand::Template { input }) => ParseAction::Template { input },
        }
    }
}
