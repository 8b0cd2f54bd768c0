//! # barparse demo application
//!
//! A sample CLI tool that showcases how to integrate barparse into a status
//! bar. It never runs the configured commands; references are shown as
//! `<alias>` so the layout can be checked by eye.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example barparse_demo -- render
//! cargo run --example barparse_demo -- --config bar.conf parse list
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                                       |
//! |-------------------------|--------------------------------------------------------------------------|
//! | Compiled defaults       | `cargo run --example barparse_demo -- render`                            |
//! | Config file             | `cargo run --example barparse_demo -- --config bar.conf render`          |
//! | Strict decoding         | `cargo run --example barparse_demo -- --config bad.conf --strict render` |
//! | Defaulted-field logging | `RUST_LOG=info cargo run --example barparse_demo -- --config bar.conf render` |
//! | `parse list`            | `cargo run --example barparse_demo -- parse list`                        |
//! | `parse gen`             | `cargo run --example barparse_demo -- parse gen`                         |
//! | `parse defaults`        | `cargo run --example barparse_demo -- --config bar.conf parse defaults`  |
//! | `parse markup`          | `cargo run --example barparse_demo -- parse markup '<fc=red>hot</fc>'`   |
//! | `parse template`        | `cargo run --example barparse_demo -- parse template '%cpu% | %mem%'`    |

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use barparse::{BarParser, ParseArgs, ResolvedSegment, StyledFragment};

// ---------------------------------------------------------------------------
// CLI definitions
// ---------------------------------------------------------------------------

/// barparse demo: decode a bar config and preview its template.
#[derive(Parser, Debug)]
#[command(name = "barparse-demo")]
struct Cli {
    /// Config block to decode instead of the compiled defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fail on a config that does not decode instead of using defaults.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the configured template with markup colors applied.
    Render,
    /// Inspect the config, markup, and templates.
    Parse(ParseArgs),
}

// ---------------------------------------------------------------------------
// Builder helper
// ---------------------------------------------------------------------------

fn make_parser(cli: &Cli) -> BarParser {
    let mut builder = BarParser::builder();
    if let Some(path) = &cli.config {
        let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {e}", path.display());
            std::process::exit(1);
        });
        builder = builder.source(text);
    }

    if cli.strict {
        builder.build().unwrap_or_else(|e| {
            eprintln!("Failed to decode config:\n{e}");
            std::process::exit(1);
        })
    } else {
        builder.build_or_baseline()
    }
}

// ---------------------------------------------------------------------------
// ANSI color helpers
// ---------------------------------------------------------------------------

fn ansi_color_code(name: &str) -> String {
    if let Some(hex) = name.strip_prefix('#')
        && hex.len() == 6
        && let Ok(rgb) = u32::from_str_radix(hex, 16)
    {
        return format!("\x1b[38;2;{};{};{}m", rgb >> 16, (rgb >> 8) & 0xff, rgb & 0xff);
    }
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" | "grey" | "gray" => "\x1b[37m",
        _ => "\x1b[0m",
    }
    .to_string()
}

const RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Segment text with each reference shown as `<alias>`.
fn preview(segments: &[ResolvedSegment]) -> String {
    segments
        .iter()
        .map(|s| {
            let alias = s.command.alias();
            if alias.is_empty() {
                format!("{}{}", s.prefix, s.suffix)
            } else {
                format!("{}<{alias}>{}", s.prefix, s.suffix)
            }
        })
        .collect()
}

fn paint(fragments: &[StyledFragment]) -> String {
    fragments
        .iter()
        .map(|f| format!("{}{}{RESET}", ansi_color_code(&f.color), f.text))
        .collect()
}

fn render(parser: &BarParser) {
    let aligned = parser.aligned_template();
    for (label, part) in [
        ("left", &aligned.left),
        ("center", &aligned.center),
        ("right", &aligned.right),
    ] {
        let fragments = parser.markup(&preview(part));
        println!("{label:<6}  {}", paint(&fragments));
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let parser = make_parser(&cli);

    match cli.command {
        Commands::Render => render(&parser),
        Commands::Parse(args) => {
            let action = args.into_action();
            parser.handle_and_print(&action).unwrap_or_else(|e| {
                eprintln!("Parse error:\n{e}");
                std::process::exit(1);
            });
        }
    }
}
