/// A parse operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAction {
    /// List every field of the effective config.
    List,
    /// Render the effective config back to a complete `Config { … }` block.
    Gen,
    /// Show which fields took their default value.
    Defaults,
    /// Parse a markup string. `color` overrides the ambient color, which
    /// otherwise is the config's `fgColor`.
    Markup {
        input: String,
        color: Option<String>,
    },
    /// Tokenize and resolve a template; `None` uses the config's own.
    Template { input: Option<String> },
}
