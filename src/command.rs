//! Handles for the external commands a template can reference.
//!
//! The library never runs these; it only needs to know each command's alias
//! (how a template refers to it) and to read/write them in config syntax:
//!
//! ```text
//! commands = [ Run (Com "uname" ["-s", "-r"] "" 36000)
//!            , Run (Date "%a %b %_d %H:%M" "date" 10)
//!            , Run StdinReader
//!            ]
//! ```

use serde::{Deserialize, Serialize};

/// Refresh rate used for placeholder commands, in tenths of a second.
pub const DEFAULT_RATE: u32 = 10;

/// A data-producing command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// `Com program args alias rate`. An empty alias means the program name.
    Com(String, Vec<String>, String, u32),
    /// `Date format alias rate`.
    Date(String, String, u32),
    /// Lines read from standard input.
    StdinReader,
}

impl Command {
    /// The name a template uses to reference this command.
    pub fn alias(&self) -> &str {
        match self {
            Command::Com(program, _, alias, _) if alias.is_empty() => program,
            Command::Com(_, _, alias, _) | Command::Date(_, alias, _) => alias,
            Command::StdinReader => "StdinReader",
        }
    }

    /// Refresh rate in tenths of a second, if the command polls.
    pub fn rate(&self) -> Option<u32> {
        match self {
            Command::Com(.., rate) | Command::Date(.., rate) => Some(*rate),
            Command::StdinReader => None,
        }
    }
}

/// A schedulable command, as listed in the `commands` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Runnable {
    Run(Command),
}

impl Runnable {
    /// Stand-in for a template reference that matches no known alias:
    /// `Run (Com reference [] "" 10)`.
    pub fn placeholder(reference: &str) -> Self {
        Runnable::Run(Command::Com(
            reference.to_string(),
            Vec::new(),
            String::new(),
            DEFAULT_RATE,
        ))
    }

    pub fn command(&self) -> &Command {
        let Runnable::Run(command) = self;
        command
    }

    pub fn alias(&self) -> &str {
        self.command().alias()
    }
}

impl From<Command> for Runnable {
    fn from(command: Command) -> Self {
        Runnable::Run(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn com_alias_falls_back_to_program() {
        let cmd = Command::Com("uname".into(), vec!["-s".into()], String::new(), 100);
        assert_eq!(cmd.alias(), "uname");
    }

    #[test]
    fn com_alias_wins_when_set() {
        let cmd = Command::Com("uname".into(), vec![], "kernel".into(), 100);
        assert_eq!(cmd.alias(), "kernel");
    }

    #[test]
    fn date_uses_declared_alias() {
        let cmd = Command::Date("%H:%M".into(), "clock".into(), 10);
        assert_eq!(cmd.alias(), "clock");
        assert_eq!(cmd.rate(), Some(10));
    }

    #[test]
    fn stdin_reader_has_fixed_alias_and_no_rate() {
        assert_eq!(Command::StdinReader.alias(), "StdinReader");
        assert_eq!(Command::StdinReader.rate(), None);
    }

    #[test]
    fn placeholder_shape() {
        let run = Runnable::placeholder("unknown");
        assert_eq!(
            run,
            Runnable::Run(Command::Com("unknown".into(), vec![], String::new(), 10))
        );
        assert_eq!(run.alias(), "unknown");
        assert_eq!(run.command().rate(), Some(DEFAULT_RATE));
    }
}
