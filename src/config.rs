//! The decoded configuration record and its value types.

use serde::{Deserialize, Serialize};

use crate::command::{Command, Runnable};
use crate::template::{Aligned, TemplateContext, split_alignment};

/// Status bar configuration.
///
/// Field order matches the canonical order of the `Config { … }` block; the
/// names used in the block are given on each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `font`: font name handed to the renderer.
    pub font: String,
    /// `bgColor`
    pub bg_color: String,
    /// `fgColor`: also the ambient color for markup.
    pub fg_color: String,
    /// `position`
    pub position: Position,
    /// `lowerOnStart`
    pub lower_on_start: bool,
    /// `commands`: the commands templates may reference by alias.
    pub commands: Vec<Runnable>,
    /// `sepChar`: delimits command references in the template.
    pub sep_char: char,
    /// `alignSep`: two characters splitting the template into left, center
    /// and right parts.
    pub align_sep: String,
    /// `template`
    pub template: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font: "-misc-fixed-*-*-*-*-10-*-*-*-*-*-*-*".to_string(),
            bg_color: "#000000".to_string(),
            fg_color: "#BFBFBF".to_string(),
            position: Position::Top,
            lower_on_start: true,
            commands: vec![
                Runnable::Run(Command::Date(
                    "%a %b %_d %Y * %H:%M:%S".to_string(),
                    "theDate".to_string(),
                    10,
                )),
                Runnable::Run(Command::StdinReader),
            ],
            sep_char: '%',
            align_sep: "}{".to_string(),
            template: "%StdinReader% }{ <fc=#00FF00>%uname%</fc> * <fc=#FF0000>%theDate%</fc>"
                .to_string(),
        }
    }
}

impl Config {
    /// Alias table built from [`commands`](Self::commands).
    pub fn template_context(&self) -> TemplateContext {
        TemplateContext::from_commands(&self.commands)
    }

    /// The template split by [`align_sep`](Self::align_sep).
    pub fn aligned_template(&self) -> Aligned<&str> {
        split_alignment(&self.template, &self.align_sep)
    }
}

/// Where the bar is placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Top,
    /// Top edge, `width` percent of the screen.
    TopW(Align, u32),
    Bottom,
    BottomW(Align, u32),
    Static {
        xpos: i32,
        ypos: i32,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Align {
    L,
    R,
    C,
}
