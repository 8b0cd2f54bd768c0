#[cfg(test)]
pub mod test {
    use crate::command::{Command, Runnable};
    use crate::config::{Align, Config, Position};

    /// A block setting every field, laid out the way users write them.
    pub const SAMPLE_BLOCK: &str = r##"
Config { font = "xft:DejaVu Sans Mono-9"
       , bgColor = "#1d1f21"
       , fgColor = "grey"
       , position = TopW L 90
       , lowerOnStart = False
       , commands = [ Run (Com "uname" ["-s", "-r"] "" 36000)
                    , Run (Com "uptime" [] "up" 600)
                    , Run (Date "%a %b %_d %H:%M" "date" 10)
                    , Run StdinReader
                    ]
       , sepChar = "%"
       , alignSep = "}{"
       , template = "%StdinReader% }{ <fc=#ee9a00>%date%</fc> | %uname% up %up%"
       }
"##;

    pub fn sample_commands() -> Vec<Runnable> {
        vec![
            Runnable::Run(Command::Com(
                "uname".into(),
                vec!["-s".into(), "-r".into()],
                String::new(),
                36000,
            )),
            Runnable::Run(Command::Com("uptime".into(), vec![], "up".into(), 600)),
            Runnable::Run(Command::Date(
                "%a %b %_d %H:%M".into(),
                "date".into(),
                10,
            )),
            Runnable::Run(Command::StdinReader),
        ]
    }

    /// The record [`SAMPLE_BLOCK`] decodes to.
    pub fn sample_config() -> Config {
        Config {
            font: "xft:DejaVu Sans Mono-9".into(),
            bg_color: "#1d1f21".into(),
            fg_color: "grey".into(),
            position: Position::TopW(Align::L, 90),
            lower_on_start: false,
            commands: sample_commands(),
            sep_char: '%',
            align_sep: "}{".into(),
            template: "%StdinReader% }{ <fc=#ee9a00>%date%</fc> | %uname% up %up%".into(),
        }
    }

    #[test]
    fn sample_commands_have_distinct_aliases() {
        let commands = sample_commands();
        let aliases: Vec<&str> = commands.iter().map(|r| r.alias()).collect();
        assert_eq!(aliases, vec!["uname", "up", "date", "StdinReader"]);
    }
}
