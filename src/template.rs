//! Template strings: literal text interleaved with `%alias%` command references.
//!
//! Tokenization repeatedly reads a prefix (text up to the separator), then a
//! reference between two separators, then a suffix (text up to the next
//! separator). Each round yields one [`Segment`]. A template without any
//! separator pair yields a single segment with an empty reference.
//!
//! A trailing separator with no partner is kept as literal text, so
//! tokenization always succeeds:
//!
//! ```text
//! "load %cpu% | 50%"  →  ("load ", "cpu", " | "), (" | 50%" kept literal)
//! ```
//!
//! References are then resolved against a [`TemplateContext`]; unknown ones
//! become [`Runnable::placeholder`].

use std::collections::HashMap;

use crate::command::Runnable;
use crate::cursor::Cursor;

/// One tokenized piece of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Segment {
    pub prefix: String,
    pub reference: String,
    pub suffix: String,
}

/// A segment whose reference has been looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedSegment {
    pub command: Runnable,
    pub prefix: String,
    pub suffix: String,
}

/// Alias lookup table used to resolve template references.
///
/// Built from a command list; when two commands share an alias the later one
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    aliases: HashMap<String, Runnable>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands<'a>(commands: impl IntoIterator<Item = &'a Runnable>) -> Self {
        commands.into_iter().cloned().collect()
    }

    pub fn insert(&mut self, runnable: Runnable) {
        self.aliases.insert(runnable.alias().to_string(), runnable);
    }

    pub fn lookup(&self, alias: &str) -> Option<&Runnable> {
        self.aliases.get(alias)
    }

    /// The command for `reference`, or a placeholder built from it.
    pub fn resolve(&self, reference: &str) -> Runnable {
        self.lookup(reference)
            .cloned()
            .unwrap_or_else(|| Runnable::placeholder(reference))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl FromIterator<Runnable> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = Runnable>>(iter: I) -> Self {
        let mut context = TemplateContext::new();
        for runnable in iter {
            context.insert(runnable);
        }
        context
    }
}

/// Split `input` into segments on `separator`.
pub fn split_template(separator: char, input: &str) -> Vec<Segment> {
    let mut cursor = Cursor::new(input);
    let mut segments = Vec::new();
    let not_separator = |c: char| c != separator;

    loop {
        let mut prefix = cursor.take_while(not_separator).to_string();
        if cursor.is_eof() {
            if segments.is_empty() || !prefix.is_empty() {
                segments.push(Segment {
                    prefix,
                    ..Segment::default()
                });
            }
            break;
        }

        let open = cursor.mark();
        cursor.bump();
        let reference = cursor.take_while(not_separator);
        if !cursor.eat_char(separator) {
            tracing::debug!(
                location = %open.location(),
                "unmatched template separator kept as literal text"
            );
            prefix.push_str(cursor.since(open));
            segments.push(Segment {
                prefix,
                ..Segment::default()
            });
            break;
        }

        let suffix = cursor.take_while(not_separator);
        segments.push(Segment {
            prefix,
            reference: reference.to_string(),
            suffix: suffix.to_string(),
        });
        if cursor.is_eof() {
            break;
        }
    }

    segments
}

/// Resolve each segment's reference against `context`.
pub fn resolve_segments(context: &TemplateContext, segments: Vec<Segment>) -> Vec<ResolvedSegment> {
    segments
        .into_iter()
        .map(|segment| ResolvedSegment {
            command: context.resolve(&segment.reference),
            prefix: segment.prefix,
            suffix: segment.suffix,
        })
        .collect()
}

/// Tokenize and resolve a template in one step.
pub fn parse_template(separator: char, context: &TemplateContext, input: &str) -> Vec<ResolvedSegment> {
    resolve_segments(context, split_template(separator, input))
}

/// A template split into left, center, and right-aligned parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aligned<T> {
    pub left: T,
    pub center: T,
    pub right: T,
}

impl<T> Aligned<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Aligned<U> {
        Aligned {
            left: f(self.left),
            center: f(self.center),
            right: f(self.right),
        }
    }
}

/// Split `template` on a two-character alignment separator such as `"}{"`.
///
/// Text before the first char is left-aligned, text between the two chars is
/// centered, the rest is right-aligned. Anything else leaves the whole
/// template on the left.
pub fn split_alignment<'a>(template: &'a str, align_sep: &str) -> Aligned<&'a str> {
    let whole = Aligned {
        left: template,
        center: "",
        right: "",
    };

    let mut chars = align_sep.chars();
    let (Some(open), Some(close), None) = (chars.next(), chars.next(), chars.next()) else {
        return whole;
    };

    let Some((left, rest)) = template.split_once(open) else {
        return whole;
    };
    match rest.split_once(close) {
        Some((center, right)) => Aligned {
            left,
            center,
            right,
        },
        None => whole,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    fn seg(prefix: &str, reference: &str, suffix: &str) -> Segment {
        Segment {
            prefix: prefix.into(),
            reference: reference.into(),
            suffix: suffix.into(),
        }
    }

    fn com(alias: &str) -> Runnable {
        Runnable::Run(Command::Com(format!("/bin/{alias}"), vec![], alias.into(), 50))
    }

    #[test]
    fn two_references_with_gap() {
        assert_eq!(
            split_template('%', "%cpu%  %mem%"),
            vec![seg("", "cpu", "  "), seg("", "mem", "")]
        );
    }

    #[test]
    fn leading_text_becomes_prefix() {
        assert_eq!(
            split_template('%', "up: %uptime% days"),
            vec![seg("up: ", "uptime", " days")]
        );
    }

    #[test]
    fn no_separators_yields_single_literal_segment() {
        assert_eq!(split_template('%', "just text"), vec![seg("just text", "", "")]);
    }

    #[test]
    fn empty_input_yields_single_empty_segment() {
        assert_eq!(split_template('%', ""), vec![Segment::default()]);
    }

    #[test]
    fn unmatched_trailing_separator_is_literal() {
        assert_eq!(
            split_template('%', "%cpu% at 50%"),
            vec![seg("", "cpu", " at 50"), seg("%", "", "")]
        );
    }

    #[test]
    fn unmatched_separator_only() {
        assert_eq!(split_template('%', "50% done"), vec![seg("50% done", "", "")]);
    }

    #[test]
    fn adjacent_separators_give_empty_reference() {
        assert_eq!(split_template('%', "a%%b"), vec![seg("a", "", "b")]);
    }

    #[test]
    fn custom_separator() {
        assert_eq!(
            split_template('$', "$date$ 100%"),
            vec![seg("", "date", " 100%")]
        );
    }

    #[test]
    fn known_aliases_resolve_in_order() {
        let context = TemplateContext::from_commands(&[com("cpu"), com("mem")]);
        let resolved = parse_template('%', &context, "%cpu%  %mem%");
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].command, com("cpu"));
        assert_eq!(resolved[0].suffix, "  ");
        assert_eq!(resolved[1].command, com("mem"));
    }

    #[test]
    fn unknown_alias_resolves_to_placeholder() {
        let resolved = parse_template('%', &TemplateContext::new(), "%unknown%");
        assert_eq!(
            resolved,
            vec![ResolvedSegment {
                command: Runnable::placeholder("unknown"),
                prefix: String::new(),
                suffix: String::new(),
            }]
        );
    }

    #[test]
    fn later_duplicate_alias_wins() {
        let first = Runnable::Run(Command::Date("%H".into(), "clock".into(), 10));
        let second = Runnable::Run(Command::Date("%M".into(), "clock".into(), 10));
        let context = TemplateContext::from_commands(&[first, second.clone()]);
        assert_eq!(context.len(), 1);
        assert_eq!(context.lookup("clock"), Some(&second));
    }

    #[test]
    fn alignment_split() {
        let aligned = split_alignment("%a% }%b%{ %c%", "}{");
        assert_eq!(
            aligned,
            Aligned {
                left: "%a% ",
                center: "%b%",
                right: " %c%",
            }
        );
    }

    #[test]
    fn alignment_without_separator_keeps_left() {
        let aligned = split_alignment("%a% %b%", "}{");
        assert_eq!(aligned.left, "%a% %b%");
        assert_eq!(aligned.center, "");
        assert_eq!(aligned.right, "");
    }

    #[test]
    fn alignment_with_only_open_char_keeps_left() {
        assert_eq!(split_alignment("a } b", "}{").left, "a } b");
    }

    #[test]
    fn alignment_separator_must_be_two_chars() {
        assert_eq!(split_alignment("a}b{c", "}").left, "a}b{c");
        assert_eq!(split_alignment("a}b{c", "}{|").left, "a}b{c");
    }
}
