//! Color markup: `<fc=COLOR>text</fc>` directives.
//!
//! The grammar is small:
//!
//! ```text
//! Doc        := (Text | ColorBlock)* EOF
//! Text       := (any char except '<' | '<' not starting a directive)+
//! ColorBlock := "<fc=" Color ">" (Text | ColorBlock)* "</fc>"
//! Color      := (alphanumeric | ',' | '#')+
//! ```
//!
//! Blocks nest; text takes the color of the innermost open block. A `<` that
//! does not start `<fc=` or `</fc>` is plain text.
//!
//! [`parse_markup`] never fails: malformed input becomes a single fragment
//! carrying a "could not parse string" message in the ambient color. Callers
//! that want the error itself use [`try_parse_markup`].

use crate::cursor::Cursor;
use crate::error::ParseError;

const OPEN: &str = "<fc=";
const CLOSE: &str = "</fc>";

/// Prefix of the fragment produced when markup cannot be parsed.
pub const FAILURE_PREFIX: &str = "could not parse string: ";

/// A run of text and the color it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyledFragment {
    pub text: String,
    pub color: String,
}

impl StyledFragment {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }
}

/// Parse `input`, falling back to a single error fragment on failure.
pub fn parse_markup(ambient: &str, input: &str) -> Vec<StyledFragment> {
    match try_parse_markup(ambient, input) {
        Ok(fragments) => fragments,
        Err(err) => {
            tracing::warn!(%err, input, "markup could not be parsed");
            vec![StyledFragment::new(
                format!("{FAILURE_PREFIX}{input}"),
                ambient,
            )]
        }
    }
}

/// Parse `input` into fragments, reporting the first error.
///
/// Open blocks are tracked on an explicit color stack, so nesting depth is
/// bounded only by memory.
pub fn try_parse_markup(ambient: &str, input: &str) -> Result<Vec<StyledFragment>, ParseError> {
    let mut cursor = Cursor::new(input);
    let mut fragments = Vec::new();
    let mut colors: Vec<&str> = Vec::new();

    loop {
        if let Some(run) = text(&mut cursor) {
            let color = colors.last().copied().unwrap_or(ambient);
            fragments.push(StyledFragment::new(run, color));
        }
        if cursor.is_eof() {
            if !colors.is_empty() {
                return Err(cursor.unexpected(format!("'{CLOSE}'")));
            }
            return Ok(fragments);
        }
        if cursor.looking_at(CLOSE) {
            if colors.pop().is_none() {
                return Err(cursor.unexpected(format!("'{OPEN}'")));
            }
            cursor.eat(CLOSE);
        } else {
            colors.push(open_block(&mut cursor)?);
        }
    }
}

fn at_directive(cursor: &Cursor<'_>) -> bool {
    cursor.looking_at(OPEN) || cursor.looking_at(CLOSE)
}

fn text<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    let start = cursor.mark();
    while !cursor.is_eof() && !at_directive(cursor) {
        cursor.bump();
    }
    let run = cursor.since(start);
    (!run.is_empty()).then_some(run)
}

fn is_color_char(c: char) -> bool {
    c.is_alphanumeric() || c == ',' || c == '#'
}

/// `<fc=COLOR>`, returning the color.
fn open_block<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str, ParseError> {
    cursor.expect(OPEN)?;
    let color = cursor.take_while(is_color_char);
    if color.is_empty() {
        return Err(cursor.unexpected("a color"));
    }
    cursor.expect(">")?;
    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Location;

    fn frag(text: &str, color: &str) -> StyledFragment {
        StyledFragment::new(text, color)
    }

    #[test]
    fn plain_text_takes_ambient_color() {
        assert_eq!(
            parse_markup("white", "hello world"),
            vec![frag("hello world", "white")]
        );
    }

    #[test]
    fn empty_input_yields_no_fragments() {
        assert!(parse_markup("white", "").is_empty());
    }

    #[test]
    fn colored_then_plain() {
        assert_eq!(
            parse_markup("white", "<fc=#FF0000>hot</fc>cold"),
            vec![frag("hot", "#FF0000"), frag("cold", "white")]
        );
    }

    #[test]
    fn nested_blocks_revert_to_enclosing_color() {
        assert_eq!(
            parse_markup("white", "<fc=red>a<fc=blue>b</fc>c</fc>d"),
            vec![
                frag("a", "red"),
                frag("b", "blue"),
                frag("c", "red"),
                frag("d", "white"),
            ]
        );
    }

    #[test]
    fn color_with_commas() {
        assert_eq!(
            parse_markup("white", "<fc=#ffffff,#000000>x</fc>"),
            vec![frag("x", "#ffffff,#000000")]
        );
    }

    #[test]
    fn lone_angle_bracket_is_text() {
        assert_eq!(
            parse_markup("white", "a < b <fc=red>c<d</fc>"),
            vec![frag("a < b ", "white"), frag("c<d", "red")]
        );
    }

    #[test]
    fn near_miss_directives_are_text() {
        assert_eq!(
            parse_markup("white", "<fc >x</f>"),
            vec![frag("<fc >x</f>", "white")]
        );
    }

    #[test]
    fn empty_block_yields_nothing() {
        assert_eq!(
            parse_markup("white", "a<fc=red></fc>b"),
            vec![frag("a", "white"), frag("b", "white")]
        );
    }

    #[test]
    fn unmatched_open_yields_error_fragment() {
        let input = "<fc=red>never closed";
        assert_eq!(
            parse_markup("white", input),
            vec![frag(&format!("{FAILURE_PREFIX}{input}"), "white")]
        );
    }

    #[test]
    fn orphan_close_is_a_failure() {
        let result = try_parse_markup("white", "text</fc>");
        let err = result.unwrap_err();
        assert_eq!(err.location(), Location { line: 1, column: 5 });
    }

    #[test]
    fn missing_color_is_a_failure() {
        let err = try_parse_markup("white", "<fc=>x</fc>").unwrap_err();
        assert!(err.to_string().contains("a color"));
    }

    #[test]
    fn invalid_color_char_is_a_failure() {
        assert!(try_parse_markup("white", "<fc=red green>x</fc>").is_err());
    }

    #[test]
    fn failure_never_returns_partial_output() {
        let fragments = parse_markup("gray", "ok <fc=red>ok</fc> <fc=blue>broken");
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].text.starts_with(FAILURE_PREFIX));
        assert_eq!(fragments[0].color, "gray");
    }

    #[test]
    fn deeply_nested_blocks_parse() {
        let depth = 100_000;
        let input = format!("{}x{}", "<fc=a>".repeat(depth), "</fc>".repeat(depth));
        assert_eq!(try_parse_markup("white", &input).unwrap(), vec![frag("x", "a")]);
    }

    #[test]
    fn deeply_nested_unclosed_blocks_fall_back() {
        let depth = 100_000;
        let input = format!("{}x{}", "<fc=a>".repeat(depth), "</fc>".repeat(depth - 1));
        let fragments = parse_markup("white", &input);
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].text.starts_with(FAILURE_PREFIX));
    }

    #[test]
    fn unclosed_block_error_is_at_end_of_input() {
        let err = try_parse_markup("white", "<fc=red>ab").unwrap_err();
        assert_eq!(err.location(), Location { line: 1, column: 11 });
        assert!(err.to_string().contains("'</fc>'"));
    }

    #[test]
    fn error_location_spans_lines() {
        let err = try_parse_markup("white", "line one\n<fc=red>open").unwrap_err();
        assert_eq!(err.location().line, 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn plain_text() -> impl Strategy<Value = String> {
        // No '=' or '/', so concatenated runs can never form a directive.
        "[a-zA-Z0-9 .:%<>]{0,12}"
    }

    fn color() -> impl Strategy<Value = String> {
        "[#a-zA-Z0-9,]{1,8}"
    }

    /// A balanced markup document and the text it should render to.
    fn document() -> impl Strategy<Value = (String, String)> {
        let leaf = plain_text().prop_map(|t| (t.clone(), t));
        leaf.prop_recursive(4, 24, 3, |inner| {
            prop_oneof![
                (color(), inner.clone()).prop_map(|(c, (markup, plain))| {
                    (format!("<fc={c}>{markup}</fc>"), plain)
                }),
                prop::collection::vec(inner, 1..3).prop_map(|parts| {
                    parts
                        .into_iter()
                        .fold((String::new(), String::new()), |(m, p), (pm, pp)| {
                            (m + &pm, p + &pp)
                        })
                }),
            ]
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn balanced_markup_keeps_all_text((markup, plain) in document()) {
            let fragments = try_parse_markup("white", &markup);
            prop_assert!(fragments.is_ok(), "failed on {:?}", markup);
            let text: String = fragments.unwrap().into_iter().map(|f| f.text).collect();
            prop_assert_eq!(text, plain);
        }

        #[test]
        fn unmatched_open_always_yields_single_error(
            prefix in plain_text(),
            c in color(),
            body in plain_text(),
        ) {
            let input = format!("{prefix}<fc={c}>{body}");
            let fragments = parse_markup("white", &input);
            prop_assert_eq!(fragments.len(), 1);
            prop_assert_eq!(&fragments[0].text, &format!("{FAILURE_PREFIX}{input}"));
        }
    }
}
