//! Plain-text preview rendering
//!
//! Flattens markup into display text: markers are stripped, span content is
//! kept and tagged, raw HTML tags and entities are dropped.

use crate::rules::scan_all;
use crate::span::{Match, Span, SpanKind};
use regex::Regex;
use std::sync::LazyLock;

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

const NBSP_ENTITY: &str = "&nbsp;";

/// A styled range over the rendered preview text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRange {
    pub span: Span,
    pub kind: SpanKind,
}

/// Rendered preview: display text plus the styles applied to it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub text: String,
    pub styles: Vec<StyledRange>,
}

impl Preview {
    /// Text covered by each style, in output order
    pub fn styled_text(&self) -> Vec<(SpanKind, &str)> {
        self.styles.iter().map(|s| (s.kind, s.span.slice(&self.text))).collect()
    }
}

/// Replace the line-break tag and the non-breaking-space entity
pub fn substitute_literals(text: &str) -> String {
    LINE_BREAK.replace_all(text, "\n").replace(NBSP_ENTITY, " ")
}

/// Render a preview of marked-up text
pub fn preview(text: &str) -> Preview {
    let text = substitute_literals(text);
    let kept = select_non_overlapping(scan_all(&text));

    let mut out = Preview::default();
    let mut cursor = 0;

    for m in kept {
        out.text.push_str(&text[cursor..m.outer.start]);
        cursor = m.outer.end;

        if m.kind.is_suppressed_in_preview() {
            continue;
        }

        let start = out.text.len();
        out.text.push_str(m.inner.slice(&text));
        out.styles.push(StyledRange { span: Span::new(start, out.text.len()), kind: m.kind });
    }

    out.text.push_str(&text[cursor..]);
    out
}

/// Sort candidates by start, longest first on ties, then greedily keep the
/// ones that start at or after the end of the previously kept match.
fn select_non_overlapping(mut candidates: Vec<Match>) -> Vec<Match> {
    // Stable sort keeps priority order among equal (start, length) pairs
    candidates.sort_by(|a, b| {
        a.outer.start.cmp(&b.outer.start).then_with(|| b.outer.len().cmp(&a.outer.len()))
    });

    let mut kept: Vec<Match> = Vec::new();
    for m in candidates {
        if kept.last().is_some_and(|last| m.outer.start < last.outer.end) {
            continue;
        }
        kept.push(m);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_literals() {
        assert_eq!(substitute_literals("a<br>b<BR/>c<br />d&nbsp;e"), "a\nb\nc\nd e");
    }

    #[test]
    fn test_longest_wins_on_same_start() {
        let first = Match::new(SpanKind::Italic, Span::new(0, 1), Span::new(0, 1));
        let second = Match::new(SpanKind::Bold, Span::new(0, 1), Span::new(0, 1));
        // Equal length: the earlier candidate stays
        assert_eq!(select_non_overlapping(vec![first, second]), vec![first]);

        let a = Match::new(SpanKind::HtmlTag, Span::new(0, 3), Span::new(0, 3));
        let b = Match::new(SpanKind::Bold, Span::new(0, 8), Span::new(2, 6));
        let c = Match::new(SpanKind::Italic, Span::new(5, 9), Span::new(6, 8));
        let d = Match::new(SpanKind::InlineCode, Span::new(8, 10), Span::new(9, 9));
        assert_eq!(select_non_overlapping(vec![a, c, d, b]), vec![b, d]);
    }

    #[test]
    fn test_code_and_bold() {
        let p = preview("Use `print()` and **go**");
        assert_eq!(p.text, "Use print() and go");
        assert_eq!(
            p.styled_text(),
            vec![(SpanKind::InlineCode, "print()"), (SpanKind::Bold, "go")]
        );
    }

    #[test]
    fn test_tags_and_entities_are_dropped() {
        let p = preview("a<br>b&nbsp;c<span class=\"x\">d</span>&lt;");
        assert_eq!(p.text, "a\nb cd");
        assert!(p.styles.is_empty());
    }

    #[test]
    fn test_code_block_content_verbatim() {
        let p = preview("See:\n```java\nif (a) {\n  b();\n}\n```\ndone");
        assert_eq!(p.text, "See:\nif (a) {\n  b();\n}\n\ndone");
        assert_eq!(p.styles[0].kind, SpanKind::CodeBlock);
        assert_eq!(p.styled_text()[0].1, "if (a) {\n  b();\n}\n");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let p = preview("just text");
        assert_eq!(p.text, "just text");
        assert!(p.styles.is_empty());
    }
}
