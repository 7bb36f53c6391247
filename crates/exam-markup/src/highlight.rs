//! Editor highlighting pass
//!
//! Attaches presentation tags to byte ranges of the original text. The text
//! itself is never modified.

use crate::rules::scan;
use crate::span::{Match, Span, SpanKind};

/// Which piece of a match a highlight covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Open,
    Content,
    Close,
    Whole,
}

/// A styled range over the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub span: Span,
    pub kind: SpanKind,
    pub part: Part,
}

impl Highlight {
    /// Tag name suitable for a text widget, e.g. `bold` or `bold-marker`
    pub fn tag(&self) -> String {
        match self.part {
            Part::Open | Part::Close => format!("{}-marker", self.kind),
            Part::Content | Part::Whole => self.kind.to_string(),
        }
    }
}

/// Compute highlight ranges for the whole text.
///
/// Rules run in priority order. A match that overlaps a range already
/// claimed by a higher-priority rule is discarded.
pub fn highlight(text: &str) -> Vec<Highlight> {
    let mut claimed: Vec<Span> = Vec::new();
    let mut highlights = Vec::new();

    for kind in SpanKind::ALL {
        for m in scan(text, kind) {
            if claimed.iter().any(|span| span.overlaps(&m.outer)) {
                continue;
            }
            claimed.push(m.outer);
            push_parts(&mut highlights, &m);
        }
    }

    highlights.sort_by_key(|h| (h.span.start, h.span.end));
    highlights
}

fn push_parts(highlights: &mut Vec<Highlight>, m: &Match) {
    if m.kind.is_undivided() {
        highlights.push(Highlight { span: m.outer, kind: m.kind, part: Part::Whole });
        return;
    }

    let open = Span::new(m.outer.start, m.inner.start);
    let close = Span::new(m.inner.end, m.outer.end);

    for (span, part) in [(open, Part::Open), (m.inner, Part::Content), (close, Part::Close)] {
        if !span.is_empty() {
            highlights.push(Highlight { span, kind: m.kind, part });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_of(text: &str, kind: SpanKind) -> Vec<String> {
        highlight(text)
            .into_iter()
            .filter(|h| h.kind == kind && h.part == Part::Content)
            .map(|h| h.span.slice(text).to_string())
            .collect()
    }

    #[test]
    fn test_bold_and_italic_are_separate() {
        let text = "**bold** and *italic*";
        let hl = highlight(text);

        let bold = hl.iter().find(|h| h.kind == SpanKind::Bold && h.part == Part::Content).unwrap();
        let italic =
            hl.iter().find(|h| h.kind == SpanKind::Italic && h.part == Part::Content).unwrap();

        assert_eq!(bold.span.slice(text), "bold");
        assert_eq!(italic.span.slice(text), "italic");
        assert!(!bold.span.overlaps(&italic.span));
    }

    #[test]
    fn test_markers_are_tagged() {
        let text = "**b**";
        let hl = highlight(text);
        assert_eq!(hl.len(), 3);
        assert_eq!(hl[0].part, Part::Open);
        assert_eq!(hl[0].span, Span::new(0, 2));
        assert_eq!(hl[0].tag(), "bold-marker");
        assert_eq!(hl[1].tag(), "bold");
        assert_eq!(hl[2].span, Span::new(3, 5));
    }

    #[test]
    fn test_code_block_shadows_lower_rules() {
        let text = "```\n**not bold** `x` <b>\n```";
        let hl = highlight(text);
        assert_eq!(hl.len(), 1);
        assert_eq!(hl[0].kind, SpanKind::CodeBlock);
        assert_eq!(hl[0].part, Part::Whole);
        assert_eq!(hl[0].span, Span::new(0, text.len()));
    }

    #[test]
    fn test_tags_and_entities_undivided() {
        let text = "a<br>b&nbsp;c";
        let hl = highlight(text);
        assert_eq!(hl.len(), 2);
        assert_eq!(hl[0].kind, SpanKind::HtmlTag);
        assert_eq!(hl[0].span.slice(text), "<br>");
        assert_eq!(hl[1].kind, SpanKind::HtmlEntity);
        assert_eq!(hl[1].span.slice(text), "&nbsp;");
    }

    #[test]
    fn test_math_content() {
        assert_eq!(content_of(r"area \(\pi r^2\)", SpanKind::InlineMath), vec![r"\pi r^2"]);
    }

    #[test]
    fn test_plain_text_has_no_highlights() {
        assert!(highlight("nothing to see here").is_empty());
    }
}
