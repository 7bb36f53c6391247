use exam_markup::{preview, SpanKind};
use proptest::prelude::*;

#[test]
fn test_preview_strips_markers() {
    let p = preview("Use `print()` and **go**");
    assert_eq!(p.text, "Use print() and go");
    assert!(!p.text.contains('`'));
    assert!(!p.text.contains('*'));
    assert_eq!(p.styled_text(), vec![(SpanKind::InlineCode, "print()"), (SpanKind::Bold, "go")]);
}

#[test]
fn test_entity_and_tag_suppression() {
    let p = preview("a<br>b&nbsp;c");
    assert_eq!(p.text, "a\nb c");
    assert!(!p.text.contains('<'));
    assert!(!p.text.contains('&'));
}

#[test]
fn test_legacy_keyword_markup() {
    let p = preview("<span class=\"keyword\">public</span>&nbsp;static");
    assert_eq!(p.text, "public static");
}

#[test]
fn test_italic_and_bold_mixed() {
    let p = preview("**Note:** the *default* is `0`");
    assert_eq!(p.text, "Note: the default is 0");
    assert_eq!(
        p.styled_text(),
        vec![(SpanKind::Bold, "Note:"), (SpanKind::Italic, "default"), (SpanKind::InlineCode, "0")]
    );
}

#[test]
fn test_math_content_kept() {
    let p = preview(r"Solve \(x + 1 = 2\) then \[y = 2x\]");
    assert_eq!(p.text, "Solve x + 1 = 2 then y = 2x");
    assert_eq!(p.styles[0].kind, SpanKind::InlineMath);
    assert_eq!(p.styles[1].kind, SpanKind::DisplayMath);
}

#[test]
fn test_spans_inside_kept_match_are_discarded() {
    // Tags inside a kept bold span start before its end and are discarded
    let p = preview("**a <b>tag</b>**");
    assert_eq!(p.text, "a <b>tag</b>");
    assert_eq!(p.styles.len(), 1);
    assert_eq!(p.styles[0].kind, SpanKind::Bold);
}

#[test]
fn test_unclosed_markers_are_literal() {
    let p = preview("2 * 3 = 6 and `oops");
    assert_eq!(p.text, "2 * 3 = 6 and `oops");
    assert!(p.styles.is_empty());
}

proptest! {
    #[test]
    fn prop_styles_are_ordered_and_disjoint(text in "[a-z *`<>&;\\\\()\\[\\]\n]{0,40}") {
        let p = preview(&text);
        for pair in p.styles.windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
        }
        for style in &p.styles {
            prop_assert!(style.span.end <= p.text.len());
        }
    }

    #[test]
    fn prop_plain_text_is_identity(text in "[a-zA-Z0-9 ,.\n]{0,60}") {
        let p = preview(&text);
        prop_assert_eq!(p.text, text);
        prop_assert!(p.styles.is_empty());
    }
}
