//! Span grammar
//!
//! One matcher per [`SpanKind`]. Each matcher returns non-overlapping,
//! first-match-wins matches in scan order; combining the kinds is left to
//! the highlight and preview passes.

use crate::span::{Match, Span, SpanKind};
use regex::Regex;
use std::sync::LazyLock;

static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:[\w+#.-]+[ \t]*\n|\n)?(.*?)```").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static INLINE_MATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\\((.+?)\\\)").unwrap());
static DISPLAY_MATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\[(.+?)\\\]").unwrap());
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>]+>").unwrap());
static HTML_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#?[A-Za-z0-9]+;").unwrap());

/// Find every match of a single rule
pub fn scan(text: &str, kind: SpanKind) -> Vec<Match> {
    match kind {
        SpanKind::CodeBlock => scan_regex(text, &CODE_BLOCK, kind),
        SpanKind::Bold => scan_regex(text, &BOLD, kind),
        // Isolated single asterisks only; `**` runs belong to bold
        SpanKind::Italic => scan_isolated(text, b'*', kind, true),
        // Isolated single backticks only; never inside a fence marker
        SpanKind::InlineCode => scan_isolated(text, b'`', kind, false),
        SpanKind::InlineMath => scan_regex(text, &INLINE_MATH, kind),
        SpanKind::DisplayMath => scan_regex(text, &DISPLAY_MATH, kind),
        SpanKind::HtmlTag => scan_regex(text, &HTML_TAG, kind),
        SpanKind::HtmlEntity => scan_regex(text, &HTML_ENTITY, kind),
    }
}

/// Matches of every rule, grouped by kind in priority order
pub fn scan_all(text: &str) -> Vec<Match> {
    SpanKind::ALL.iter().flat_map(|kind| scan(text, *kind)).collect()
}

fn scan_regex(text: &str, re: &Regex, kind: SpanKind) -> Vec<Match> {
    re.captures_iter(text)
        .filter_map(|caps| {
            let outer = caps.get(0)?;
            let outer = Span::new(outer.start(), outer.end());
            // Rules without a content group (tags, entities) are their own content
            let inner = caps.get(1).map(|m| Span::new(m.start(), m.end())).unwrap_or(outer);
            Some(Match::new(kind, outer, inner))
        })
        .collect()
}

/// Runs of a delimiter byte as (start, length)
fn delimiter_runs(text: &str, delim: u8) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();

    for (pos, byte) in text.bytes().enumerate() {
        if byte != delim {
            continue;
        }
        match runs.last_mut() {
            Some((start, len)) if *start + *len == pos => *len += 1,
            _ => runs.push((pos, 1)),
        }
    }

    runs
}

/// Pair isolated single delimiters.
///
/// A delimiter is isolated when neither neighbour is the same byte. The
/// closer is the next isolated delimiter after the opener; longer runs in
/// between are allowed only when `inner_may_contain_delim` is set. A pair
/// never spans a line break.
fn scan_isolated(
    text: &str,
    delim: u8,
    kind: SpanKind,
    inner_may_contain_delim: bool,
) -> Vec<Match> {
    let runs = delimiter_runs(text, delim);
    let mut matches = Vec::new();
    let mut i = 0;

    while i < runs.len() {
        let (open, open_len) = runs[i];
        if open_len != 1 {
            i += 1;
            continue;
        }

        let mut closer = None;
        for (j, &(pos, len)) in runs.iter().enumerate().skip(i + 1) {
            if text[open + 1..pos].contains('\n') {
                break;
            }
            if len == 1 {
                closer = Some((j, pos));
                break;
            }
            if !inner_may_contain_delim {
                break;
            }
        }

        match closer {
            Some((j, close)) => {
                matches.push(Match::new(
                    kind,
                    Span::new(open, close + 1),
                    Span::new(open + 1, close),
                ));
                i = j + 1;
            }
            None => i += 1,
        }
    }

    matches
}
