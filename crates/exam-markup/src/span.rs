use std::fmt;

/// Span represents a byte range in the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize, // Start byte offset (inclusive)
    pub end: usize,   // End byte offset (exclusive)
}

impl Span {
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Slice the text this span was taken from
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Markup rule kinds, declared in descending priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpanKind {
    CodeBlock,
    Bold,
    Italic,
    InlineCode,
    InlineMath,
    DisplayMath,
    HtmlTag,
    HtmlEntity,
}

impl SpanKind {
    /// All kinds in priority order
    pub const ALL: [SpanKind; 8] = [
        SpanKind::CodeBlock,
        SpanKind::Bold,
        SpanKind::Italic,
        SpanKind::InlineCode,
        SpanKind::InlineMath,
        SpanKind::DisplayMath,
        SpanKind::HtmlTag,
        SpanKind::HtmlEntity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::CodeBlock => "code-block",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::InlineCode => "code",
            SpanKind::InlineMath => "math",
            SpanKind::DisplayMath => "display-math",
            SpanKind::HtmlTag => "tag",
            SpanKind::HtmlEntity => "entity",
        }
    }

    /// Kinds whose matched text is dropped from preview output
    pub fn is_suppressed_in_preview(&self) -> bool {
        matches!(self, SpanKind::HtmlTag | SpanKind::HtmlEntity)
    }

    /// Kinds highlighted as a single range instead of marker/content/marker
    pub fn is_undivided(&self) -> bool {
        matches!(self, SpanKind::CodeBlock | SpanKind::HtmlTag | SpanKind::HtmlEntity)
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule match: the full marked-up range and its content range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub kind: SpanKind,
    pub outer: Span,
    pub inner: Span,
}

impl Match {
    pub fn new(kind: SpanKind, outer: Span, inner: Span) -> Self {
        debug_assert!(outer.start <= inner.start && inner.end <= outer.end);
        Self { kind, outer, inner }
    }
}
