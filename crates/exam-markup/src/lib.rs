//! Lightweight markup formatter for exam question text
//!
//! Recognises a small, non-recursive span grammar (fenced code, bold,
//! italic, inline code, math, raw HTML tags and entities) and offers two
//! passes over it: [`highlight`] tags ranges of the original text for an
//! editor, [`preview`] flattens the text for display.

pub mod highlight;
pub mod live;
pub mod preview;
pub mod rules;
pub mod span;

// Re-export commonly used items
pub use highlight::{highlight, Highlight, Part};
pub use live::{Debouncer, LiveHighlighter};
pub use preview::{preview, Preview, StyledRange};
pub use rules::{scan, scan_all};
pub use span::{Match, Span, SpanKind};
