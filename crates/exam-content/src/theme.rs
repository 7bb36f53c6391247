//! Color theme for consistent output

use colored::*;

/// Color for success messages
pub fn success(msg: &str) -> ColoredString {
    msg.green()
}

/// Color for warning messages
pub fn warning(msg: &str) -> ColoredString {
    msg.yellow()
}

/// Color for info messages
pub fn info(msg: &str) -> ColoredString {
    msg.cyan()
}

/// Chapter id padded for table output
pub fn chapter_id(id: &str) -> ColoredString {
    format!("{:>4}", id).bold()
}

/// Question count, dimmed when unknown or zero
pub fn question_count(q: Option<u64>) -> ColoredString {
    match q {
        Some(0) | None => format!("{:>4}", q.unwrap_or(0)).dimmed(),
        Some(n) => format!("{:>4}", n).normal(),
    }
}

/// Color for markup span kinds in preview and highlight output
pub fn span_kind(kind: &str) -> ColoredString {
    match kind {
        "bold" | "bold-marker" => kind.bold(),
        "italic" | "italic-marker" => kind.italic(),
        "code" | "code-marker" | "code-block" => kind.green(),
        "math" | "math-marker" | "display-math" | "display-math-marker" => kind.magenta(),
        "tag" | "entity" => kind.dimmed(),
        _ => kind.white(),
    }
}

/// Symbol for success
pub fn success_symbol() -> &'static str {
    "✓"
}

/// Symbol for error
pub fn error_symbol() -> &'static str {
    "✗"
}

/// Symbol for warning
pub fn warning_symbol() -> &'static str {
    "⚠"
}

/// Symbol for info
pub fn info_symbol() -> &'static str {
    "→"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_id_padding() {
        assert!(chapter_id("7").to_string().contains("   7"));
    }

    #[test]
    fn test_question_count() {
        assert!(question_count(Some(12)).to_string().contains("12"));
        assert!(question_count(None).to_string().contains('0'));
    }

    #[test]
    fn test_span_kind_keeps_text() {
        assert!(span_kind("bold").to_string().contains("bold"));
        assert!(span_kind("unknown").to_string().contains("unknown"));
    }

    #[test]
    fn test_symbols() {
        assert_eq!(success_symbol(), "✓");
        assert_eq!(error_symbol(), "✗");
        assert_eq!(warning_symbol(), "⚠");
        assert_eq!(info_symbol(), "→");
    }
}
