//! Identifier sanitization for imported sections

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static INVALID_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_]").unwrap());
static UNDERSCORE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Turn a directory or archive name into a section id (`Data Structure` -> `data_structure`)
pub fn sanitize_id(name: &str) -> String {
    // Normalize unicode to NFD form, then collect only ASCII chars
    let normalized: String = name.nfd().filter(|c| c.is_ascii()).collect();

    let mut result = normalized.to_lowercase().replace([' ', '-', '.'], "_");
    result = INVALID_CHARS.replace_all(&result, "").to_string();
    result = UNDERSCORE_RUNS.replace_all(&result, "_").to_string();
    result = result.trim_matches('_').to_string();

    if result.len() > 64 {
        result.truncate(64);
        result = result.trim_matches('_').to_string();
    }

    if result.is_empty() {
        result = "untitled".to_string();
    }

    result
}

/// Display name for a section id (`data_structure` -> `Data Structure`)
pub fn title_from_id(id: &str) -> String {
    id.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_basic() {
        assert_eq!(sanitize_id("Data Structure"), "data_structure");
        assert_eq!(sanitize_id("java-advanced"), "java_advanced");
    }

    #[test]
    fn test_sanitize_special_chars() {
        assert_eq!(sanitize_id("Java 2 (2024)!"), "java_2_2024");
    }

    #[test]
    fn test_sanitize_unicode() {
        assert_eq!(sanitize_id("Théorie"), "theorie");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_id("!!!"), "untitled");
    }

    #[test]
    fn test_title_from_id() {
        assert_eq!(title_from_id("data_structure"), "Data Structure");
        assert_eq!(title_from_id("java1"), "Java1");
    }
}
