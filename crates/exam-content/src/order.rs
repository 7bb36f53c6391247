//! Order file: the authoritative, user-ordered chapter list of a section

use crate::fsutil::{read_json_lenient, write_json_pretty};
use crate::model::ChapterSummary;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Handle on one section's order file
#[derive(Debug, Clone)]
pub struct OrderFile {
    path: PathBuf,
}

impl OrderFile {
    pub fn new(section_dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self { path: section_dir.as_ref().join(file_name) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the chapter list; absence or a parse failure yields an empty list
    /// and, for the latter, a diagnostic
    pub fn load_or_default(&self) -> (Vec<ChapterSummary>, Option<String>) {
        read_json_lenient(&self.path)
    }

    /// Persist the chapter list (pretty-printed, atomic)
    pub fn save(&self, chapters: &[ChapterSummary]) -> Result<()> {
        write_json_pretty(&self.path, chapters)
            .with_context(|| format!("Failed to save order file {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let order = OrderFile::new(temp.path(), "chapters.json");
        let (chapters, diag) = order.load_or_default();
        assert!(chapters.is_empty());
        assert!(diag.is_none());
        assert!(!order.exists());
    }

    #[test]
    fn test_malformed_file_is_empty_with_diagnostic() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("chapters.json"), "[{\"id\": ").unwrap();
        let (chapters, diag) = OrderFile::new(temp.path(), "chapters.json").load_or_default();
        assert!(chapters.is_empty());
        assert!(diag.is_some());
    }

    #[test]
    fn test_save_and_load_keeps_order() {
        let temp = TempDir::new().unwrap();
        let order = OrderFile::new(temp.path(), "chapters.json");
        let chapters = vec![
            ChapterSummary::new("2", "Second", 3, "chapter2.json"),
            ChapterSummary::new("1", "First", 5, "chapter1.json"),
        ];
        order.save(&chapters).unwrap();

        let (loaded, _) = order.load_or_default();
        assert_eq!(loaded, chapters);

        let raw = fs::read_to_string(order.path()).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"id\": \"2\""));
    }
}
