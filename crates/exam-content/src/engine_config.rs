//! Generated engine configuration (`js/exam-config.js`)

use crate::config::Settings;
use crate::fsutil::write_atomic;
use crate::model::{ChapterDocument, ChapterSummary, Section};
use crate::order::OrderFile;
use crate::reconcile::{reconcile, Reconciliation};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// One section as consumed by the exam engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedSection {
    pub id: String,
    pub name: String,
    pub description: String,
    pub path: String,
    /// Chapter summaries whose `file` is relative to the content root
    pub chapters: Vec<ChapterSummary>,
}

/// The full engine configuration plus what happened while building it
#[derive(Debug, Default)]
pub struct GeneratedConfig {
    pub sections: Vec<GeneratedSection>,
    /// Per-section reconciliation results, keyed by section id
    pub reconciled: Vec<(String, Reconciliation)>,
    pub errors: Vec<String>,
}

impl GeneratedConfig {
    /// Script assigning the configuration to a constant
    pub fn render(&self, variable: &str) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.sections)
            .context("Failed to serialize engine configuration")?;
        Ok(format!("const {} = {};\n", variable, json))
    }

    pub fn chapter_count(&self) -> usize {
        self.sections.iter().map(|s| s.chapters.len()).sum()
    }
}

/// Reconcile every section and collect the engine configuration
pub fn build_global_config(
    root: impl AsRef<Path>,
    sections: &[Section],
    settings: &Settings,
) -> Result<GeneratedConfig> {
    let root = root.as_ref();
    let mut config = GeneratedConfig::default();

    for section in sections {
        let relative_dir = section.relative_dir(&settings.section_prefix);
        let section_dir = root.join(&relative_dir);

        let result = reconcile(&section_dir, &settings.order_file)
            .with_context(|| format!("Failed to reconcile section '{}'", section.id))?;
        config.errors.extend(result.errors.iter().map(|e| format!("{}: {}", section.id, e)));
        config.reconciled.push((section.id.clone(), result));

        let (mut chapters, diagnostic) =
            OrderFile::new(&section_dir, &settings.order_file).load_or_default();
        config.errors.extend(diagnostic);

        for chapter in chapters.iter_mut() {
            if chapter.needs_count() {
                if let Ok(doc) = ChapterDocument::load(section_dir.join(&chapter.file)) {
                    chapter.q = Some(doc.question_count().unwrap_or(0));
                }
            }
            chapter.file = format!("{}/{}", relative_dir, chapter.file);
        }

        config.sections.push(GeneratedSection {
            id: section.id.clone(),
            name: section.name.clone(),
            description: section.description.clone(),
            path: relative_dir,
            chapters,
        });
    }

    Ok(config)
}

/// Write the rendered configuration atomically, creating parent directories
pub fn write_global_config(path: impl AsRef<Path>, rendered: &str) -> Result<()> {
    let path = path.as_ref();
    write_atomic(path, rendered)
        .with_context(|| format!("Failed to write engine configuration {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn section(id: &str, path: &str) -> Section {
        Section {
            id: id.to_string(),
            name: id.to_uppercase(),
            path: path.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_render_format() {
        let config = GeneratedConfig {
            sections: vec![GeneratedSection {
                id: "a".to_string(),
                name: "A".to_string(),
                description: String::new(),
                path: "data/a".to_string(),
                chapters: Vec::new(),
            }],
            ..Default::default()
        };

        let rendered = config.render("EXAM_CONFIG").unwrap();
        assert!(rendered.starts_with("const EXAM_CONFIG = [\n  {\n    \"id\": \"a\""));
        assert!(rendered.ends_with("];\n"));
    }

    #[test]
    fn test_empty_registry_renders_empty_array() {
        let config = GeneratedConfig::default();
        assert_eq!(config.render("X").unwrap(), "const X = [];\n");
    }

    #[test]
    fn test_file_paths_are_prefixed() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("data/java");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("chapter1.json"), r#"{"questions": [{}, {}]}"#).unwrap();

        let config =
            build_global_config(temp.path(), &[section("java", "data/java")], &Settings::default())
                .unwrap();
        let chapter = &config.sections[0].chapters[0];
        assert_eq!(chapter.file, "data/java/chapter1.json");
        assert_eq!(chapter.q, Some(2));
    }

    #[test]
    fn test_missing_section_directory_has_no_chapters() {
        let temp = TempDir::new().unwrap();
        let config =
            build_global_config(temp.path(), &[section("gone", "data/gone")], &Settings::default())
                .unwrap();
        assert_eq!(config.sections.len(), 1);
        assert!(config.sections[0].chapters.is_empty());
        assert!(!temp.path().join("data/gone").exists());
    }

    #[test]
    fn test_write_global_config_creates_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("js/exam-config.js");
        write_global_config(&path, "const X = [];\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "const X = [];\n");
    }
}
