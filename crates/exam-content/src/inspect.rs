//! Read-only reports over a workspace: chapter detection stats and validation

use crate::model::{ChapterDocument, Section};
use crate::workspace::Workspace;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// One chapter file as detected on disk
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterStat {
    pub file: String,
    pub title: String,
    /// Question count, or the reason the file could not be read
    pub questions: Result<u64, String>,
}

/// Detection report for one section directory
#[derive(Debug, Clone, PartialEq)]
pub struct SectionStats {
    pub section_id: String,
    pub chapters: Vec<ChapterStat>,
}

impl SectionStats {
    pub fn readable(&self) -> usize {
        self.chapters.iter().filter(|c| c.questions.is_ok()).count()
    }

    pub fn total_questions(&self) -> u64 {
        self.chapters.iter().filter_map(|c| c.questions.as_ref().ok()).sum()
    }
}

/// Scan chapter files of one section, or of every section when `id` is `None`
pub fn stats(workspace: &Workspace, id: Option<&str>) -> Result<Vec<SectionStats>> {
    let sections: Vec<&Section> = match id {
        Some(id) => vec![workspace.section(id)?],
        None => workspace.sections().iter().collect(),
    };

    let mut report = Vec::new();
    for section in sections {
        let dir = workspace.section_dir(section);
        let mut chapters = Vec::new();

        for name in chapter_file_names(&dir, &workspace.settings().order_file) {
            let stat = match ChapterDocument::load(dir.join(&name)) {
                Ok(doc) => ChapterStat {
                    title: doc.title().map(str::to_string).unwrap_or_else(|| stem(&name)),
                    questions: Ok(doc.question_count().unwrap_or(0)),
                    file: name,
                },
                Err(e) => ChapterStat {
                    title: stem(&name),
                    questions: Err(format!("{:#}", e)),
                    file: name,
                },
            };
            chapters.push(stat);
        }

        report.push(SectionStats { section_id: section.id.clone(), chapters });
    }

    Ok(report)
}

/// A problem found by [`validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    MissingSectionDir { section: String, path: String },
    UnreadableOrderFile { section: String, error: String },
    StaleEntry { section: String, file: String },
    UnlistedFile { section: String, file: String },
    DuplicateChapterId { section: String, id: String },
    UnreadableChapter { section: String, file: String, error: String },
    InvalidQuestion { section: String, file: String, question: String, problem: String },
    MissingImage { section: String, file: String, question: String, image: String },
}

impl ValidationIssue {
    pub fn severity(&self) -> &str {
        match self {
            ValidationIssue::MissingSectionDir { .. } => "ERROR",
            ValidationIssue::UnreadableOrderFile { .. } => "ERROR",
            ValidationIssue::StaleEntry { .. } => "ERROR",
            ValidationIssue::UnreadableChapter { .. } => "ERROR",
            ValidationIssue::InvalidQuestion { .. } => "ERROR",
            ValidationIssue::UnlistedFile { .. } => "WARNING",
            ValidationIssue::DuplicateChapterId { .. } => "WARNING",
            ValidationIssue::MissingImage { .. } => "WARNING",
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == "ERROR"
    }

    pub fn description(&self) -> String {
        match self {
            ValidationIssue::MissingSectionDir { section, path } => {
                format!("Section '{}': directory {} does not exist", section, path)
            }
            ValidationIssue::UnreadableOrderFile { section, error } => {
                format!("Section '{}': {}", section, error)
            }
            ValidationIssue::StaleEntry { section, file } => {
                format!("Section '{}': order file lists missing file {}", section, file)
            }
            ValidationIssue::UnlistedFile { section, file } => {
                format!("Section '{}': {} is not in the order file (run reconcile)", section, file)
            }
            ValidationIssue::DuplicateChapterId { section, id } => {
                format!("Section '{}': chapter id '{}' is used more than once", section, id)
            }
            ValidationIssue::UnreadableChapter { section, file, error } => {
                format!("Section '{}': cannot read {}: {}", section, file, error)
            }
            ValidationIssue::InvalidQuestion { section, file, question, problem } => {
                format!("Section '{}': {} question {}: {}", section, file, question, problem)
            }
            ValidationIssue::MissingImage { section, file, question, image } => {
                format!(
                    "Section '{}': {} question {} references missing image {}",
                    section, file, question, image
                )
            }
        }
    }
}

/// Check every section for order-file drift and broken chapter content
pub fn validate(workspace: &Workspace) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let order_file = &workspace.settings().order_file;

    for section in workspace.sections() {
        let id = section.id.clone();
        let dir = workspace.section_dir(section);
        if !dir.is_dir() {
            issues.push(ValidationIssue::MissingSectionDir {
                section: id,
                path: dir.display().to_string(),
            });
            continue;
        }

        let (chapters, diagnostic) = match workspace.chapters(&section.id) {
            Ok(loaded) => loaded,
            Err(_) => continue,
        };
        if let Some(error) = diagnostic {
            issues.push(ValidationIssue::UnreadableOrderFile { section: id.clone(), error });
        }
        let on_disk: Vec<String> = chapter_file_names(&dir, order_file);
        let listed: HashSet<&str> = chapters.iter().map(|c| c.file.as_str()).collect();

        let mut seen_ids: HashMap<&str, usize> = HashMap::new();
        for chapter in &chapters {
            *seen_ids.entry(chapter.id.as_str()).or_default() += 1;
            if !dir.join(&chapter.file).is_file() {
                issues.push(ValidationIssue::StaleEntry {
                    section: id.clone(),
                    file: chapter.file.clone(),
                });
            }
        }
        let mut duplicates: Vec<&str> =
            seen_ids.into_iter().filter(|(_, n)| *n > 1).map(|(dup, _)| dup).collect();
        duplicates.sort();
        for chapter_id in duplicates {
            issues.push(ValidationIssue::DuplicateChapterId {
                section: id.clone(),
                id: chapter_id.to_string(),
            });
        }

        for name in &on_disk {
            if !listed.contains(name.as_str()) {
                issues.push(ValidationIssue::UnlistedFile {
                    section: id.clone(),
                    file: name.clone(),
                });
            }
            validate_chapter(workspace.root(), &dir, &id, name, &mut issues);
        }
    }

    issues
}

fn validate_chapter(
    root: &Path,
    dir: &Path,
    section: &str,
    file: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let doc = match ChapterDocument::load(dir.join(file)) {
        Ok(doc) => doc,
        Err(e) => {
            issues.push(ValidationIssue::UnreadableChapter {
                section: section.to_string(),
                file: file.to_string(),
                error: format!("{:#}", e),
            });
            return;
        }
    };

    for (index, (raw, decoded)) in doc.questions.iter().zip(doc.typed_questions()).enumerate() {
        let question = match decoded {
            Ok(question) => question,
            Err(problem) => {
                issues.push(ValidationIssue::InvalidQuestion {
                    section: section.to_string(),
                    file: file.to_string(),
                    question: raw_label(raw, index),
                    problem,
                });
                continue;
            }
        };
        let label = question_label(&question.id, &question.number, index);

        for problem in question.validate() {
            issues.push(ValidationIssue::InvalidQuestion {
                section: section.to_string(),
                file: file.to_string(),
                question: label.clone(),
                problem,
            });
        }

        if let Some(image) = question.image.as_deref().filter(|i| !i.trim().is_empty()) {
            if !image_exists(root, dir, image) {
                issues.push(ValidationIssue::MissingImage {
                    section: section.to_string(),
                    file: file.to_string(),
                    question: label.clone(),
                    image: image.to_string(),
                });
            }
        }
    }
}

fn question_label(id: &str, number: &str, index: usize) -> String {
    if !number.is_empty() {
        number.to_string()
    } else if !id.is_empty() {
        id.to_string()
    } else {
        format!("#{}", index + 1)
    }
}

fn raw_label(raw: &serde_json::Value, index: usize) -> String {
    let field = |key: &str| match raw.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    question_label(&field("id"), &field("number"), index)
}

/// Images may be relative to the section directory or the content root; URLs are not checked
fn image_exists(root: &Path, dir: &Path, image: &str) -> bool {
    if image.contains("://") || image.starts_with("data:") {
        return true;
    }
    dir.join(image).is_file() || root.join(image).is_file()
}

fn chapter_file_names(dir: &Path, order_file: &str) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(".json") && name != order_file)
        .collect();
    names.sort();
    names
}

fn stem(file: &str) -> String {
    crate::chapter_key::file_stem(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::NewSection;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Workspace) {
        let temp = TempDir::new().unwrap();
        let mut ws = Workspace::open(temp.path()).unwrap();
        ws.add_section(NewSection {
            id: "java".to_string(),
            name: "Java".to_string(),
            ..Default::default()
        })
        .unwrap();
        (temp, ws)
    }

    #[test]
    fn test_stats_reports_counts_and_errors() {
        let (temp, ws) = setup();
        let dir = temp.path().join("data/java");
        fs::write(dir.join("chapter1.json"), r#"{"title": "Intro", "questions": [{}, {}]}"#)
            .unwrap();
        fs::write(dir.join("chapter2.json"), r#"[{"totalQuestions": 5}]"#).unwrap();
        fs::write(dir.join("chapter3.json"), "nope").unwrap();

        let report = stats(&ws, Some("java")).unwrap();
        let section = &report[0];
        assert_eq!(section.chapters.len(), 3);
        assert_eq!(section.chapters[0].title, "Intro");
        assert_eq!(section.chapters[1].title, "chapter2");
        assert_eq!(section.readable(), 2);
        assert_eq!(section.total_questions(), 7);
        assert!(section.chapters[2].questions.is_err());
    }

    #[test]
    fn test_stats_unknown_section() {
        let (_temp, ws) = setup();
        assert!(stats(&ws, Some("nope")).is_err());
    }

    #[test]
    fn test_validate_clean_section() {
        let (temp, ws) = setup();
        let dir = temp.path().join("data/java");
        fs::write(
            dir.join("chapter1.json"),
            r#"{"questions": [{"text": "Q", "correctAnswer": "A", "choices": [{"value": "A"}]}]}"#,
        )
        .unwrap();
        ws.reconcile_section("java").unwrap();

        assert!(validate(&ws).is_empty());
    }

    #[test]
    fn test_validate_finds_drift_and_content_problems() {
        let (temp, ws) = setup();
        let dir = temp.path().join("data/java");
        fs::write(
            dir.join("chapters.json"),
            r#"[{"id": "1", "name": "A", "file": "chapter1.json"},
                {"id": "1", "name": "B", "file": "gone.json"}]"#,
        )
        .unwrap();
        fs::write(
            dir.join("chapter1.json"),
            r#"{"questions": [{"number": "1.1", "text": "Q", "image": "img/q.png",
                "correctAnswer": "B", "choices": [{"value": "A"}]}]}"#,
        )
        .unwrap();
        fs::write(dir.join("chapter2.json"), "{}").unwrap();

        let issues = validate(&ws);
        assert!(issues.contains(&ValidationIssue::StaleEntry {
            section: "java".to_string(),
            file: "gone.json".to_string()
        }));
        assert!(issues.contains(&ValidationIssue::UnlistedFile {
            section: "java".to_string(),
            file: "chapter2.json".to_string()
        }));
        assert!(issues.iter().any(|i| matches!(i, ValidationIssue::DuplicateChapterId { .. })));
        assert!(issues.iter().any(|i| matches!(i, ValidationIssue::MissingImage { .. })));
        assert!(issues.iter().any(
            |i| matches!(i, ValidationIssue::InvalidQuestion { question, .. } if question == "1.1")
        ));
    }

    #[test]
    fn test_validate_reports_undecodable_question() {
        let (temp, ws) = setup();
        let dir = temp.path().join("data/java");
        fs::write(
            dir.join("chapter1.json"),
            r#"{"questions": [{"number": "2.4", "text": "Q", "inputType": "text"}]}"#,
        )
        .unwrap();
        ws.reconcile_section("java").unwrap();

        let issues = validate(&ws);
        assert!(issues.iter().any(
            |i| matches!(i, ValidationIssue::InvalidQuestion { question, .. } if question == "2.4")
        ));
    }

    #[test]
    fn test_validate_missing_section_dir() {
        let (temp, ws) = setup();
        fs::remove_dir_all(temp.path().join("data/java")).unwrap();
        let issues = validate(&ws);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }
}
