// Test infrastructure and utilities for exam-content tests
#![allow(dead_code)]

use exam_content::model::Section;
use exam_content::registry::SectionRegistry;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A chapter document with `count` minimal questions
pub fn chapter_json(title: Option<&str>, count: usize) -> String {
    let questions: Vec<String> = (1..=count)
        .map(|n| {
            format!(
                r#"{{"id": "q{n}", "text": "Question {n}", "correctAnswer": "A", "choices": [{{"value": "A", "text": "yes"}}]}}"#
            )
        })
        .collect();

    match title {
        Some(title) => format!(r#"{{"title": "{}", "questions": [{}]}}"#, title, questions.join(", ")),
        None => format!(r#"{{"questions": [{}]}}"#, questions.join(", ")),
    }
}

/// Content root laid out the way the exam web application expects
pub struct TestContent {
    pub root: TempDir,
}

impl TestContent {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self { root: TempDir::new()? })
    }

    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    pub fn section_dir(&self, id: &str) -> PathBuf {
        self.root.path().join("data").join(id)
    }

    /// Register sections directly in `config/sections.json`
    pub fn register(&self, ids: &[&str]) -> std::io::Result<()> {
        let sections = ids
            .iter()
            .map(|id| Section {
                id: id.to_string(),
                name: id.to_uppercase(),
                path: format!("data/{}", id),
                description: format!("{} course", id),
            })
            .collect();
        SectionRegistry::new(sections)
            .save(self.root.path().join("config/sections.json"))
            .map_err(std::io::Error::other)
    }

    /// Write a file inside a section directory, creating the directory
    pub fn write(&self, section: &str, file: &str, content: &str) -> std::io::Result<PathBuf> {
        let dir = self.section_dir(section);
        fs::create_dir_all(&dir)?;
        let path = dir.join(file);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read(&self, relative: &str) -> std::io::Result<String> {
        fs::read_to_string(self.root.path().join(relative))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.root.path().join(relative).exists()
    }
}
