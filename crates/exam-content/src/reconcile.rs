//! Chapter reconciliation
//!
//! Merges the chapter files present in a section directory with the section's
//! order file. Entries already listed keep their position and identity; only
//! their question count is refreshed. Files not yet listed are appended,
//! sorted by chapter number. The merged list is written back to the order
//! file.

use crate::chapter_key::{display_name, ChapterKey, ChapterOrder};
use crate::model::{ChapterDocument, ChapterSummary};
use crate::order::OrderFile;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of reconciling one section directory
#[derive(Debug, Default)]
pub struct Reconciliation {
    /// The merged chapter list, as persisted
    pub chapters: Vec<ChapterSummary>,
    /// Files appended as new entries
    pub added: Vec<String>,
    /// Listed files whose question count changed
    pub refreshed: Vec<String>,
    /// New files that could not be read or parsed
    pub skipped: Vec<String>,
    /// Listed files that no longer exist on disk
    pub stale: Vec<String>,
    /// Diagnostics for everything that was ignored
    pub errors: Vec<String>,
    /// Whether the order file was written
    pub persisted: bool,
}

impl Reconciliation {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.refreshed.is_empty()
    }
}

/// Reconcile a section directory with its order file
pub fn reconcile(section_dir: impl AsRef<Path>, order_file_name: &str) -> Result<Reconciliation> {
    let section_dir = section_dir.as_ref();
    let order = OrderFile::new(section_dir, order_file_name);
    let mut result = Reconciliation::default();

    let (mut chapters, diagnostic) = order.load_or_default();
    result.errors.extend(diagnostic);

    if !section_dir.is_dir() {
        result.stale = chapters.iter().map(|c| c.file.clone()).collect();
        result.chapters = chapters;
        return Ok(result);
    }

    let files = chapter_files(section_dir, order_file_name)?;
    let on_disk: HashSet<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
    let listed: HashSet<String> = chapters.iter().map(|c| c.file.clone()).collect();

    for chapter in chapters.iter_mut() {
        if !on_disk.contains(chapter.file.as_str()) {
            result.stale.push(chapter.file.clone());
            continue;
        }

        match ChapterDocument::load(section_dir.join(&chapter.file)) {
            Ok(doc) => {
                let q = Some(doc.question_count().unwrap_or(0));
                if chapter.q != q {
                    result.refreshed.push(chapter.file.clone());
                    chapter.q = q;
                }
            }
            Err(e) => result.errors.push(format!("Keeping count for {}: {:#}", chapter.file, e)),
        }
    }

    let mut new_entries: Vec<(ChapterOrder, ChapterSummary)> = Vec::new();
    for (name, path) in &files {
        if listed.contains(name) {
            continue;
        }

        let doc = match ChapterDocument::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                result.skipped.push(name.clone());
                result.errors.push(format!("Skipping {}: {:#}", name, e));
                continue;
            }
        };

        let key = ChapterKey::resolve(name, &doc);
        let summary = ChapterSummary::new(
            key.id.clone(),
            display_name(doc.title(), &key.id, name),
            doc.question_count().unwrap_or(0),
            name.clone(),
        );
        new_entries.push((key.order, summary));
    }

    // Stable sort: equal orders keep filename order
    new_entries.sort_by_key(|(order, _)| *order);
    for (_, summary) in new_entries {
        result.added.push(summary.file.clone());
        chapters.push(summary);
    }

    order.save(&chapters)?;
    result.persisted = true;
    result.chapters = chapters;

    Ok(result)
}

/// `*.json` files directly inside `dir`, sorted by name, excluding the order file
fn chapter_files(dir: &Path, order_file_name: &str) -> Result<Vec<(String, PathBuf)>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read directory {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name != order_file_name {
            files.push((name, path));
        }
    }

    files.sort();
    Ok(files)
}
