//! Content root controller
//!
//! A `Workspace` owns the settings and the section registry of one content
//! root. Every editing operation goes through it; nothing is global.

use crate::config::Settings;
use crate::constants::NEW_CHAPTER_NAME;
use crate::engine_config::{build_global_config, write_global_config, GeneratedConfig};
use crate::errors::ContentError;
use crate::fsutil::remove_dir_if_exists;
use crate::ident::{sanitize_id, title_from_id};
use crate::import::{ensure_disjoint, import_into, BundleSource};
use crate::inspect::{self, SectionStats, ValidationIssue};
use crate::model::{ChapterDocument, ChapterParams, ChapterSummary, Section};
use crate::order::OrderFile;
use crate::reconcile::{reconcile, Reconciliation};
use crate::registry::SectionRegistry;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Input for creating a section
#[derive(Debug, Clone, Default)]
pub struct NewSection {
    pub id: String,
    pub name: String,
    /// Directory relative to the root; defaults to the section prefix plus the id
    pub path: Option<String>,
    pub description: String,
}

/// Edits applied to one chapter summary; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct ChapterUpdate {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Raw count as typed; anything that is not a non-negative integer becomes 0
    pub count: Option<String>,
}

/// What an import did
#[derive(Debug)]
pub struct ImportOutcome {
    pub section_id: String,
    pub destination: PathBuf,
    pub files: usize,
    /// The section was added to the registry by this import
    pub registered: bool,
    pub reconciliation: Reconciliation,
}

/// Where the generated configuration went and what it contains
#[derive(Debug)]
pub struct ConfigureOutcome {
    pub path: PathBuf,
    pub config: GeneratedConfig,
}

pub struct Workspace {
    root: PathBuf,
    settings: Settings,
    registry: SectionRegistry,
    diagnostics: Vec<String>,
}

impl Workspace {
    /// Open a content root, loading `.exed/config.toml` and the section registry
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let settings = Settings::load(root.as_ref())?;
        Ok(Self::with_settings(root, settings))
    }

    pub fn with_settings(root: impl AsRef<Path>, settings: Settings) -> Self {
        let root = root.as_ref().to_path_buf();
        let (registry, diagnostic) = SectionRegistry::load(root.join(&settings.registry_file));
        Self { root, settings, registry, diagnostics: diagnostic.into_iter().collect() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Problems found while loading, such as a malformed registry
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(&self.settings.registry_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.settings.output_file)
    }

    pub fn sections(&self) -> &[Section] {
        self.registry.sections()
    }

    pub fn section(&self, id: &str) -> Result<&Section> {
        self.registry.get(id).ok_or_else(|| ContentError::SectionNotFound(id.to_string()).into())
    }

    pub fn section_dir(&self, section: &Section) -> PathBuf {
        self.root.join(section.relative_dir(&self.settings.section_prefix))
    }

    fn order_file(&self, section: &Section) -> OrderFile {
        OrderFile::new(self.section_dir(section), &self.settings.order_file)
    }

    /// Register a new section and create its directory and empty order file
    pub fn add_section(&mut self, new: NewSection) -> Result<Section> {
        let id = new.id.trim().to_string();
        let name = new.name.trim().to_string();
        if id.is_empty() {
            return Err(ContentError::MissingField("id").into());
        }
        if name.is_empty() {
            return Err(ContentError::MissingField("name").into());
        }
        if self.registry.contains(&id) {
            return Err(ContentError::DuplicateSection(id).into());
        }

        let path = new
            .path
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| format!("{}{}", self.settings.section_prefix, id));
        let section = Section { id, name, path, description: new.description };

        let dir = self.section_dir(&section);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        let order = self.order_file(&section);
        if !order.exists() {
            order.save(&[])?;
        }

        self.registry.push(section.clone());
        self.registry.save(self.registry_path())?;
        Ok(section)
    }

    /// Unregister a section; with `purge` its directory is deleted as well
    pub fn remove_section(&mut self, id: &str, purge: bool) -> Result<Section> {
        let section = self.section(id)?.clone();
        let relative_dir = section.relative_dir(&self.settings.section_prefix);
        if purge && !is_contained_path(&relative_dir) {
            bail!("Refusing to delete '{}': path is outside the content root", relative_dir);
        }

        // The registry is saved first so a failed save leaves the data in place
        let mut registry = self.registry.clone();
        registry.remove(id);
        registry.save(self.registry_path())?;
        self.registry = registry;

        if purge {
            remove_dir_if_exists(self.section_dir(&section))?;
        }
        Ok(section)
    }

    /// The section's order file contents, plus a diagnostic when it is unreadable
    pub fn chapters(&self, section_id: &str) -> Result<(Vec<ChapterSummary>, Option<String>)> {
        let section = self.section(section_id)?;
        Ok(self.order_file(section).load_or_default())
    }

    /// Order file contents for an edit; an unreadable file is an error here so
    /// the edit cannot overwrite it
    fn chapters_for_edit(&self, section: &Section) -> Result<Vec<ChapterSummary>> {
        let (chapters, diagnostic) = self.order_file(section).load_or_default();
        if let Some(message) = diagnostic {
            bail!("{} (run reconcile to rebuild it)", message);
        }
        Ok(chapters)
    }

    /// Append a placeholder chapter and create its file when missing
    pub fn add_chapter(&mut self, section_id: &str) -> Result<ChapterSummary> {
        let section = self.section(section_id)?.clone();
        let mut chapters = self.chapters_for_edit(&section)?;

        let mut number = chapters.len() + 1;
        while chapters.iter().any(|c| {
            c.id == number.to_string() || c.file == format!("chapter{}.json", number)
        }) {
            number += 1;
        }
        let summary = ChapterSummary::new(
            number.to_string(),
            NEW_CHAPTER_NAME,
            0,
            format!("chapter{}.json", number),
        );

        let path = self.section_dir(&section).join(&summary.file);
        if !path.exists() {
            skeleton_document(number).save(&path)?;
        }

        chapters.push(summary.clone());
        self.order_file(&section).save(&chapters)?;
        Ok(summary)
    }

    pub fn update_chapter(
        &mut self,
        section_id: &str,
        chapter_id: &str,
        update: ChapterUpdate,
    ) -> Result<ChapterSummary> {
        let section = self.section(section_id)?.clone();
        let mut chapters = self.chapters_for_edit(&section)?;
        let index = find_chapter(&chapters, section_id, chapter_id)?;

        let chapter = &mut chapters[index];
        if let Some(id) = update.id {
            chapter.id = id;
        }
        if let Some(name) = update.name {
            chapter.name = name;
        }
        if let Some(count) = update.count {
            chapter.q = Some(count.trim().parse().unwrap_or(0));
        }
        let updated = chapter.clone();

        self.order_file(&section).save(&chapters)?;
        Ok(updated)
    }

    /// Drop a chapter from the order file; its file stays on disk
    pub fn remove_chapter(&mut self, section_id: &str, chapter_id: &str) -> Result<ChapterSummary> {
        let section = self.section(section_id)?.clone();
        let mut chapters = self.chapters_for_edit(&section)?;
        let index = find_chapter(&chapters, section_id, chapter_id)?;

        let removed = chapters.remove(index);
        self.order_file(&section).save(&chapters)?;
        Ok(removed)
    }

    /// Move a chapter to a 1-based position
    pub fn move_chapter(
        &mut self,
        section_id: &str,
        chapter_id: &str,
        position: usize,
    ) -> Result<Vec<ChapterSummary>> {
        let section = self.section(section_id)?.clone();
        let mut chapters = self.chapters_for_edit(&section)?;
        let index = find_chapter(&chapters, section_id, chapter_id)?;

        if position == 0 || position > chapters.len() {
            return Err(ContentError::InvalidPosition { position, len: chapters.len() }.into());
        }

        let chapter = chapters.remove(index);
        chapters.insert(position - 1, chapter);
        self.order_file(&section).save(&chapters)?;
        Ok(chapters)
    }

    pub fn reconcile_section(&self, section_id: &str) -> Result<Reconciliation> {
        let section = self.section(section_id)?;
        reconcile(self.section_dir(section), &self.settings.order_file)
            .with_context(|| format!("Failed to reconcile section '{}'", section_id))
    }

    pub fn reconcile_all(&self) -> Result<Vec<(String, Reconciliation)>> {
        let mut results = Vec::with_capacity(self.sections().len());
        for section in self.sections() {
            results.push((section.id.clone(), self.reconcile_section(&section.id)?));
        }
        Ok(results)
    }

    /// Reconcile every section and regenerate the engine configuration
    pub fn configure(&self) -> Result<ConfigureOutcome> {
        let config = build_global_config(&self.root, self.sections(), &self.settings)?;
        let rendered = config.render(&self.settings.config_variable)?;
        let path = self.output_path();
        write_global_config(&path, &rendered)?;
        Ok(ConfigureOutcome { path, config })
    }

    /// Import a directory or archive as a whole section
    ///
    /// The destination directory is replaced wholesale. The section is
    /// registered when new, then reconciled.
    pub fn import_section(
        &mut self,
        source: impl AsRef<Path>,
        id: Option<&str>,
    ) -> Result<ImportOutcome> {
        let source = BundleSource::detect(source)?;
        let section_id = sanitize_id(id.unwrap_or(&source.name()));

        let (destination, registered) = match self.registry.get(&section_id) {
            Some(existing) => (self.section_dir(existing), false),
            None => (self.root.join(&self.settings.data_dir).join(&section_id), true),
        };

        ensure_disjoint(&source, &destination)?;
        remove_dir_if_exists(&destination)?;
        let files = import_into(&source, &destination)?;

        if registered {
            self.registry.push(Section {
                id: section_id.clone(),
                name: title_from_id(&section_id),
                path: relative_path_string(&self.settings.data_dir, &section_id),
                description: String::new(),
            });
            self.registry.save(self.registry_path())?;
        }

        let reconciliation = self.reconcile_section(&section_id)?;
        Ok(ImportOutcome { section_id, destination, files, registered, reconciliation })
    }

    /// Import chapter files into an existing section, then reconcile it
    pub fn import_chapters(
        &mut self,
        section_id: &str,
        source: impl AsRef<Path>,
    ) -> Result<ImportOutcome> {
        let source = BundleSource::detect(source)?;
        let destination = self.section_dir(self.section(section_id)?);

        let files = import_into(&source, &destination)?;
        let reconciliation = self.reconcile_section(section_id)?;

        Ok(ImportOutcome {
            section_id: section_id.to_string(),
            destination,
            files,
            registered: false,
            reconciliation,
        })
    }

    /// Chapter detection report for one section, or all of them
    pub fn stats(&self, section_id: Option<&str>) -> Result<Vec<SectionStats>> {
        inspect::stats(self, section_id)
    }

    pub fn validate(&self) -> Vec<ValidationIssue> {
        inspect::validate(self)
    }
}

fn find_chapter(chapters: &[ChapterSummary], section: &str, chapter: &str) -> Result<usize> {
    chapters.iter().position(|c| c.id == chapter).ok_or_else(|| {
        ContentError::ChapterNotFound { section: section.to_string(), chapter: chapter.to_string() }
            .into()
    })
}

fn skeleton_document(number: usize) -> ChapterDocument {
    ChapterDocument {
        title: Some(format!("Chapter {} {}", number, NEW_CHAPTER_NAME)),
        params: Some(ChapterParams { chapter: Some(Value::from(number)), ..Default::default() }),
        ..Default::default()
    }
}

/// Relative path made only of normal components
fn is_contained_path(path: &str) -> bool {
    let path = Path::new(path);
    path.components().any(|c| matches!(c, Component::Normal(_)))
        && path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// `data_dir/id` with forward slashes, as stored in the registry
fn relative_path_string(data_dir: &Path, id: &str) -> String {
    let base = data_dir.to_string_lossy().replace('\\', "/");
    let base = base.trim_end_matches('/');
    if base.is_empty() || base == "." {
        id.to_string()
    } else {
        format!("{}/{}", base, id)
    }
}
