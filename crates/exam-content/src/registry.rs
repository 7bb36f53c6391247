//! Section registry (`config/sections.json`)

use crate::fsutil::{read_json_lenient, write_json_pretty};
use crate::model::Section;
use anyhow::{Context, Result};
use std::path::Path;

/// Ordered list of sections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Load the registry; absence or a parse failure yields an empty registry
    pub fn load(path: impl AsRef<Path>) -> (Self, Option<String>) {
        let (sections, diagnostic) = read_json_lenient(path);
        (Self { sections }, diagnostic)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_json_pretty(path, &self.sections)
            .with_context(|| format!("Failed to save section registry {}", path.display()))
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Remove a section by id, returning it
    pub fn remove(&mut self, id: &str) -> Option<Section> {
        let index = self.sections.iter().position(|s| s.id == id)?;
        Some(self.sections.remove(index))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
