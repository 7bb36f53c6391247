use crate::constants::{
    CONFIG_VARIABLE, DATA_DIR, ORDER_FILENAME, OUTPUT_PATH, REGISTRY_PATH, SECTION_PREFIX,
    TOOL_DIR,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tool settings with layered defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Directory holding section directories, relative to the root
    pub data_dir: PathBuf,

    /// Section registry file, relative to the root
    pub registry_file: PathBuf,

    /// Per-section order file name
    pub order_file: String,

    /// Generated engine configuration, relative to the root
    pub output_file: PathBuf,

    /// Constant name assigned in the generated configuration
    pub config_variable: String,

    /// Prefix used to derive a new section's path from its id
    pub section_prefix: String,

    /// Delay before markup is re-highlighted after an edit
    pub highlight_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            registry_file: PathBuf::from(REGISTRY_PATH),
            order_file: ORDER_FILENAME.to_string(),
            output_file: PathBuf::from(OUTPUT_PATH),
            config_variable: CONFIG_VARIABLE.to_string(),
            section_prefix: SECTION_PREFIX.to_string(),
            highlight_debounce_ms: 250,
        }
    }
}

impl Settings {
    /// Load settings for a content root, merging `.exed/config.toml` over the defaults
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(file_settings) = Self::load_from_file(root.as_ref())? {
            settings.merge(file_settings);
        }

        Ok(settings)
    }

    fn load_from_file(root: &Path) -> Result<Option<PartialSettings>> {
        let config_path = root.join(TOOL_DIR).join("config.toml");
        if !config_path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let partial: PartialSettings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(partial))
    }

    /// Merge partial settings into these (partial takes precedence for specified fields)
    fn merge(&mut self, other: PartialSettings) {
        if let Some(val) = other.data_dir {
            self.data_dir = val;
        }
        if let Some(val) = other.registry_file {
            self.registry_file = val;
        }
        if let Some(val) = other.order_file {
            self.order_file = val;
        }
        if let Some(val) = other.output_file {
            self.output_file = val;
        }
        if let Some(val) = other.config_variable {
            self.config_variable = val;
        }
        if let Some(val) = other.section_prefix {
            self.section_prefix = val;
        }
        if let Some(val) = other.highlight_debounce_ms {
            self.highlight_debounce_ms = val;
        }
    }

    pub fn highlight_debounce(&self) -> Duration {
        Duration::from_millis(self.highlight_debounce_ms)
    }
}

/// Partial settings for deserializing from TOML with optional fields
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialSettings {
    data_dir: Option<PathBuf>,
    registry_file: Option<PathBuf>,
    order_file: Option<String>,
    output_file: Option<PathBuf>,
    config_variable: Option<String>,
    section_prefix: Option<String>,
    highlight_debounce_ms: Option<u64>,
}
