//! Constants used throughout the exam-content crate

/// The name of the per-section file holding the ordered chapter summaries
pub const ORDER_FILENAME: &str = "chapters.json";

/// Section registry, relative to the content root
pub const REGISTRY_PATH: &str = "config/sections.json";

/// Generated engine configuration, relative to the content root
pub const OUTPUT_PATH: &str = "js/exam-config.js";

/// Name of the constant assigned in the generated configuration
pub const CONFIG_VARIABLE: &str = "EXAM_CONFIG";

/// Directory holding section data, relative to the content root
pub const DATA_DIR: &str = "data";

/// Prefix prepended to a new section's id to form its path
pub const SECTION_PREFIX: &str = "data/";

/// Tool configuration directory, relative to the content root
pub const TOOL_DIR: &str = ".exed";

/// Display name given to chapters created from the editor
pub const NEW_CHAPTER_NAME: &str = "New Chapter";
