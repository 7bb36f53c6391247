//! Exam content management library
//!
//! This library manages the sections and chapters of a quiz content tree:
//! it keeps per-section chapter order files in step with the chapter files
//! on disk, imports content bundles and generates the configuration script
//! consumed by the exam web application.

pub mod chapter_key;
pub mod config;
pub mod constants;
pub mod engine_config;
pub mod errors;
pub mod fsutil;
pub mod ident;
pub mod import;
pub mod inspect;
pub mod model;
pub mod order;
pub mod prompt;
pub mod reconcile;
pub mod registry;
pub mod theme;
pub mod workspace;

pub use chapter_key::{number_from_filename, ChapterKey, ChapterOrder};
pub use config::Settings;
pub use engine_config::{
    build_global_config, write_global_config, GeneratedConfig, GeneratedSection,
};
pub use errors::ContentError;
pub use import::{import_into, BundleSource};
pub use model::{
    ChapterDocument, ChapterSummary, Choice, CorrectAnswer, InputType, Question, Section,
};
pub use order::OrderFile;
pub use reconcile::{reconcile, Reconciliation};
pub use registry::SectionRegistry;
pub use workspace::{ChapterUpdate, NewSection, Workspace};

/// Re-export common error types
pub use anyhow::{Error, Result};
