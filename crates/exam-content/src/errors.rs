//! Error types and error reporting utilities

use colored::*;
use thiserror::Error;

/// Domain errors raised before any filesystem mutation
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Section '{0}' already exists")]
    DuplicateSection(String),

    #[error("Section '{0}' not found")]
    SectionNotFound(String),

    #[error("Chapter '{chapter}' not found in section '{section}'")]
    ChapterNotFound { section: String, chapter: String },

    #[error("Position {position} is out of range (1-{len})")]
    InvalidPosition { position: usize, len: usize },

    #[error("Unsupported import source: {0}")]
    UnsupportedSource(String),

    #[error("Import source {path} overlaps destination {destination}")]
    OverlappingImport { path: String, destination: String },
}

/// Print a formatted error message
pub fn print_error(context: &str, error: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), context);
    eprintln!("  {}", error.to_string().red());

    // Show chain of causes
    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".dimmed(), cause.to_string().dimmed());
    }
}

/// Print an error with a suggestion
pub fn print_error_with_suggestion(context: &str, error: &anyhow::Error, suggestion: &str) {
    print_error(context, error);
    eprintln!("\n{} {}", "Suggestion:".cyan().bold(), suggestion);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

/// Print every diagnostic collected by a lenient operation
pub fn print_diagnostics(diagnostics: &[String]) {
    for message in diagnostics {
        print_warning(message);
    }
}
