//! Configure command implementation

use anyhow::Result;
use colored::*;
use exam_content::theme;
use exam_content::workspace::Workspace;

/// Reconcile all sections and write the engine configuration
pub fn configure_engine(workspace: &Workspace) -> Result<()> {
    let outcome = workspace.configure()?;

    for (id, result) in &outcome.config.reconciled {
        if result.has_changes() {
            crate::commands::reconcile::report(id, result);
        }
    }
    for error in &outcome.config.errors {
        println!("  {} {}", theme::error_symbol().red(), error);
    }

    let display_path = outcome.path.strip_prefix(workspace.root()).unwrap_or(&outcome.path);
    println!(
        "{} {} {} ({} sections, {} chapters)",
        theme::success_symbol().green().bold(),
        "Engine configured:".green(),
        display_path.display().to_string().bold(),
        outcome.config.sections.len(),
        outcome.config.chapter_count()
    );
    Ok(())
}
