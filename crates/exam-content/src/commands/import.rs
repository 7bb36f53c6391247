//! Import command implementations

use anyhow::Result;
use colored::*;
use exam_content::theme;
use exam_content::workspace::{ImportOutcome, Workspace};

pub fn import_section(workspace: &mut Workspace, source: &str, id: Option<&str>) -> Result<()> {
    let outcome = workspace.import_section(source, id)?;
    report(&outcome, "section");
    if outcome.registered {
        println!("  {} Registered new section {}", theme::info_symbol().cyan(), outcome.section_id);
    }
    Ok(())
}

pub fn import_chapters(workspace: &mut Workspace, section: &str, source: &str) -> Result<()> {
    let outcome = workspace.import_chapters(section, source)?;
    report(&outcome, "chapters");
    Ok(())
}

fn report(outcome: &ImportOutcome, what: &str) {
    println!(
        "{} {} {} into {} ({} files)",
        theme::success_symbol().green().bold(),
        "Imported".green(),
        what,
        outcome.destination.display().to_string().bold(),
        outcome.files
    );
    crate::commands::reconcile::report(&outcome.section_id, &outcome.reconciliation);
}
