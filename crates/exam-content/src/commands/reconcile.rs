//! Reconcile command implementation

use anyhow::Result;
use colored::*;
use exam_content::reconcile::Reconciliation;
use exam_content::theme;
use exam_content::workspace::Workspace;

/// Reconcile one section, or all of them
pub fn reconcile_sections(workspace: &Workspace, section: Option<&str>) -> Result<()> {
    println!("\n{}\n", "Reconciling chapters...".bold());

    let results = match section {
        Some(id) => vec![(id.to_string(), workspace.reconcile_section(id)?)],
        None => workspace.reconcile_all()?,
    };

    for (id, result) in &results {
        report(id, result);
    }

    Ok(())
}

/// Print one section's reconciliation outcome
pub fn report(id: &str, result: &Reconciliation) {
    if !result.persisted {
        println!(
            "{} {} {}",
            theme::warning_symbol().yellow(),
            id.bold(),
            theme::warning("directory does not exist, nothing written")
        );
        return;
    }

    println!(
        "{} {} ({} chapters)",
        theme::success_symbol().green().bold(),
        id.bold(),
        result.chapters.len()
    );

    for file in &result.added {
        println!("  {} {}", "+".green(), file);
    }
    for file in &result.refreshed {
        println!("  {} {} (count refreshed)", "~".yellow(), file);
    }
    for file in &result.stale {
        println!("  {} {} (listed but missing)", "-".red(), file);
    }
    for error in &result.errors {
        println!("  {} {}", theme::error_symbol().red(), error);
    }
}
