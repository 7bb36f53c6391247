//! Validate command implementation

use anyhow::Result;
use colored::*;
use exam_content::workspace::Workspace;

pub fn validate_content(workspace: &Workspace) -> Result<()> {
    println!("\n{}\n", "Validating content...".bold());

    let issues = workspace.validate();
    if issues.is_empty() {
        println!("{} All sections are valid\n", "✓".green().bold());
        return Ok(());
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;

    for issue in &issues {
        let badge = if issue.is_error() {
            issue.severity().red().bold()
        } else {
            issue.severity().yellow().bold()
        };
        println!("  {} {}", badge, issue.description());
    }

    println!();
    println!("Found {} error(s) and {} warning(s)", errors, warnings);

    if errors > 0 {
        anyhow::bail!("Validation failed with {} error(s)", errors);
    }
    Ok(())
}
