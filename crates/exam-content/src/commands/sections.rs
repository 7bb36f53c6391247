//! Section commands

use anyhow::Result;
use colored::*;
use exam_content::prompt::prompt_confirm;
use exam_content::theme;
use exam_content::workspace::{NewSection, Workspace};

pub fn list_sections(workspace: &Workspace, verbose: bool) -> Result<()> {
    println!("\n{}", "Sections".bold().underline());
    println!();

    if workspace.sections().is_empty() {
        println!("  No sections registered. Add one with 'exed sections add <id> <name>'.");
        println!();
        return Ok(());
    }

    for section in workspace.sections() {
        println!("{} {}", section.id.bold(), section.name);
        if verbose {
            let (chapters, _) = workspace.chapters(&section.id)?;
            let questions: u64 = chapters.iter().filter_map(|c| c.q).sum();
            println!("  Path: {}", workspace.section_dir(section).display());
            if !section.description.is_empty() {
                println!("  Description: {}", section.description);
            }
            println!("  Chapters: {} | Questions: {}", chapters.len(), questions);
            println!();
        }
    }

    if !verbose {
        println!();
    }
    println!("Total: {} section(s)", workspace.sections().len());

    Ok(())
}

pub fn add_section(
    workspace: &mut Workspace,
    id: String,
    name: String,
    path: Option<String>,
    description: String,
) -> Result<()> {
    let section = workspace.add_section(NewSection { id, name, path, description })?;

    println!(
        "{} {} {} ({})",
        theme::success_symbol().green().bold(),
        "Added section".green(),
        section.id.bold(),
        section.path
    );
    Ok(())
}

pub fn remove_section(workspace: &mut Workspace, id: &str, purge: bool, yes: bool) -> Result<()> {
    let section = workspace.section(id)?;

    if purge && !yes {
        let dir = workspace.section_dir(section);
        let message = format!("Delete section '{}' and everything in {}?", id, dir.display());
        if !prompt_confirm(&message, false)? {
            println!("{}", theme::info("Cancelled"));
            return Ok(());
        }
    }

    let removed = workspace.remove_section(id, purge)?;
    let action = if purge { "Removed and deleted section" } else { "Removed section" };
    println!("{} {} {}", theme::success_symbol().green().bold(), action.green(), removed.id.bold());
    if !purge {
        println!("  {} Files in {} were kept", theme::info_symbol().cyan(), removed.path);
    }
    Ok(())
}
