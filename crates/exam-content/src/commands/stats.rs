//! Chapter detection report

use anyhow::Result;
use colored::*;
use exam_content::theme;
use exam_content::workspace::Workspace;

pub fn show_stats(workspace: &Workspace, section: Option<&str>) -> Result<()> {
    let report = workspace.stats(section)?;

    for section in &report {
        println!("\n{}\n", format!("Chapter detection: {}", section.section_id).bold());

        for chapter in &section.chapters {
            match &chapter.questions {
                Ok(count) => println!(
                    "{} {:20} | {:50} | {} questions",
                    theme::success_symbol().green(),
                    chapter.file,
                    chapter.title,
                    count
                ),
                Err(e) => println!(
                    "{} {:20} | {}",
                    theme::error_symbol().red(),
                    chapter.file,
                    format!("Error: {}", e).red()
                ),
            }
        }

        println!("\n{}", "=".repeat(90));
        println!(
            "Total: {} chapters | {} questions",
            section.readable(),
            section.total_questions()
        );
        println!("{}", "=".repeat(90));
    }

    Ok(())
}
