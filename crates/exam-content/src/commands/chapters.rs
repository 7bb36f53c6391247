//! Chapter list commands

use anyhow::Result;
use colored::*;
use exam_content::errors::print_warning;
use exam_content::theme;
use exam_content::workspace::{ChapterUpdate, Workspace};

pub fn list_chapters(workspace: &Workspace, section_id: &str) -> Result<()> {
    let section = workspace.section(section_id)?;
    let (chapters, diagnostic) = workspace.chapters(section_id)?;
    if let Some(message) = diagnostic {
        print_warning(&message);
    }

    println!("\n{}", format!("{} Chapters", section.name).bold().underline());
    println!();

    for chapter in &chapters {
        println!(
            "{}  {}  {}  {}",
            theme::chapter_id(&chapter.id),
            theme::question_count(chapter.q),
            chapter.name,
            chapter.file.dimmed()
        );
    }

    println!();
    println!(
        "Total: {} chapter(s), {} question(s)",
        chapters.len(),
        chapters.iter().filter_map(|c| c.q).sum::<u64>()
    );
    Ok(())
}

pub fn add_chapter(workspace: &mut Workspace, section_id: &str) -> Result<()> {
    let chapter = workspace.add_chapter(section_id)?;
    println!(
        "{} {} {} ({})",
        theme::success_symbol().green().bold(),
        "Added chapter".green(),
        chapter.id.bold(),
        chapter.file
    );
    Ok(())
}

pub fn update_chapter(
    workspace: &mut Workspace,
    section_id: &str,
    chapter_id: &str,
    id: Option<String>,
    name: Option<String>,
    count: Option<String>,
) -> Result<()> {
    if id.is_none() && name.is_none() && count.is_none() {
        println!("{}", theme::warning("Nothing to update (use --id, --name or --count)"));
        return Ok(());
    }

    let update = ChapterUpdate { id, name, count };
    let chapter = workspace.update_chapter(section_id, chapter_id, update)?;
    println!(
        "{} {} {} {} ({} questions)",
        theme::success_symbol().green().bold(),
        "Updated chapter".green(),
        chapter.id.bold(),
        chapter.name,
        chapter.q.unwrap_or(0)
    );
    Ok(())
}

pub fn remove_chapter(workspace: &mut Workspace, section_id: &str, chapter_id: &str) -> Result<()> {
    let chapter = workspace.remove_chapter(section_id, chapter_id)?;
    println!(
        "{} {} {}",
        theme::success_symbol().green().bold(),
        "Removed chapter".green(),
        chapter.id.bold()
    );
    println!("  {} {} was kept on disk", theme::info_symbol().cyan(), chapter.file);
    Ok(())
}

pub fn move_chapter(
    workspace: &mut Workspace,
    section_id: &str,
    chapter_id: &str,
    position: usize,
) -> Result<()> {
    let chapters = workspace.move_chapter(section_id, chapter_id, position)?;
    println!(
        "{} {} {} to position {}",
        theme::success_symbol().green().bold(),
        "Moved chapter".green(),
        chapter_id.bold(),
        position
    );
    let order: Vec<&str> = chapters.iter().map(|c| c.id.as_str()).collect();
    println!("  Order: {}", order.join(", "));
    Ok(())
}
