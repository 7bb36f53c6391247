//! Exam content editor CLI

use anyhow::Result;
use clap::Parser;
use exam_content::workspace::Workspace;

mod cli;
mod commands;

use cli::{ChapterCommands, Cli, Commands, ImportCommands, SectionCommands};
use commands::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Markup commands do not need a content root
    let result = match &cli.command {
        Commands::Preview { text, file } => Some(preview_markup(text.as_deref(), file.as_deref())),
        Commands::Highlight { text, file, watch } => {
            Some(highlight_markup(text.as_deref(), file.as_deref(), *watch, &cli.root))
        }
        _ => None,
    };
    if let Some(result) = result {
        return finish(result);
    }

    let mut workspace = match Workspace::open(&cli.root) {
        Ok(ws) => ws,
        Err(e) => {
            exam_content::errors::print_error_with_suggestion(
                "Failed to open content root",
                &e,
                &format!("Check '{}/.exed/config.toml'", cli.root),
            );
            std::process::exit(1);
        }
    };
    exam_content::errors::print_diagnostics(workspace.diagnostics());

    let result = match cli.command {
        Commands::Sections(cmd) => match cmd {
            SectionCommands::List { verbose } => list_sections(&workspace, verbose),
            SectionCommands::Add { id, name, path, description } => {
                add_section(&mut workspace, id, name, path, description)
            }
            SectionCommands::Remove { id, purge, yes } => {
                remove_section(&mut workspace, &id, purge, yes)
            }
        },
        Commands::Chapters(cmd) => match cmd {
            ChapterCommands::List { section } => list_chapters(&workspace, &section),
            ChapterCommands::Add { section } => add_chapter(&mut workspace, &section),
            ChapterCommands::Update { section, chapter, id, name, count } => {
                update_chapter(&mut workspace, &section, &chapter, id, name, count)
            }
            ChapterCommands::Remove { section, chapter } => {
                remove_chapter(&mut workspace, &section, &chapter)
            }
            ChapterCommands::Move { section, chapter, position } => {
                move_chapter(&mut workspace, &section, &chapter, position)
            }
        },
        Commands::Reconcile { section } => reconcile_sections(&workspace, section.as_deref()),
        Commands::Configure => configure_engine(&workspace),
        Commands::Import(cmd) => match cmd {
            ImportCommands::Section { source, id } => {
                import_section(&mut workspace, &source, id.as_deref())
            }
            ImportCommands::Chapters { section, source } => {
                import_chapters(&mut workspace, &section, &source)
            }
        },
        Commands::Stats { section } => show_stats(&workspace, section.as_deref()),
        Commands::Validate => validate_content(&workspace),
        Commands::Preview { .. } | Commands::Highlight { .. } => Ok(()),
    };

    finish(result)
}

fn finish(result: Result<()>) -> Result<()> {
    if let Err(e) = result {
        exam_content::errors::print_error("Command failed", &e);
        std::process::exit(1);
    }
    Ok(())
}
