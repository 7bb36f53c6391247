//! CLI argument parsing

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "exed")]
#[command(about = "Exam content editor", long_about = None)]
#[command(after_help = "Use 'exed <command> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Content root holding config/, data/ and js/ (defaults to the current directory)
    #[arg(short, long, default_value = ".")]
    pub root: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage sections
    #[command(subcommand, visible_alias = "sec")]
    Sections(SectionCommands),

    /// Manage the chapter list of a section
    #[command(subcommand, visible_alias = "ch")]
    Chapters(ChapterCommands),

    /// Merge chapter files on disk into the order files
    #[command(visible_alias = "sync")]
    Reconcile {
        /// Section id (all sections when omitted)
        section: Option<String>,
    },

    /// Reconcile every section and regenerate the engine configuration
    #[command(visible_alias = "gen")]
    Configure,

    /// Import a directory, zip archive or chapter file
    #[command(subcommand)]
    Import(ImportCommands),

    /// Show detected chapter files and question counts
    Stats {
        /// Section id (all sections when omitted)
        section: Option<String>,
    },

    /// Check order files and chapter content for problems
    #[command(visible_alias = "check")]
    Validate,

    /// Render markup as plain text with styled ranges
    Preview {
        /// Markup text
        text: Option<String>,

        /// Read the markup from a file instead
        #[arg(short, long, conflicts_with = "text")]
        file: Option<String>,
    },

    /// Show the highlight ranges an editor would paint
    #[command(visible_alias = "hl")]
    Highlight {
        /// Markup text
        text: Option<String>,

        /// Read the markup from a file instead
        #[arg(short, long, conflicts_with = "text")]
        file: Option<String>,

        /// Keep running and re-highlight the file after each change settles
        #[arg(short, long, requires = "file")]
        watch: bool,
    },
}

#[derive(Subcommand)]
pub enum SectionCommands {
    /// List registered sections
    #[command(visible_alias = "ls")]
    List {
        /// Show paths, descriptions and chapter counts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Register a new section and create its directory
    Add {
        /// Unique section id
        id: String,

        /// Display name
        name: String,

        /// Directory relative to the root (defaults to data/<id>)
        #[arg(short, long)]
        path: Option<String>,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Remove a section from the registry
    #[command(visible_alias = "rm")]
    Remove {
        /// Section id
        id: String,

        /// Also delete the section directory
        #[arg(long)]
        purge: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ChapterCommands {
    /// List chapters in order
    #[command(visible_alias = "ls")]
    List {
        /// Section id
        section: String,
    },

    /// Append a placeholder chapter
    Add {
        /// Section id
        section: String,
    },

    /// Edit a chapter's id, name or question count
    Update {
        /// Section id
        section: String,

        /// Chapter id
        chapter: String,

        /// New chapter id
        #[arg(long)]
        id: Option<String>,

        /// New display name
        #[arg(short, long)]
        name: Option<String>,

        /// New question count (non-numeric values become 0)
        #[arg(short = 'q', long)]
        count: Option<String>,
    },

    /// Remove a chapter from the list (the file is kept)
    #[command(visible_alias = "rm")]
    Remove {
        /// Section id
        section: String,

        /// Chapter id
        chapter: String,
    },

    /// Move a chapter to a new position
    #[command(visible_alias = "mv")]
    Move {
        /// Section id
        section: String,

        /// Chapter id
        chapter: String,

        /// Target position, starting at 1
        position: usize,
    },
}

#[derive(Subcommand)]
pub enum ImportCommands {
    /// Import a directory or zip archive as a section
    Section {
        /// Directory, .zip archive or chapter .json file
        source: String,

        /// Section id (defaults to the sanitized source name)
        #[arg(long)]
        id: Option<String>,
    },

    /// Import chapter files into an existing section
    Chapters {
        /// Section id
        section: String,

        /// Directory, .zip archive or chapter .json file
        source: String,
    },
}
