//! Command implementations

pub mod chapters;
pub mod configure;
pub mod import;
pub mod markup;
pub mod reconcile;
pub mod sections;
pub mod stats;
pub mod validate;

pub use chapters::{add_chapter, list_chapters, move_chapter, remove_chapter, update_chapter};
pub use configure::configure_engine;
pub use import::{import_chapters, import_section};
pub use markup::{highlight_markup, preview_markup};
pub use reconcile::reconcile_sections;
pub use sections::{add_section, list_sections, remove_section};
pub use stats::show_stats;
pub use validate::validate_content;
