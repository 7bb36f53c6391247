//! Chapter identity inferred from filenames and document fields

use crate::model::ChapterDocument;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static CHAPTER_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"chapter(\d+)").unwrap());

/// Sort position of a chapter; `Unordered` sorts after every numbered chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChapterOrder {
    Numbered(u64),
    Unordered,
}

impl ChapterOrder {
    pub fn from_id(id: &str) -> Self {
        id.trim().parse().map(ChapterOrder::Numbered).unwrap_or(ChapterOrder::Unordered)
    }
}

/// Resolved identifier of a chapter file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterKey {
    pub id: String,
    pub order: ChapterOrder,
}

impl ChapterKey {
    /// Filename `chapter<N>` token, then `params.chapter`, then the filename stem
    pub fn resolve(filename: &str, document: &ChapterDocument) -> Self {
        let id = number_from_filename(filename)
            .map(|(digits, _)| digits)
            .or_else(|| document.chapter_param())
            .unwrap_or_else(|| file_stem(filename));

        let order = ChapterOrder::from_id(&id);
        ChapterKey { id, order }
    }
}

/// Digits following the case-sensitive token `chapter`, verbatim and parsed
pub fn number_from_filename(filename: &str) -> Option<(String, u64)> {
    let caps = CHAPTER_TOKEN.captures(filename)?;
    let digits = caps.get(1)?.as_str();
    let number = digits.parse().ok()?;
    Some((digits.to_string(), number))
}

/// Filename without its extension
pub fn file_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.to_string())
}

/// Display name for a chapter: the title with an exact `"Chapter {id} "`
/// prefix removed, or the filename stem when there is no title
pub fn display_name(title: Option<&str>, id: &str, filename: &str) -> String {
    match title {
        Some(title) => {
            let prefix = format!("Chapter {} ", id);
            match title.strip_prefix(&prefix) {
                Some(rest) => rest.trim().to_string(),
                None => title.to_string(),
            }
        }
        None => file_stem(filename),
    }
}
