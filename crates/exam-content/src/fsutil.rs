//! Filesystem helpers shared by the registry, order file and generated config

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Atomic write: write to a temp file next to the target, then rename.
///
/// On failure the previous contents of `path` are left untouched.
pub fn write_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file_name = path.file_name().context("Invalid file path")?.to_string_lossy();
    let temp_file = path.with_file_name(format!("{}.tmp", file_name));

    fs::write(&temp_file, contents)
        .with_context(|| format!("Failed to write {}", temp_file.display()))?;

    if let Err(e) = fs::rename(&temp_file, path) {
        let _ = fs::remove_file(&temp_file);
        return Err(anyhow::Error::new(e).context(format!("Failed to replace {}", path.display())));
    }

    Ok(())
}

/// Serialize as two-space indented JSON and write atomically
pub fn write_json_pretty<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    write_atomic(path, &content)
}

/// Read a JSON file, substituting the default when it is absent or malformed.
///
/// A malformed file yields a diagnostic instead of an error.
pub fn read_json_lenient<T>(path: impl AsRef<Path>) -> (T, Option<String>)
where
    T: DeserializeOwned + Default,
{
    let path = path.as_ref();
    if !path.exists() {
        return (T::default(), None);
    }

    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));

    match parsed {
        Ok(value) => (value, None),
        Err(e) => (T::default(), Some(format!("Ignoring unreadable {}: {}", path.display(), e))),
    }
}

/// Recursively copy a directory tree
pub fn copy_dir_all(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("Failed to copy {} to {}", entry.path().display(), target.display())
            })?;
        }
    }

    Ok(())
}

/// Remove a directory tree if it exists
pub fn remove_dir_if_exists(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/c.json");
        write_atomic(&path, "[]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(!temp.path().join("a/b/c.json.tmp").exists());
    }

    #[test]
    fn test_write_json_pretty_uses_two_spaces() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("x.json");
        write_json_pretty(&path, &vec![1, 2]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_read_json_lenient() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("x.json");

        let (value, diag): (Vec<u32>, _) = read_json_lenient(&path);
        assert!(value.is_empty());
        assert!(diag.is_none());

        fs::write(&path, "{broken").unwrap();
        let (value, diag): (Vec<u32>, _) = read_json_lenient(&path);
        assert!(value.is_empty());
        assert!(diag.unwrap().contains("Ignoring unreadable"));

        fs::write(&path, "[3]").unwrap();
        let (value, diag): (Vec<u32>, _) = read_json_lenient(&path);
        assert_eq!(value, vec![3]);
        assert!(diag.is_none());
    }

    #[test]
    fn test_copy_dir_all() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        fs::create_dir_all(source.join("images")).unwrap();
        fs::write(source.join("chapter1.json"), "{}").unwrap();
        fs::write(source.join("images/q1.png"), "png").unwrap();

        let dest = temp.path().join("dest");
        copy_dir_all(&source, &dest).unwrap();
        assert!(dest.join("chapter1.json").exists());
        assert_eq!(fs::read_to_string(dest.join("images/q1.png")).unwrap(), "png");
    }
}
