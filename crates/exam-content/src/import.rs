//! Bundle import: directories, zip archives and single chapter files

use crate::errors::ContentError;
use crate::fsutil::{copy_dir_all, remove_dir_if_exists};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Kind of bundle being imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleSource {
    Directory(PathBuf),
    Zip(PathBuf),
    JsonFile(PathBuf),
}

impl BundleSource {
    /// Classify a path; the `.zip` extension is matched case-insensitively
    pub fn detect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return Ok(BundleSource::Directory(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(ContentError::UnsupportedSource(format!(
                "{} does not exist",
                path.display()
            ))
            .into());
        }

        let extension = path.extension().map(|e| e.to_string_lossy().to_lowercase());
        match extension.as_deref() {
            Some("zip") => Ok(BundleSource::Zip(path.to_path_buf())),
            Some("json") => Ok(BundleSource::JsonFile(path.to_path_buf())),
            _ => Err(ContentError::UnsupportedSource(path.display().to_string()).into()),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            BundleSource::Directory(p) | BundleSource::Zip(p) | BundleSource::JsonFile(p) => p,
        }
    }

    /// Directory name or archive stem, used to name an imported section
    pub fn name(&self) -> String {
        let path = self.path();
        let name = match self {
            BundleSource::Directory(_) => path.file_name(),
            BundleSource::Zip(_) | BundleSource::JsonFile(_) => path.file_stem(),
        };
        name.map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
    }
}

/// Refuse a source that lives inside `destination`, or a directory source
/// that contains it. Importing either way would delete or truncate the
/// source before it is read.
pub fn ensure_disjoint(source: &BundleSource, destination: impl AsRef<Path>) -> Result<()> {
    let destination = destination.as_ref();
    let source_path = source
        .path()
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", source.path().display()))?;
    let destination_path = resolve_lenient(destination)?;

    let overlaps = source_path.starts_with(&destination_path)
        || (matches!(source, BundleSource::Directory(_))
            && destination_path.starts_with(&source_path));
    if overlaps {
        return Err(ContentError::OverlappingImport {
            path: source.path().display().to_string(),
            destination: destination.display().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Canonical form of a path whose trailing components may not exist yet
fn resolve_lenient(path: &Path) -> Result<PathBuf> {
    let mut missing = Vec::new();
    let mut existing = path;
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let base = if existing.as_os_str().is_empty() { Path::new(".") } else { existing };
    let mut resolved = base
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

/// Place a bundle's contents into `destination`, returning the number of files written.
///
/// Zip archives are extracted wholesale. Directory contents are copied; a
/// subdirectory that already exists in the destination is removed before its
/// replacement is copied, never merged.
pub fn import_into(source: &BundleSource, destination: impl AsRef<Path>) -> Result<usize> {
    let destination = destination.as_ref();
    ensure_disjoint(source, destination)?;
    fs::create_dir_all(destination)
        .with_context(|| format!("Failed to create directory {}", destination.display()))?;

    match source {
        BundleSource::Zip(path) => extract_zip(path, destination),
        BundleSource::JsonFile(path) => {
            let file_name = path.file_name().context("Invalid file path")?;
            let target = destination.join(file_name);
            fs::copy(path, &target).with_context(|| {
                format!("Failed to copy {} to {}", path.display(), target.display())
            })?;
            Ok(1)
        }
        BundleSource::Directory(path) => copy_directory_contents(path, destination),
    }
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<usize> {
    let file = fs::File::open(archive_path)
        .with_context(|| format!("Failed to open {}", archive_path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("Failed to read zip archive {}", archive_path.display()))?;

    let files = archive.file_names().filter(|name| !name.ends_with('/')).count();
    archive
        .extract(destination)
        .with_context(|| format!("Failed to extract {}", archive_path.display()))?;

    Ok(files)
}

fn copy_directory_contents(source: &Path, destination: &Path) -> Result<usize> {
    let entries = fs::read_dir(source)
        .with_context(|| format!("Failed to read directory {}", source.display()))?;

    let mut files = 0;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read {}", source.display()))?;
        let path = entry.path();
        let target = destination.join(entry.file_name());

        if path.is_dir() {
            remove_dir_if_exists(&target)?;
            copy_dir_all(&path, &target)?;
            files += WalkDir::new(&target)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .count();
        } else {
            fs::copy(&path, &target).with_context(|| {
                format!("Failed to copy {} to {}", path.display(), target.display())
            })?;
            files += 1;
        }
    }

    Ok(files)
}
