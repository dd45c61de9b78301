//! Flat directory listing for mockup folders.
//!
//! Listings are sorted by filename so layer ids and z-index tie-breaks do
//! not depend on platform directory order.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{MockupError, Result};

/// List the immediate subdirectories of `parent`, sorted by name.
///
/// Fails if `parent` is missing or unreadable. Individual entries that
/// cannot be read, such as dangling symlinks, are skipped with a warning.
pub fn list_subfolders(parent: &Path) -> Result<Vec<PathBuf>> {
    let entries = read_entries(parent)?;

    Ok(entries
        .into_iter()
        .filter(|e| e.file_type().is_dir())
        .map(DirEntry::into_path)
        .collect())
}

/// List the names of regular files directly inside `folder`, sorted.
///
/// Subdirectories are skipped, as are names that are not valid UTF-8.
pub fn list_files(folder: &Path) -> Result<Vec<String>> {
    let entries = read_entries(folder)?;
    let mut files = Vec::new();

    for entry in entries {
        if !entry.file_type().is_file() {
            continue;
        }

        match entry.file_name().to_str() {
            Some(name) => files.push(name.to_string()),
            None => tracing::warn!("Skipping non UTF-8 filename {}", entry.path().display()),
        }
    }

    Ok(files)
}

fn read_entries(dir: &Path) -> Result<Vec<DirEntry>> {
    if !dir.is_dir() {
        return Err(MockupError::Io {
            path: dir.to_path_buf(),
            message: "Not a readable directory".to_string(),
        });
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => entries.push(entry),
            // The directory itself could not be opened
            Err(e) if e.depth() == 0 => return Err(MockupError::io(dir, "Failed to list directory", e)),
            // Dangling symlinks and entries we may not stat
            Err(e) => tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }

    Ok(entries)
}
