//! Directory listing.

use crate::error::{Error, Result, from_walk_error};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One top-level entry of the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Base name.
    pub name: String,
    /// Text after the last `.` in the name, empty if there is none.
    pub extension: String,
    /// Size in bytes.
    pub size: u64,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl FileEntry {
    /// Build an entry, deriving name and extension from `path`.
    pub fn new(path: impl Into<PathBuf>, size: u64, is_dir: bool) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = extension_of(&name).to_string();
        Self {
            path,
            name,
            extension,
            size,
            is_dir,
        }
    }
}

/// Extension of a base name: everything after the last dot.
///
/// Dotfiles count too, so `.md5` has extension `md5`.
fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => "",
    }
}

/// List the immediate children of `dir`, sorted by name.
///
/// Symlinks are reported with the metadata of their target when it can be
/// read, and with their own metadata otherwise. Any failure here is fatal for
/// the scan.
pub fn list_directory(dir: &Path) -> Result<Vec<FileEntry>> {
    let metadata = fs::metadata(dir).map_err(|e| Error::directory_read(dir, e))?;
    if !metadata.is_dir() {
        return Err(Error::directory_read(
            dir,
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let walker = ignore::WalkBuilder::new(dir)
        .max_depth(Some(1)) // Only immediate children
        .standard_filters(false) // Every entry, hidden or ignored
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| from_walk_error(dir, e))?;

        // Skip the directory itself
        if entry.depth() == 0 {
            continue;
        }

        let path = entry.path();
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(_) => fs::symlink_metadata(path).map_err(|e| Error::directory_read(dir, e))?,
        };

        entries.push(FileEntry::new(path, metadata.len(), metadata.is_dir()));
    }

    Ok(entries)
}
