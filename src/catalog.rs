// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

//! Directory catalog for the navigation tree.
//!
//! Listings are recomputed from the filesystem on every directory change, never
//! patched incrementally. At the navigation root only `chapter_*` directories
//! are shown; deeper levels get a `..` pseudo-entry and a
//! directories-before-files, case-insensitive ordering.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Pseudo-entry navigating to the parent directory.
pub const PARENT_ENTRY: &str = "..";

#[derive(Debug)]
pub enum CatalogError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot list {path:?}: {source}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// What a selected listing entry resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    /// Index out of bounds; callers treat this as a no-op.
    Invalid,
    NavigateUp,
    NavigateInto(PathBuf),
    OpenDocument(PathBuf),
    /// A file that is not a `.json` document.
    Ignore,
}

/// Resolves and lists directory entries under a fixed navigation root.
///
/// The root is immutable after construction and navigation never goes above it.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
}

impl Catalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_root(&self, current: &Path) -> bool {
        current == self.root
    }

    /// Enumerates `current` into an ordered listing.
    ///
    /// Permission denial yields an empty listing by policy; any other I/O
    /// failure propagates.
    pub fn list_entries(&self, current: &Path) -> Result<Vec<String>, CatalogError> {
        let read_dir = match fs::read_dir(current) {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => return Ok(Vec::new()),
            Err(source) => {
                return Err(CatalogError::Io { path: current.to_path_buf(), source })
            }
        };

        let mut children = Vec::<(bool, String)>::new();
        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.kind() == io::ErrorKind::PermissionDenied => return Ok(Vec::new()),
                Err(source) => {
                    return Err(CatalogError::Io { path: current.to_path_buf(), source })
                }
            };
            let is_dir = entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false);
            children.push((is_dir, entry.file_name().to_string_lossy().into_owned()));
        }

        children.sort_by(|(a_dir, a_name), (b_dir, b_name)| {
            b_dir.cmp(a_dir).then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
        });

        if self.is_root(current) {
            return Ok(children
                .into_iter()
                .filter(|(is_dir, name)| *is_dir && name.starts_with("chapter_"))
                .map(|(_, name)| name)
                .collect());
        }

        let mut entries = Vec::with_capacity(children.len() + 1);
        entries.push(PARENT_ENTRY.to_owned());
        entries.extend(children.into_iter().map(|(_, name)| name));
        Ok(entries)
    }

    /// Returns the parent of `current`, or `current` itself at the root.
    pub fn go_up(&self, current: &Path) -> PathBuf {
        if self.is_root(current) {
            return current.to_path_buf();
        }
        current.parent().unwrap_or(&self.root).to_path_buf()
    }

    /// Classifies the listing entry at `index` for the state machine.
    pub fn resolve_entry(&self, current: &Path, entries: &[String], index: usize) -> EntryAction {
        let Some(entry) = entries.get(index) else {
            return EntryAction::Invalid;
        };

        if entry == PARENT_ENTRY {
            return EntryAction::NavigateUp;
        }

        let path = current.join(entry);
        if path.is_dir() {
            return EntryAction::NavigateInto(path);
        }
        if entry.ends_with(".json") && path.is_file() {
            return EntryAction::OpenDocument(path);
        }
        EntryAction::Ignore
    }
}

#[cfg(test)]
mod tests;
