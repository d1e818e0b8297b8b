// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

//! Full-text location search across the document tree.
//!
//! The index is recomputed fresh on every invocation; there is no caching
//! across searches. Unreadable or unparsable documents are silently skipped so
//! a single broken file never poisons a search.

use std::fs;
use std::path::{Component, Path};

use serde_json::Value;
use walkdir::WalkDir;

/// Search matches under one `chapter/season` group key.
///
/// `updates` lists the third path segment of every matching document, sorted
/// lexically. Two matching documents in the same update directory list the id
/// twice; this mirrors the on-screen grouping and is deliberate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchGroup {
    pub key: String,
    pub updates: Vec<String>,
}

/// Searches every `.json` document under `root` for a `locations` element that
/// contains `query`, case-folded.
///
/// Documents shallower than three path segments below `root` cannot be keyed
/// and are skipped. An empty or all-whitespace query short-circuits to an
/// empty result without walking the tree.
pub fn search_locations(root: &Path, query: &str) -> Vec<SearchGroup> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let mut groups = Vec::<SearchGroup>::new();
    for entry in WalkDir::new(root).follow_links(false).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        if !document_matches(path, &needle) {
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let segments = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>();
        if segments.len() < 3 {
            continue;
        }

        let key = format!("{}/{}", segments[0], segments[1]);
        let update = segments[2].clone();
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.updates.push(update),
            None => groups.push(SearchGroup { key, updates: vec![update] }),
        }
    }

    for group in &mut groups {
        group.updates.sort();
    }
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    groups
}

fn document_matches(path: &Path, needle: &str) -> bool {
    let Ok(raw) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(value) = serde_json::from_str::<Value>(&raw) else {
        return false;
    };
    let Some(locations) = value.get("locations").and_then(Value::as_array) else {
        return false;
    };
    locations
        .iter()
        .filter_map(Value::as_str)
        .any(|location| location.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests;
