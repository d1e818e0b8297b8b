// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

//! Document store: one open JSON document and its validated mutations.
//!
//! Every mutation is all-or-nothing. The new object and its serialization are
//! built fully in memory, written to disk via a temp file + rename, and only
//! then installed into the open document, so memory and disk never diverge.
//! Serialization uses 2-space indentation over the default key-ordered map,
//! which makes repeated saves byte-identical.

use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};

/// The distinguished list field. Everything else in a document is a category.
pub const LOCATIONS_KEY: &str = "locations";

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    NoDocument,
    Unstructured { path: PathBuf },
    DuplicateLocation { name: String },
    LocationNotFound { name: String },
    CategoryNotFound { key: String },
    InvalidInput { reason: &'static str },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "invalid JSON at {path:?}: {source}"),
            Self::NoDocument => write!(f, "no document is open"),
            Self::Unstructured { path } => {
                write!(f, "{path:?} is not a JSON object; structured edits are disabled")
            }
            Self::DuplicateLocation { name } => write!(f, "location '{name}' already exists"),
            Self::LocationNotFound { name } => write!(f, "location '{name}' not found"),
            Self::CategoryNotFound { key } => write!(f, "category '{key}' not found"),
            Self::InvalidInput { reason } => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// An open document: its path, the parsed object when the file is a JSON
/// object, and a raw line mirror for display.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    data: Option<Map<String, Value>>,
    lines: Vec<String>,
}

impl Document {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False for files that failed to read or parse as a JSON object; such
    /// documents display raw text only and refuse structured edits.
    pub fn is_structured(&self) -> bool {
        self.data.is_some()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    /// Current `locations` entries. Missing or non-list fields read as empty;
    /// non-string elements are skipped.
    pub fn locations(&self) -> Vec<String> {
        self.data
            .as_ref()
            .and_then(|data| data.get(LOCATIONS_KEY))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).map(str::to_owned).collect())
            .unwrap_or_default()
    }

    /// Top-level keys other than `locations`, in serialized (sorted) order.
    pub fn category_keys(&self) -> Vec<String> {
        self.data
            .as_ref()
            .map(|data| data.keys().filter(|key| *key != LOCATIONS_KEY).cloned().collect())
            .unwrap_or_default()
    }
}

/// Holds zero or one open document and applies atomic field mutations.
#[derive(Debug, Default)]
pub struct DocumentStore {
    doc: Option<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `path`, replacing any previously open document.
    ///
    /// Read and parse failures downgrade to an unstructured raw view; they are
    /// never fatal here.
    pub fn open(&mut self, path: &Path) -> &Document {
        let (lines, data) = match fs::read_to_string(path) {
            Ok(raw) => {
                let data = match serde_json::from_str::<Value>(&raw) {
                    Ok(Value::Object(map)) => Some(map),
                    _ => None,
                };
                (raw.lines().map(str::to_owned).collect(), data)
            }
            Err(err) => (vec![format!("Error reading file: {err}")], None),
        };
        &*self.doc.insert(Document { path: path.to_path_buf(), data, lines })
    }

    pub fn close(&mut self) {
        self.doc = None;
    }

    pub fn document(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    /// Inserts a new location and re-sorts the list.
    pub fn add_location(&mut self, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput { reason: "location name is empty" });
        }

        let (mut data, doc) = self.structured_data()?;
        let mut locations = doc.locations();
        if locations.iter().any(|location| location == name) {
            return Err(StoreError::DuplicateLocation { name: name.to_owned() });
        }
        locations.push(name.to_owned());
        locations.sort();
        data.insert(LOCATIONS_KEY.to_owned(), locations_value(locations));
        self.persist(data)
    }

    /// Renames an existing location. Renaming a location onto itself succeeds
    /// without writing the file.
    pub fn edit_location(&mut self, old_name: &str, new_name: &str) -> Result<(), StoreError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(StoreError::InvalidInput { reason: "location name is empty" });
        }

        let (mut data, doc) = self.structured_data()?;
        let mut locations = doc.locations();
        let Some(index) = locations.iter().position(|location| location == old_name) else {
            return Err(StoreError::LocationNotFound { name: old_name.to_owned() });
        };
        if new_name == old_name {
            return Ok(());
        }
        locations[index] = new_name.to_owned();
        locations.sort();
        data.insert(LOCATIONS_KEY.to_owned(), locations_value(locations));
        self.persist(data)
    }

    /// Removes a location by name. The caller is responsible for asking the
    /// user for confirmation first.
    pub fn remove_location(&mut self, name: &str) -> Result<(), StoreError> {
        let (mut data, doc) = self.structured_data()?;
        let mut locations = doc.locations();
        let Some(index) = locations.iter().position(|location| location == name) else {
            return Err(StoreError::LocationNotFound { name: name.to_owned() });
        };
        locations.remove(index);
        data.insert(LOCATIONS_KEY.to_owned(), locations_value(locations));
        self.persist(data)
    }

    /// Sets a category to either a sorted string list parsed from a
    /// comma-separated value (duplicates permitted) or a coerced scalar.
    ///
    /// Scalar coercion tries, in order: boolean literal, integer literal, JSON
    /// when the value starts with `[`/`{` (falling back to the verbatim string
    /// if that fails to parse), else the verbatim string.
    pub fn set_category(&mut self, key: &str, raw_value: &str, as_list: bool) -> Result<(), StoreError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(StoreError::InvalidInput { reason: "category key is empty" });
        }

        let value = if as_list {
            let mut items = raw_value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>();
            items.sort();
            locations_value(items)
        } else {
            coerce_scalar(raw_value)
        };

        let (mut data, _) = self.structured_data()?;
        data.insert(key.to_owned(), value);
        self.persist(data)
    }

    /// Removes a top-level key. The edit menu never offers `locations` here,
    /// but removing it through this call is permitted.
    pub fn remove_category(&mut self, key: &str) -> Result<(), StoreError> {
        let (mut data, _) = self.structured_data()?;
        if data.remove(key).is_none() {
            return Err(StoreError::CategoryNotFound { key: key.to_owned() });
        }
        self.persist(data)
    }

    /// Overwrites the document with raw editor text.
    ///
    /// For structured documents the text must still parse as a JSON object;
    /// otherwise the save is refused and the file untouched. Unstructured
    /// documents save verbatim.
    pub fn save_raw(&mut self, text: &str) -> Result<(), StoreError> {
        let doc = self.doc.as_ref().ok_or(StoreError::NoDocument)?;
        let path = doc.path.clone();

        let data = if doc.is_structured() {
            match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => Some(map),
                Ok(_) => {
                    return Err(StoreError::InvalidInput { reason: "document must be a JSON object" })
                }
                Err(source) => return Err(StoreError::Json { path, source }),
            }
        } else {
            None
        };

        let mut contents = text.to_owned();
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        write_atomic(&path, contents.as_bytes())?;

        let doc = self.doc.as_mut().ok_or(StoreError::NoDocument)?;
        doc.lines = contents.lines().map(str::to_owned).collect();
        doc.data = data;
        Ok(())
    }

    fn structured_data(&self) -> Result<(Map<String, Value>, &Document), StoreError> {
        let doc = self.doc.as_ref().ok_or(StoreError::NoDocument)?;
        match doc.data.as_ref() {
            Some(data) => Ok((data.clone(), doc)),
            None => Err(StoreError::Unstructured { path: doc.path.clone() }),
        }
    }

    /// Serializes and atomically writes `data`, then installs it as the open
    /// document state together with a refreshed raw line mirror.
    fn persist(&mut self, data: Map<String, Value>) -> Result<(), StoreError> {
        let doc = self.doc.as_ref().ok_or(StoreError::NoDocument)?;
        let path = doc.path.clone();

        let mut text = serde_json::to_string_pretty(&data)
            .map_err(|source| StoreError::Json { path: path.clone(), source })?;
        text.push('\n');
        write_atomic(&path, text.as_bytes())?;

        let doc = self.doc.as_mut().ok_or(StoreError::NoDocument)?;
        doc.lines = text.lines().map(str::to_owned).collect();
        doc.data = Some(data);
        Ok(())
    }
}

fn locations_value(items: Vec<String>) -> Value {
    Value::Array(items.into_iter().map(Value::String).collect())
}

fn coerce_scalar(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if is_integer_literal(raw) {
        if let Ok(number) = raw.parse::<i64>() {
            return Value::from(number);
        }
    }
    if matches!(raw.chars().next(), Some('[' | '{')) {
        if let Ok(value) = serde_json::from_str::<Value>(raw) {
            return value;
        }
    }
    Value::String(raw.to_owned())
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path =
        parent.join(format!(".chapternav.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: tmp_path, source });
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }

    Ok(())
}
