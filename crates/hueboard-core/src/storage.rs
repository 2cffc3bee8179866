//! Persisted preference storage.
//!
//! The theme resolver never touches a global store directly; it is handed a
//! [`PreferenceStore`]. `MemoryStore` backs tests and embedders, `FileStore`
//! persists a flat JSON object on disk for the CLI.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Key-value store holding user preferences as plain strings.
pub trait PreferenceStore {
    /// Read a value. `Ok(None)` means the key is not set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store.
///
/// Can be marked unavailable to mimic a browser with storage disabled, in
/// which case every access fails with [`Error::StorageUnavailable`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every access fails.
    pub fn unavailable() -> Self {
        Self {
            values: Mutex::new(BTreeMap::new()),
            unavailable: true,
        }
    }

    /// Builder-style insert, mostly for tests.
    pub fn with(self, key: &str, value: &str) -> Self {
        self.values.lock().insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.unavailable {
            return Err(Error::StorageUnavailable);
        }
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.unavailable {
            return Err(Error::StorageUnavailable);
        }
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file.
///
/// A missing file reads as an empty store. Every `set` rewrites the whole
/// file; parent directories are created on demand.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    /// Rewrite the whole file with `key` set.
    ///
    /// A file that no longer parses is replaced rather than blocking every
    /// later write. The new content goes to a temp file in the same directory
    /// and is renamed over the old one, so readers never see a partial file.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(Error::Json(e)) => {
                tracing::warn!("Discarding unreadable preferences in {:?}: {}", self.path, e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(&values)?.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!("Saved preference '{}' to {:?}", key, self.path);
        Ok(())
    }
}
