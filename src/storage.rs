//! Persistence for the chosen theme.
//!
//! This module provides:
//!
//! - [`ThemeStorage`]: The key-value accessor the controller reads and
//!   writes through
//! - [`MemoryStorage`]: In-process map, never fails
//! - [`FileStorage`]: One JSON object in a file, for native hosts
//! - [`StorageError`]: Errors from storage providers
//!
//! Providers report failures; the controller is the single place they are
//! swallowed, so every other consumer still sees them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Error returned when a storage provider fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store cannot be used at all
    Unavailable { reason: String },
    /// Reading or writing the backing file failed
    Io { path: PathBuf, message: String },
    /// The backing file exists but does not hold a JSON string map
    Malformed { path: PathBuf, message: String },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Unavailable { reason } => {
                write!(f, "storage unavailable: {}", reason)
            }
            StorageError::Io { path, message } => {
                write!(f, "storage i/o failed for \"{}\": {}", path.display(), message)
            }
            StorageError::Malformed { path, message } => {
                write!(f, "storage file \"{}\" is malformed: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Key-value store holding the persisted theme.
///
/// Implementations are best-effort: the controller degrades to in-memory
/// resolution when a call fails, so providers should report errors rather
/// than panic.
pub trait ThemeStorage {
    /// Reads the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage backed by an in-process map.
///
/// Useful for tests and for hosts that mirror the real store elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read access for assertions, bypassing the trait.
    pub fn stored(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl ThemeStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a single JSON file.
///
/// The file holds one flat string-to-string object. Writes are
/// read-modify-write so unrelated keys survive; a missing file reads as
/// empty and is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| StorageError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

impl ThemeStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&entries).map_err(|e| StorageError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&self.path, raw).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
