//! Durable key-value storage backends.
//!
//! The navigation widget persists a handful of small string values (the expanded
//! menu ids and the active menu id). This module exposes the storage abstraction
//! along with a JSON-file implementation, an in-memory implementation for tests
//! and ephemeral sessions, and an always-failing implementation that stands in
//! for disabled storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::warn;

use crate::path_processing::config_file_path;

/// Environment variable controlling the storage file location.
pub const STORAGE_PATH_ENV: &str = "NAVTREE_STORAGE_PATH";

/// Default filename for the persisted store.
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O failure while reading or writing the storage file.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The backend cannot be used at all (disabled, over quota, sandboxed).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Shared trait implemented by storage backends.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// JSON-backed store persisted on disk as a flat object of string values.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at the provided path, or the default path when omitted.
    ///
    /// A missing file starts empty. A file that does not parse is logged and
    /// replaced on the next write.
    pub fn new<P: Into<Option<PathBuf>>>(path: P) -> Result<Self, StorageError> {
        let resolved_path = path.into().unwrap_or_else(default_storage_path);
        let items = load_items(&resolved_path)?;
        Ok(Self {
            path: resolved_path,
            items: Mutex::new(items),
        })
    }

    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(None::<PathBuf>)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_locked(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().expect("storage lock poisoned");
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().expect("storage lock poisoned");
        let mut updated = items.clone();
        updated.insert(key.to_string(), value.to_string());
        self.save_locked(&updated)?;
        *items = updated;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().expect("storage lock poisoned");
        if !items.contains_key(key) {
            return Ok(());
        }
        let mut updated = items.clone();
        updated.remove(key);
        self.save_locked(&updated)?;
        *items = updated;
        Ok(())
    }
}

/// In-memory store primarily used for unit testing.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().expect("storage lock poisoned");
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().expect("storage lock poisoned");
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().expect("storage lock poisoned");
        items.remove(key);
        Ok(())
    }
}

/// Store whose every operation fails, mirroring disabled browser storage.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl KeyValueStore for UnavailableStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable(self.reason.clone()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(self.reason.clone()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(self.reason.clone()))
    }
}

fn default_storage_path() -> PathBuf {
    config_file_path(STORAGE_PATH_ENV, STORAGE_FILE_NAME)
}

fn load_items(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
            Ok(items) => Ok(items),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Failed to parse storage file; starting empty");
                Ok(BTreeMap::new())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(error) => Err(StorageError::Io(error)),
    }
}
