//! Key-value local storage with JSON values.
//!
//! Values are stored as JSON strings under caller-chosen keys, with no
//! schema, versioning or expiry. Backend failures are logged and swallowed:
//! a failed write is reported as `false`, a missing or unreadable value as
//! `None`.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::StorefrontConfig;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The write would exceed the backend's quota.
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} available")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value or the backing file could not be (de)serialised.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A string key-value store.
pub trait StorageBackend: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns error if the backend is full or cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend with an optional quota on key and value bytes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that refuses writes beyond `bytes` of keys and values.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Mutex::default(),
            quota: Some(bytes),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Backend persisting all entries as one JSON object in a file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Use the file at `path`; it is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unparseable contents read as an empty store so the next write replaces them.
    fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Storage file is corrupt, starting empty"
                );
                BTreeMap::new()
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    // Temp sibling renamed over the target; a failed write leaves the old file intact.
    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let temp = self.temp_path();
        if let Err(e) = std::fs::write(&temp, bytes) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}

/// JSON values over a [`StorageBackend`].
#[derive(Clone)]
pub struct LocalStorage {
    backend: Arc<dyn StorageBackend>,
}

impl LocalStorage {
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// File-backed storage when a path is configured, in-memory otherwise.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        match &config.storage_path {
            Some(path) => Self::new(Arc::new(FileStorage::new(path.clone()))),
            None => Self::new(Arc::new(MemoryStorage::new())),
        }
    }

    /// Serialise `value` to JSON and store it under `key`.
    ///
    /// Returns false, after logging, if the value could not be stored.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|json| self.backend.set_item(key, &json));

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(key, error = %e, "Error saving to localStorage");
                false
            }
        }
    }

    /// The value stored under `key`, or `None` when it is missing, empty or
    /// not valid JSON for `T`.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get_item(key) {
            Ok(raw) => raw?,
            Err(e) => {
                error!(key, error = %e, "Error reading from localStorage");
                return None;
            }
        };
        if raw.is_empty() {
            debug!(key, "Empty localStorage value");
            return None;
        }

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Malformed localStorage value");
                None
            }
        }
    }

    /// Remove `key`; returns false, after logging, on backend failure.
    pub fn remove(&self, key: &str) -> bool {
        match self.backend.remove_item(key) {
            Ok(()) => true,
            Err(e) => {
                error!(key, error = %e, "Error removing from localStorage");
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct RecentlyViewed {
        product_ids: Vec<i32>,
    }

    fn memory() -> (Arc<MemoryStorage>, LocalStorage) {
        let backend = Arc::new(MemoryStorage::new());
        (backend.clone(), LocalStorage::new(backend))
    }

    #[test]
    fn test_round_trip() {
        let (_, storage) = memory();
        let value = RecentlyViewed {
            product_ids: vec![3, 1, 4],
        };
        assert!(storage.set("recent", &value));
        assert_eq!(storage.get::<RecentlyViewed>("recent"), Some(value));

        assert!(storage.set("theme", "dark"));
        assert_eq!(storage.get::<String>("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_missing_empty_and_malformed_are_none() {
        let (backend, storage) = memory();
        assert_eq!(storage.get::<serde_json::Value>("absent"), None);

        backend.set_item("empty", "").unwrap();
        assert_eq!(storage.get::<serde_json::Value>("empty"), None);

        backend.set_item("broken", "{not json").unwrap();
        assert_eq!(storage.get::<serde_json::Value>("broken"), None);

        backend.set_item("wrong_shape", "[1, 2]").unwrap();
        assert_eq!(storage.get::<RecentlyViewed>("wrong_shape"), None);
    }

    #[test]
    fn test_remove() {
        let (_, storage) = memory();
        storage.set("k", &json!({"a": 1}));
        assert!(storage.remove("k"));
        assert!(storage.remove("k"));
        assert_eq!(storage.get::<serde_json::Value>("k"), None);
    }

    #[test]
    fn test_quota_exceeded_is_swallowed() {
        let storage = LocalStorage::new(Arc::new(MemoryStorage::with_quota(16)));
        assert!(storage.set("a", &1));
        assert!(!storage.set("long", &"x".repeat(32)));
        assert_eq!(storage.get::<i32>("a"), Some(1));
        assert_eq!(storage.get::<String>("long"), None);
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let backend = MemoryStorage::with_quota(6);
        backend.set_item("k", "12345").unwrap();
        backend.set_item("k", "54321").unwrap();
        assert!(matches!(
            backend.set_item("k", "123456"),
            Err(StorageError::QuotaExceeded { needed: 7, quota: 6 })
        ));
    }

    #[test]
    fn test_file_storage_persists() {
        let path = std::env::temp_dir().join(format!(
            "shopsphere-storage-{}-{}.json",
            std::process::id(),
            line!()
        ));
        let _ = std::fs::remove_file(&path);

        let storage = LocalStorage::new(Arc::new(FileStorage::new(&path)));
        assert!(storage.set("cart_note", &json!({"gift": true})));

        let reopened = LocalStorage::new(Arc::new(FileStorage::new(&path)));
        assert_eq!(
            reopened.get::<serde_json::Value>("cart_note"),
            Some(json!({"gift": true}))
        );
        assert!(reopened.remove("cart_note"));
        assert_eq!(storage.get::<serde_json::Value>("cart_note"), None);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_empty_and_is_repaired() {
        let path = std::env::temp_dir().join(format!(
            "shopsphere-storage-{}-{}.json",
            std::process::id(),
            line!()
        ));
        std::fs::write(&path, b"not a json object").unwrap();

        let storage = LocalStorage::new(Arc::new(FileStorage::new(&path)));
        assert_eq!(storage.get::<serde_json::Value>("anything"), None);
        assert!(storage.set("anything", &1));
        assert_eq!(storage.get::<i32>("anything"), Some(1));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_truncated_file_accepts_new_writes() {
        let path = std::env::temp_dir().join(format!(
            "shopsphere-storage-{}-{}.json",
            std::process::id(),
            line!()
        ));
        let _ = std::fs::remove_file(&path);

        let storage = LocalStorage::new(Arc::new(FileStorage::new(&path)));
        assert!(storage.set("theme", &"dark"));
        assert!(storage.set("recent", &json!([1, 2, 3])));

        let mut bytes = std::fs::read(&path).unwrap();
        bytes.truncate(bytes.len() / 2);
        std::fs::write(&path, &bytes).unwrap();

        assert_eq!(storage.get::<String>("theme"), None);
        assert!(storage.set("cart_note", &"gift wrap"));
        assert!(storage.set("theme", &"light"));
        assert_eq!(storage.get::<String>("cart_note").as_deref(), Some("gift wrap"));
        assert_eq!(storage.get::<String>("theme").as_deref(), Some("light"));

        let file = FileStorage::new(&path);
        assert!(!file.temp_path().exists());

        std::fs::remove_file(&path).unwrap();
    }
}
