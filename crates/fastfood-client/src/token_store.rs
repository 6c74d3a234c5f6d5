//! # Durable Token Storage
//!
//! A tiny key/value store that outlives the process.
//!
//! The file backend keeps every key in one JSON object:
//! ```text
//! storage.json
//! {
//!   "token": "eyJhbGciOi..."
//! }
//! ```
//! Writes go to a temporary file in the same directory which then replaces
//! `storage.json`, so a crash never leaves a half-written file behind.
//! Concurrent writers are not coordinated.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Durable string storage keyed by name.
pub trait TokenStore: Send + Sync {
    /// Stores `value` under `key`, overwriting any previous value.
    fn save(&self, key: &str, value: &str) -> ClientResult<()>;

    /// Returns the value under `key`, if any.
    fn load(&self, key: &str) -> ClientResult<Option<String>>;
}

// =============================================================================
// File Backend
// =============================================================================

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileTokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ClientResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            ClientError::Storage(format!("{} is not a JSON object: {}", self.path.display(), e))
        })
    }
}

impl TokenStore for FileTokenStore {
    /// An unreadable existing file is replaced rather than blocking the write.
    fn save(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.read_all().unwrap_or_else(|e| {
            warn!(path = ?self.path, error = %e, "Discarding unreadable storage file");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(file.as_file_mut(), &entries)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        file.as_file_mut().flush()?;
        file.persist(&self.path).map_err(|e| ClientError::Storage(e.error.to_string()))?;

        debug!(path = ?self.path, key, "Stored value");
        Ok(())
    }

    fn load(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// Process-local storage, used with `--no-persist` and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> ClientResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastfood_core::TOKEN_STORAGE_KEY;

    #[test]
    fn test_file_store_roundtrip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("data").join("storage.json"));

        assert_eq!(store.load(TOKEN_STORAGE_KEY).unwrap(), None);

        store.save(TOKEN_STORAGE_KEY, "first").unwrap();
        store.save(TOKEN_STORAGE_KEY, "second").unwrap();
        assert_eq!(store.load(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("storage.json"));

        store.save("theme", "dark").unwrap();
        store.save(TOKEN_STORAGE_KEY, "abc").unwrap();

        let reopened = FileTokenStore::new(store.path());
        assert_eq!(reopened.load("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.load(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(matches!(store.load(TOKEN_STORAGE_KEY), Err(ClientError::Storage(_))));
    }

    #[test]
    fn test_save_replaces_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"token": "half-writ"#).unwrap();

        let store = FileTokenStore::new(&path);
        store.save(TOKEN_STORAGE_KEY, "fresh").unwrap();

        assert_eq!(store.load(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("fresh"));
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load(TOKEN_STORAGE_KEY).unwrap(), None);
        store.save(TOKEN_STORAGE_KEY, "t").unwrap();
        assert_eq!(store.load(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("t"));
    }
}
