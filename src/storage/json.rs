//! JSON file-based persistence backend.
//!
//! Stores each ledger under its own `<key>.json` file in the data directory,
//! using atomic file writes (write-to-temp + rename) to prevent corruption on
//! crashes. An in-memory [`MemoryStore`] implements the same trait for tests
//! and for graceful degradation when the filesystem is unavailable.

use crate::domain::error::{CatalogError, Result};
use crate::storage::backend::BlobStore;
use std::collections::HashMap;
use std::path::PathBuf;

/// JSON file storage backend.
///
/// One file per key, human-readable, atomically replaced on every write.
/// Designed for small whole-blob payloads (a favorites list, a registration
/// list), not incremental updates.
pub struct JsonFileStore {
    /// Directory holding one `<key>.json` file per stored blob.
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a JSON store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(dir = ?dir, "initializing JSON blob store");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            tracing::debug!(key = %key, "no persisted blob");
            return Ok(None);
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(key = %key, bytes = contents.len(), "blob loaded");
                Ok(Some(contents))
            }
            Err(e) => Err(CatalogError::Persistence(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("tmp");

        tracing::trace!(key = %key, tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, payload)?;

        tracing::trace!(key = %key, "renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!(key = %key, bytes = payload.len(), "blob saved");
        Ok(())
    }
}

/// In-memory storage backend.
///
/// Holds blobs in a map for the lifetime of the process. Used when the JSON
/// file store cannot be initialized (the ledger keeps working, just without
/// durability) and throughout the test suite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();
        assert!(store.read("favorites").unwrap().is_none());
    }

    #[test]
    fn write_then_read_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();

        store.write("favorites", r#"{"version":1,"entries":[]}"#).unwrap();
        assert_eq!(
            store.read("favorites").unwrap().as_deref(),
            Some(r#"{"version":1,"entries":[]}"#)
        );
    }

    #[test]
    fn write_replaces_previous_payload_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();

        store.write("registrations", "[1,2,3]").unwrap();
        store.write("registrations", "[1]").unwrap();

        assert_eq!(store.read("registrations").unwrap().as_deref(), Some("[1]"));
        // The temporary file must not survive the rename.
        assert!(!dir.path().join("registrations.tmp").exists());
    }

    #[test]
    fn keys_map_to_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().to_path_buf()).unwrap();

        store.write("favorites", "a").unwrap();
        store.write("registrations", "b").unwrap();

        assert!(dir.path().join("favorites.json").exists());
        assert!(dir.path().join("registrations.json").exists());
        assert_eq!(store.read("favorites").unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn memory_store_roundtrips() {
        let mut store = MemoryStore::new();
        assert!(store.read("favorites").unwrap().is_none());
        store.write("favorites", "[]").unwrap();
        assert_eq!(store.read("favorites").unwrap().as_deref(), Some("[]"));
    }
}
