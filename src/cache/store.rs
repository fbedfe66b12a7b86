//! File-backed snapshot store
//!
//! Persists the latest `PriceSnapshot` as a single JSON file. Writes go
//! through a temporary file in the target's directory followed by a rename,
//! so concurrent readers never observe a half-written file. Reads are
//! tolerant: a missing, unreadable, or malformed file yields an empty
//! mapping rather than an error.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;

use crate::data::PriceSnapshot;

/// Name of the snapshot file inside the default cache directory
const SNAPSHOT_FILE: &str = "prices.json";

/// Returns the default snapshot path
///
/// Uses the XDG cache directory (`~/.cache/coincache/` on Linux) when a home
/// directory can be determined, and the system temp directory otherwise.
pub fn default_path() -> PathBuf {
    let dir = ProjectDirs::from("", "", "coincache")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir);
    dir.join(SNAPSHOT_FILE)
}

/// File-backed store for the latest price snapshot
///
/// Cloned freely: the refresh task holds one clone as the single writer and
/// every HTTP handler reads through another. No in-process lock is needed
/// because writes replace the file via rename.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Path of the snapshot file
    path: PathBuf,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    /// Creates a store at the default snapshot path
    pub fn new() -> Self {
        Self {
            path: default_path(),
        }
    }

    /// Creates a store at a specific file path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a snapshot, fully replacing prior contents
    ///
    /// The snapshot is serialized to a temporary file next to the target
    /// and renamed into place, so a concurrent `read` sees either the old
    /// or the new contents. Parent directories are created as needed.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation, serialization, or the write/rename
    ///   fails; the previous file contents are left untouched
    pub fn write(&self, snapshot: &PriceSnapshot) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)?;
                parent.to_path_buf()
            }
            _ => std::env::current_dir()?,
        };

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Reads the current snapshot's price mapping
    ///
    /// # Returns
    /// The symbol to price mapping, or an empty mapping if the file is
    /// missing, unreadable, or not a valid snapshot. Never fails.
    pub fn read(&self) -> HashMap<String, f64> {
        self.read_snapshot()
            .map(|snapshot| snapshot.prices)
            .unwrap_or_default()
    }

    /// Reads the full snapshot, if one exists and parses
    pub fn read_snapshot(&self) -> Option<PriceSnapshot> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::with_path(temp_dir.path().join("prices.json"));
        (store, temp_dir)
    }

    fn snapshot_with(entries: &[(&str, f64)]) -> PriceSnapshot {
        let prices = entries
            .iter()
            .map(|(symbol, price)| (symbol.to_string(), *price))
            .collect();
        PriceSnapshot::new(prices)
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let (store, _temp_dir) = create_test_store();
        let snapshot = snapshot_with(&[("BTC", 69763.00), ("DOGE", 0.1028)]);

        store.write(&snapshot).expect("Write should succeed");
        let prices = store.read();

        assert_eq!(prices.len(), 2);
        assert!((prices["BTC"] - 69763.00).abs() < 1e-9);
        assert!((prices["DOGE"] - 0.1028).abs() < 1e-9);
    }

    #[test]
    fn test_read_missing_file_returns_empty_mapping() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_read_corrupt_file_returns_empty_mapping() {
        let (store, _temp_dir) = create_test_store();
        fs::write(store.path(), "{ not valid json").expect("Should write corrupt file");
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_read_wrong_shape_returns_empty_mapping() {
        let (store, _temp_dir) = create_test_store();
        fs::write(store.path(), r#"{"prices": "nope"}"#).expect("Should write file");
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_read_is_idempotent() {
        let (store, _temp_dir) = create_test_store();
        let snapshot = snapshot_with(&[("XRP", 1.47)]);
        store.write(&snapshot).expect("Write should succeed");

        let first = store.read();
        let second = store.read();
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_replaces_prior_contents() {
        let (store, _temp_dir) = create_test_store();
        store
            .write(&snapshot_with(&[("BTC", 1.0), ("SOL", 2.0)]))
            .expect("First write should succeed");
        store
            .write(&snapshot_with(&[("BTC", 3.0)]))
            .expect("Second write should succeed");

        let prices = store.read();
        assert_eq!(prices.len(), 1, "Old keys should not survive a rewrite");
        assert!((prices["BTC"] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("cache").join("prices.json");
        let store = CacheStore::with_path(nested.clone());

        store
            .write(&snapshot_with(&[("BNB", 634.98)]))
            .expect("Write should succeed");

        assert!(nested.exists(), "Snapshot file should exist");
    }

    #[test]
    fn test_file_on_disk_is_always_a_complete_snapshot() {
        let (store, _temp_dir) = create_test_store();
        store
            .write(&snapshot_with(&[("BTC", 69763.00)]))
            .expect("Write should succeed");

        // Raw file contents parse as a full snapshot, not a fragment
        let raw = fs::read_to_string(store.path()).expect("Should read file");
        let parsed: PriceSnapshot = serde_json::from_str(&raw).expect("File should be complete JSON");
        assert!((parsed.prices["BTC"] - 69763.00).abs() < 1e-9);
    }

    #[test]
    fn test_reader_with_opaque_timestamp_text() {
        let (store, _temp_dir) = create_test_store();
        fs::write(store.path(), r#"{"prices":{"BTC":1.0},"last_update":"x"}"#)
            .expect("Should write file");

        let prices = store.read();
        assert_eq!(prices.len(), 1);
        assert!((prices["BTC"] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_values_roundtrip_exactly() {
        let (store, _temp_dir) = create_test_store();
        let snapshot = snapshot_with(&[("POL", 0.1109), ("EUR", 1.1865), ("XMR", 354.77)]);
        store.write(&snapshot).expect("Write should succeed");

        let prices = store.read();
        assert_eq!(prices["POL"], 0.1109);
        assert_eq!(prices["EUR"], 1.1865);
        assert_eq!(prices["XMR"], 354.77);
    }

    #[test]
    fn test_default_path_ends_with_snapshot_file() {
        let path = default_path();
        assert!(path.to_string_lossy().ends_with("prices.json"));
    }
}
