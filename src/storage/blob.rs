//! Key-value blob storage
//!
//! The board engine only needs `get` and `set` on a string slot. Two stores
//! are provided:
//!
//! - [`FileBlobStore`] keeps each key in `{dir}/{key}.json`, using file
//!   locking for concurrent access safety and temp file + rename for writes
//! - [`MemoryBlobStore`] keeps everything in a map, for tests and embedding

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

/// A string-valued key-value store
pub trait BlobStore {
    /// Reads the value stored under `key`, or `None` if the slot is empty
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Blob store backed by one JSON file per key
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Creates a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the blobs
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&path)
            .with_context(|| format!("Failed to open blob: {}", path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on blob")?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read blob: {}", path.display()))?;

        // Lock is released when file is dropped
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Acquire exclusive lock
            file.lock_exclusive()
                .context("Failed to acquire write lock on blob")?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(value.as_bytes())
                .context("Failed to write blob")?;
            writer.flush().context("Failed to flush blob")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// In-memory blob store
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    slots: HashMap<String, String>,
    writes: usize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one slot pre-filled
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self { slots, writes: 0 }
    }

    /// Number of successful `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_missing_slot() {
        let dir = TempDir::new().unwrap();
        let store = FileBlobStore::new(dir.path());

        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn write_and_read_slot() {
        let dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::new(dir.path());

        store.set("todo-board-lists", "[]").unwrap();
        assert_eq!(store.get("todo-board-lists").unwrap().as_deref(), Some("[]"));

        store.set("todo-board-lists", r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            store.get("todo-board-lists").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::new(dir.path().join("nested").join("dir"));

        store.set("slot", "x").unwrap();
        assert!(store.path_for("slot").exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::new(dir.path());

        store.set("slot", "x").unwrap();

        // Temp file should not exist after write
        let temp_path = store.path_for("slot").with_extension("json.tmp");
        assert!(!temp_path.exists());
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryBlobStore::with_value("a", "1");
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.writes(), 0);

        store.set("a", "2").unwrap();
        store.set("b", "3").unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.raw("a"), Some("2"));
    }
}
