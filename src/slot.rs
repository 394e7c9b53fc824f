// Durable key-value slots backing the task store

use eyre::{Context, Result, eyre};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A named-slot key-value store holding whole serialized values
///
/// Reads and writes are synchronous. A write replaces whatever the slot held.
pub trait Slot {
    /// Read the value stored under `key`, or `None` if nothing was ever written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Slot backed by one `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// The directory is created lazily on first write
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// File backing the given key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Slot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            debug!(file = ?path, "Slot file absent");
            return Ok(None);
        }

        let content = fs::read_to_string(&path).with_context(|| format!("Failed to read slot file {:?}", path))?;
        Ok(Some(content))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).context("Failed to create store directory")?;

        let path = self.path_for(key);
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .with_context(|| format!("Failed to open slot file {:?}", path))?;

        // Truncate only once we hold the lock
        file.lock_exclusive().context("Failed to acquire file lock")?;
        file.set_len(0)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;

        debug!(file = ?path, bytes = value.len(), "Wrote slot");

        // Lock is released when file is dropped
        Ok(())
    }
}

/// Slot held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with a raw value, e.g. one saved by an earlier session
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut slot = Self::new();
        slot.values.insert(key.to_string(), value.into());
        slot
    }
}

impl Slot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Slot keys become file names, so keep them to a safe alphabet
///
/// Checked where a key is bound: `TaskStore::open` and `Config::validate`.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(eyre!("Slot key cannot be empty"));
    }
    if key.len() > 64 {
        return Err(eyre!("Slot key too long: {} (max 64 chars)", key));
    }
    if !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err(eyre!("Invalid slot key: {} (must be alphanumeric with _/-)", key));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_slot_absent_key() {
        let temp = TempDir::new().unwrap();
        let slot = FileSlot::new(temp.path().join("store"));

        assert_eq!(slot.read("tasks").unwrap(), None);
        // Reading must not create anything
        assert!(!temp.path().join("store").exists());
    }

    #[test]
    fn test_file_slot_write_creates_directory() {
        let temp = TempDir::new().unwrap();
        let mut slot = FileSlot::new(temp.path().join("nested/store"));

        slot.write("tasks", "[]").unwrap();

        let path = temp.path().join("nested/store/tasks.json");
        assert!(path.exists());
        assert_eq!(fs::read_to_string(path).unwrap(), "[]");
    }

    #[test]
    fn test_file_slot_overwrites_longer_value() {
        let temp = TempDir::new().unwrap();
        let mut slot = FileSlot::new(temp.path());

        slot.write("tasks", "a much longer first value").unwrap();
        slot.write("tasks", "short").unwrap();

        assert_eq!(slot.read("tasks").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_file_slot_keys_are_independent() {
        let temp = TempDir::new().unwrap();
        let mut slot = FileSlot::new(temp.path());

        slot.write("tasks", "one").unwrap();
        slot.write("archive", "two").unwrap();

        assert_eq!(slot.read("tasks").unwrap().as_deref(), Some("one"));
        assert_eq!(slot.read("archive").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_memory_slot() {
        let mut slot = MemorySlot::new();
        assert_eq!(slot.read("tasks").unwrap(), None);

        slot.write("tasks", "[]").unwrap();
        assert_eq!(slot.read("tasks").unwrap().as_deref(), Some("[]"));

        let seeded = MemorySlot::with_value("tasks", "x");
        assert_eq!(seeded.read("tasks").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("tasks").is_ok());
        assert!(validate_key("my-tasks_2").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key(&"a".repeat(65)).is_err());
    }
}
