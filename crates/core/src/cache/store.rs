//! Best-effort persisted key-value slots.
//!
//! The cache persists through a tiny slot abstraction so tests inject an
//! in-memory store and the engine never depends on a concrete storage
//! mechanism. Reads are best-effort throughout: a missing or unreadable
//! slot yields empty, never an error.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// String-serialized key-value slots keyed by fixed logical names.
pub trait StateStore: Send + Sync {
    /// Read a slot. Absent or unreadable slots yield `None`.
    fn read(&self, key: &str) -> Option<String>;

    /// Overwrite a slot.
    fn write(&self, key: &str, value: &str) -> io::Result<()>;

    /// Remove a slot. Best-effort.
    fn clear(&self, key: &str);
}

/// In-memory slots for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStateStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn read(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
    }
}

/// One file per slot under a directory.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStateStore {
    fn read(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.slot_path(key)) {
            Ok(contents) => Some(contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(key, %err, "failed to read state slot; treating as empty");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.slot_path(key), value)
    }

    fn clear(&self, key: &str) {
        let _ = std::fs::remove_file(self.slot_path(key));
    }
}
