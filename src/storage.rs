use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::JournalResult;
use crate::models::MoodEntry;

pub const ENTRIES_KEY: &str = "moodEntries";
pub const TOKEN_KEY: &str = "token";

/// Durable string key-value store, the local-storage equivalent.
///
/// Writes are whole-value overwrites with no transactions: two writers to
/// the same key end with whichever wrote last.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> JournalResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> JournalResult<()>;
    fn remove(&self, key: &str) -> JournalResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> JournalResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> JournalResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> JournalResult<()> {
        (**self).remove(key)
    }
}

/// In-process store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> JournalResult<Option<String>> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> JournalResult<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> JournalResult<()> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }
}

/// One file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> JournalResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> JournalResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> JournalResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Overwrites the stored collection with `entries`.
pub fn save_entries(store: &dyn KeyValueStore, entries: &[MoodEntry]) -> JournalResult<()> {
    let json = serde_json::to_string(entries)?;
    store.set(ENTRIES_KEY, &json)?;
    tracing::debug!(count = entries.len(), "Saved entries to local store");
    Ok(())
}

/// Reads the stored collection; absent means empty. Malformed JSON is
/// reported, never repaired.
pub fn load_entries(store: &dyn KeyValueStore) -> JournalResult<Vec<MoodEntry>> {
    match store.get(ENTRIES_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
