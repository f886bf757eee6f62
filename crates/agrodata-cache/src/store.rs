use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::CacheError;
use crate::memory::{CacheEntry, MemoryCache};
use crate::snapshot::SnapshotFile;

/// The cache as the service sees it: the in-memory map, mirrored to an
/// optional snapshot file.
///
/// The snapshot is touched only by [`CacheStore::load_snapshot`] and
/// [`CacheStore::save_snapshot`]; all reads and writes in between are
/// memory-only.
pub struct CacheStore {
    memory: MemoryCache,
    snapshot: Option<SnapshotFile>,
}

impl CacheStore {
    /// A store backed by the snapshot at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            memory: MemoryCache::new(),
            snapshot: Some(SnapshotFile::new(path.as_ref())),
        }
    }

    /// A store with no snapshot file. Useful for testing.
    pub fn in_memory() -> Self {
        Self {
            memory: MemoryCache::new(),
            snapshot: None,
        }
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_ref().map(SnapshotFile::path)
    }

    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.memory.get(key)
    }

    pub fn insert(&self, key: &str, value: serde_json::Value, updated_at: DateTime<Utc>) {
        self.memory
            .insert(key.to_string(), CacheEntry::new(value, updated_at));
    }

    /// Store `value` under `key` unless another writer got there first.
    /// Returns the stored entry and whether it is this one.
    pub fn insert_if_absent(
        &self,
        key: &str,
        value: serde_json::Value,
        updated_at: DateTime<Utc>,
    ) -> (CacheEntry, bool) {
        self.memory
            .insert_if_absent(key.to_string(), CacheEntry::new(value, updated_at))
    }

    pub fn invalidate(&self, key: &str) {
        self.memory.invalidate(key);
    }

    pub fn clear(&self) -> usize {
        self.memory.clear()
    }

    pub fn keys(&self) -> Vec<String> {
        self.memory.entries().into_keys().collect()
    }

    pub fn last_updated(&self) -> BTreeMap<String, DateTime<Utc>> {
        self.memory
            .entries()
            .into_iter()
            .map(|(k, e)| (k, e.updated_at))
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.memory.entry_count()
    }

    /// Replace the in-memory map with the snapshot contents. Returns the
    /// number of entries restored, or `None` when there is no snapshot file
    /// to read. On error the in-memory map is left untouched.
    pub fn load_snapshot(&self, loaded_at: DateTime<Utc>) -> Result<Option<usize>, CacheError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(None);
        };
        Ok(snapshot.load(loaded_at)?.map(|entries| {
            let count = entries.len();
            self.memory.replace_all(entries);
            count
        }))
    }

    /// Write the whole in-memory map to the snapshot file. Returns the number
    /// of entries written.
    pub fn save_snapshot(&self) -> Result<usize, CacheError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(0);
        };
        let entries = self.memory.entries();
        snapshot.save(&entries)?;
        Ok(entries.len())
    }
}
