use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

/// A cached dataset and the time it was computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(value: serde_json::Value, updated_at: DateTime<Utc>) -> Self {
        Self { value, updated_at }
    }
}

/// Process-wide in-memory cache.
///
/// Unbounded and without expiry: an entry lives until it is replaced,
/// invalidated, or the whole map is cleared by a refresh. Readers get clones,
/// never references into the map.
#[derive(Debug, Default)]
pub struct MemoryCache {
    inner: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.read().get(key).cloned()
    }

    /// Insert or replace an entry.
    pub fn insert(&self, key: String, entry: CacheEntry) {
        self.write().insert(key, entry);
    }

    /// Insert only if the key is vacant. Returns the entry now stored under
    /// the key and whether it is the one passed in.
    pub fn insert_if_absent(&self, key: String, entry: CacheEntry) -> (CacheEntry, bool) {
        let mut map = self.write();
        match map.get(&key) {
            Some(existing) => (existing.clone(), false),
            None => {
                map.insert(key, entry.clone());
                (entry, true)
            }
        }
    }

    pub fn invalidate(&self, key: &str) {
        self.write().remove(key);
    }

    /// Drop every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut map = self.write();
        let count = map.len();
        map.clear();
        count
    }

    /// Swap the whole map for `entries`.
    pub fn replace_all(&self, entries: HashMap<String, CacheEntry>) {
        *self.write() = entries;
    }

    /// Sorted copy of every entry.
    pub fn entries(&self) -> BTreeMap<String, CacheEntry> {
        self.read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.read().len()
    }

    // A panic while holding the lock cannot leave the map half-written: every
    // mutation above is a single HashMap call.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> CacheEntry {
        CacheEntry::new(value, Utc::now())
    }

    #[test]
    fn insert_and_get() {
        let cache = MemoryCache::new();
        cache.insert("key1".to_string(), entry(json!([1, 2])));

        let result = cache.get("key1").unwrap();
        assert_eq!(result.value, json!([1, 2]));
    }

    #[test]
    fn get_missing() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn insert_if_absent_keeps_first_writer() {
        let cache = MemoryCache::new();
        let first = entry(json!("first"));

        let (stored, inserted) = cache.insert_if_absent("key1".to_string(), first.clone());
        assert!(inserted);
        assert_eq!(stored, first);

        let (stored, inserted) = cache.insert_if_absent("key1".to_string(), entry(json!("second")));
        assert!(!inserted);
        assert_eq!(stored.value, json!("first"));
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn invalidate() {
        let cache = MemoryCache::new();
        cache.insert("key1".to_string(), entry(json!(1)));
        cache.invalidate("key1");
        assert_eq!(cache.get("key1"), None);
    }

    #[test]
    fn clear_reports_removed_count() {
        let cache = MemoryCache::new();
        cache.insert("a".to_string(), entry(json!(1)));
        cache.insert("b".to_string(), entry(json!(2)));

        assert_eq!(cache.clear(), 2);
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn entries_are_sorted_copies() {
        let cache = MemoryCache::new();
        cache.insert("prices_corn_2025".to_string(), entry(json!(1)));
        cache.insert("balance_corn".to_string(), entry(json!(2)));

        let mut entries = cache.entries();
        let keys: Vec<_> = entries.keys().cloned().collect();
        assert_eq!(keys, vec!["balance_corn", "prices_corn_2025"]);

        entries.clear();
        assert_eq!(cache.entry_count(), 2);
    }
}
