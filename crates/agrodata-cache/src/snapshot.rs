use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use agrodata_models::cache_schema::CacheSnapshot;
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::CacheError;
use crate::memory::CacheEntry;

/// The JSON file that mirrors the cache across restarts.
///
/// The whole cache is written in one go, straight over the previous file.
/// Everything in it can be recomputed from the fallback tables, so a torn
/// write costs at most a cold start.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. `Ok(None)` when no file exists yet.
    ///
    /// A cached key with no timestamp, or an unparseable one, is stamped
    /// with `loaded_at`.
    pub fn load(
        &self,
        loaded_at: DateTime<Utc>,
    ) -> Result<Option<HashMap<String, CacheEntry>>, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Io(e)),
        };
        let snapshot: CacheSnapshot = serde_json::from_str(&content)?;
        Ok(Some(from_snapshot(snapshot, loaded_at)))
    }

    /// Overwrite the snapshot with `entries`.
    pub fn save(&self, entries: &BTreeMap<String, CacheEntry>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(&to_snapshot(entries))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

pub fn to_snapshot(entries: &BTreeMap<String, CacheEntry>) -> CacheSnapshot {
    let mut snapshot = CacheSnapshot::default();
    for (key, entry) in entries {
        snapshot.cache.insert(key.clone(), entry.value.clone());
        snapshot
            .last_updated
            .insert(key.clone(), entry.updated_at.to_rfc3339());
    }
    snapshot
}

pub fn from_snapshot(
    snapshot: CacheSnapshot,
    loaded_at: DateTime<Utc>,
) -> HashMap<String, CacheEntry> {
    let CacheSnapshot {
        cache,
        last_updated,
    } = snapshot;

    cache
        .into_iter()
        .map(|(key, value)| {
            let updated_at = match last_updated.get(&key) {
                Some(raw) => parse_timestamp(&key, raw).unwrap_or_else(|e| {
                    tracing::warn!(%key, error = %e, "Stamping cache entry with load time");
                    loaded_at
                }),
                None => loaded_at,
            };
            (key, CacheEntry::new(value, updated_at))
        })
        .collect()
}

/// Parse an ISO-8601 timestamp. Accepts RFC 3339 with an offset, or a naive
/// date-time which is taken as UTC.
pub fn parse_timestamp(key: &str, raw: &str) -> Result<DateTime<Utc>, CacheError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| CacheError::Timestamp {
            key: key.to_string(),
            value: raw.to_string(),
        })
}
