use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use agrodata_cache::CacheStore;
use agrodata_models::ServiceStatus;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::ProviderError;
use crate::provider::{DataProvider, StaticProvider};

/// A dataset together with the time its cache entry was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub data: T,
    pub last_updated: DateTime<Utc>,
}

/// Owns the cache and answers every data request from it, falling back to
/// the provider on a miss.
///
/// Constructed explicitly and shared behind an `Arc`. Call
/// [`AgDataService::initialize`] once before serving and
/// [`AgDataService::teardown`] on shutdown.
pub struct AgDataService {
    provider: Arc<dyn DataProvider>,
    store: CacheStore,
    clock: Arc<dyn Clock>,
    initialized: AtomicBool,
}

impl AgDataService {
    pub fn new(provider: Arc<dyn DataProvider>, store: CacheStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            store,
            clock,
            initialized: AtomicBool::new(false),
        }
    }

    /// The production wiring: seed tables and the system clock.
    pub fn with_static_provider(store: CacheStore) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let provider = Arc::new(StaticProvider::new(Arc::clone(&clock)));
        Self::new(provider, store, clock)
    }

    /// Restore the cache from the snapshot file. Never fails: an unreadable
    /// snapshot is logged and the service starts empty.
    pub fn initialize(&self) -> usize {
        let restored = match self.store.load_snapshot(self.clock.now()) {
            Ok(Some(count)) => {
                if let Some(path) = self.store.snapshot_path() {
                    info!(path = %path.display(), entries = count, "Loaded cache snapshot");
                }
                count
            }
            Ok(None) => {
                match self.store.snapshot_path() {
                    Some(path) => info!(path = %path.display(), "No cache snapshot found, starting empty"),
                    None => debug!("No snapshot file configured, starting empty"),
                }
                0
            }
            Err(e) => {
                error!(error = %e, "Failed to load cache snapshot, starting empty");
                0
            }
        };
        self.initialized.store(true, Ordering::SeqCst);
        info!(provider = self.provider.name(), entries = restored, "Data service initialized");
        restored
    }

    /// Write the cache to the snapshot file. Failures are logged only.
    pub fn teardown(&self) {
        self.save_snapshot();
        info!("Data service shut down");
    }

    pub(crate) fn save_snapshot(&self) {
        match self.store.save_snapshot() {
            Ok(count) => {
                if let Some(path) = self.store.snapshot_path() {
                    info!(path = %path.display(), entries = count, "Saved cache snapshot");
                }
            }
            Err(e) => error!(error = %e, "Failed to save cache snapshot"),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            initialized: self.is_initialized(),
            cache_keys: self.store.keys(),
            last_updated: self.store.last_updated(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub(crate) fn provider(&self) -> &dyn DataProvider {
        self.provider.as_ref()
    }

    /// Serve `key` from the cache, or compute it with `fetch` and cache it.
    ///
    /// At most one value is ever written per key: if a concurrent caller
    /// populated the key while `fetch` ran, its entry is returned instead.
    /// Provider failures yield `T::default()` and leave the cache untouched.
    pub(crate) async fn resolve<T, F, Fut>(&self, key: &str, fetch: F) -> Resolved<T>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        if let Some(entry) = self.store.get(key) {
            match serde_json::from_value::<T>(entry.value) {
                Ok(data) => {
                    return Resolved {
                        data,
                        last_updated: entry.updated_at,
                    }
                }
                Err(e) => {
                    warn!(key, error = %e, "Cached value does not decode, recomputing");
                    self.store.invalidate(key);
                }
            }
        }

        let data = match fetch().await {
            Ok(data) => data,
            Err(e) => {
                warn!(key, provider = self.provider.name(), error = %e, "Provider failed, serving empty dataset");
                return Resolved {
                    data: T::default(),
                    last_updated: self.clock.now(),
                };
            }
        };

        let value = match serde_json::to_value(&data) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Dataset not serializable, serving uncached");
                return Resolved {
                    data,
                    last_updated: self.clock.now(),
                };
            }
        };

        let (entry, inserted) = self.store.insert_if_absent(key, value, self.clock.now());
        if inserted {
            debug!(key, "Populated cache from fallback");
            return Resolved {
                data,
                last_updated: entry.updated_at,
            };
        }

        debug!(key, "Cache populated concurrently, using existing entry");
        match serde_json::from_value::<T>(entry.value) {
            Ok(existing) => Resolved {
                data: existing,
                last_updated: entry.updated_at,
            },
            Err(_) => Resolved {
                data,
                last_updated: entry.updated_at,
            },
        }
    }

    /// Compute a dataset without touching the cache. Used for requests whose
    /// parameters fall outside the seeded tables, so arbitrary client input
    /// cannot grow the cache.
    pub(crate) async fn resolve_uncached<T, F, Fut>(&self, key: &str, fetch: F) -> Resolved<T>
    where
        T: Default,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let data = fetch().await.unwrap_or_else(|e| {
            warn!(key, provider = self.provider.name(), error = %e, "Provider failed, serving empty dataset");
            T::default()
        });
        debug!(key, "Serving uncached dataset");
        Resolved {
            data,
            last_updated: self.clock.now(),
        }
    }
}
