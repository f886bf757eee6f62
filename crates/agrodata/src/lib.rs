//! agrodata - Brazil agricultural commodity statistics over HTTP.
//!
//! Serves CONAB and SECEX/ComexStat datasets (balance sheets, exports,
//! production, prices) from a cache that falls back to embedded seed tables
//! and is persisted to a JSON snapshot across restarts.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use agrodata::models::{AgrodataConfig, Commodity};
//! use agrodata::service::AgDataService;
//! use agrodata::{build_service, router, AppState, Refresher};
//! ```

pub use agrodata_cache as cache;
pub use agrodata_models as models;
pub use agrodata_service as service;

pub mod api;
pub mod error;
pub mod refresh;

pub use api::{router, AppState};
pub use error::ApiError;
pub use refresh::Refresher;

use std::sync::Arc;

use agrodata_cache::CacheStore;
use agrodata_models::AgrodataConfig;
use agrodata_service::AgDataService;

/// Build the data service from configuration: snapshot-backed cache, seed
/// tables, system clock. The service is not yet initialized.
pub fn build_service(config: &AgrodataConfig) -> Arc<AgDataService> {
    let store = CacheStore::new(&config.cache.snapshot_path);
    Arc::new(AgDataService::with_static_provider(store))
}
