use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default file name of the on-disk cache snapshot.
pub const CACHE_FILE_NAME: &str = "brazil_ag_cache.json";

/// The on-disk cache snapshot: one JSON document holding every cached value
/// and the time each was last computed.
///
/// ```json
/// {
///   "cache": { "balance_soybeans": [ ... ], "exports_corn_2025": [ ... ] },
///   "last_updated": { "balance_soybeans": "2026-01-15T10:00:00+00:00" }
/// }
/// ```
///
/// Timestamps are kept as strings here so that a snapshot written with naive
/// ISO-8601 timestamps still loads; the cache layer parses them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CacheSnapshot {
    #[serde(default)]
    pub cache: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub last_updated: BTreeMap<String, String>,
}

/// Key pattern conventions for the cache.
///
/// A key is the category followed by every parameter that changes the
/// underlying dataset. Parameters that only slice a dataset (`years`,
/// `top_n`) are applied on read and never appear in the key.
///
/// - Balance sheets: `balance_{commodity}` (e.g., `balance_soybeans`)
/// - Soy complex: `soy_complex`
/// - Monthly exports: `exports_{commodity}_{year}` (e.g., `exports_corn_2025`)
/// - Destinations: `destinations_{commodity}_{year}`
/// - Ports: `ports_{commodity}_{year}`
/// - Production: `production_{commodity}`
/// - Prices: `prices_{commodity}_{year}` or `prices_{commodity}_{year}_{location}`
/// - Crop surveys: `survey_{crop_year}`
pub mod key_patterns {
    use crate::commodity::Commodity;

    pub fn balance(commodity: Commodity) -> String {
        format!("balance_{commodity}")
    }

    pub fn soy_complex() -> String {
        "soy_complex".to_string()
    }

    pub fn monthly_exports(commodity: Commodity, year: i32) -> String {
        format!("exports_{commodity}_{year}")
    }

    pub fn destinations(commodity: Commodity, year: i32) -> String {
        format!("destinations_{commodity}_{year}")
    }

    pub fn ports(commodity: Commodity, year: i32) -> String {
        format!("ports_{commodity}_{year}")
    }

    pub fn production(commodity: Commodity) -> String {
        format!("production_{commodity}")
    }

    pub fn prices(commodity: Commodity, year: i32, location: Option<&str>) -> String {
        match location {
            Some(location) => format!("prices_{commodity}_{year}_{location}"),
            None => format!("prices_{commodity}_{year}"),
        }
    }

    pub fn survey(crop_year: &str) -> String {
        format!("survey_{crop_year}")
    }
}
