use serde::{Deserialize, Serialize};

use crate::cache_schema::CACHE_FILE_NAME;

/// Environment variable holding the admin refresh secret.
pub const ADMIN_API_KEY_ENV: &str = "ADMIN_API_KEY";

/// Built-in admin secret. Insecure; every real deployment overrides it.
pub const DEFAULT_ADMIN_API_KEY: &str = "farmhandpro-refresh-2025";

/// Top-level configuration for the agrodata service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgrodataConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Origins allowed by CORS. `*` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_origins: default_cors_origins(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Path of the JSON cache snapshot, read at startup and written at shutdown.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Run a full refresh on this interval. Unset disables the loop.
    #[serde(default)]
    pub auto_refresh_hours: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            auto_refresh_hours: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdminConfig {
    /// Secret for the refresh route. `ADMIN_API_KEY` takes precedence.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl AdminConfig {
    /// Resolve the admin secret: environment value, then the configured key,
    /// then the built-in default. The flag is true when the default is used.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> (String, bool) {
        match env_value.filter(|k| !k.is_empty()).or_else(|| self.api_key.clone()) {
            Some(key) => (key, false),
            None => (DEFAULT_ADMIN_API_KEY.to_string(), true),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}
fn default_cors_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://localhost:5174",
        "https://farmhandpro.com",
        "https://*.farmhandpro.com",
        "https://*.base44.com",
        "*",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_snapshot_path() -> String {
    CACHE_FILE_NAME.to_string()
}
