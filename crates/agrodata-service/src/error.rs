use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
