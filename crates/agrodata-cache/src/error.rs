use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Snapshot IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp for key={key}: {value}")]
    Timestamp { key: String, value: String },
}
