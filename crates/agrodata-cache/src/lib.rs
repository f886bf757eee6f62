pub mod error;
pub mod memory;
pub mod snapshot;
pub mod store;

pub use error::CacheError;
pub use memory::{CacheEntry, MemoryCache};
pub use snapshot::SnapshotFile;
pub use store::CacheStore;
