pub mod clock;
pub mod dashboard;
pub mod derive;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod seed;
pub mod service;

pub mod test_support;

pub use clock::{Clock, SystemClock};
pub use error::ProviderError;
pub use provider::{DataProvider, StaticProvider};
pub use service::{AgDataService, Resolved};
