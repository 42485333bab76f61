//! Cache Module
//!
//! Time-boxed caching of derived catalog metadata.

mod clock;
mod entry;
mod service;
mod stats;
mod ttl;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use service::{CategoryService, CATEGORY_TTL_SECS};
pub use stats::CacheStats;
pub use ttl::TtlCache;
