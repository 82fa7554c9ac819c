//! Cache Module
//!
//! Provides a capacity-bounded in-memory cache with LRU eviction.

mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use lru::RecencyList;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::BoundedCache;
