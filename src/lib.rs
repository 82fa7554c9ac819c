//! Paste Cache - A capacity-bounded LRU cache
//!
//! Deduplicates outbound work: callers check the cache before doing an
//! expensive call and store the result afterwards.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{BoundedCache, CacheStats, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use models::PasteRecord;
