//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Absence of a key is never an error; lookups return `Option` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Construction-time rejection (e.g. a zero capacity)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
