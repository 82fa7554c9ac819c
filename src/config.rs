//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Cache and workload configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Number of concurrent workers sharing the cache
    pub workers: usize,
    /// Simulated events handled by each worker
    pub events_per_worker: usize,
    /// Number of distinct keys the simulated events draw from
    pub key_space: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 256)
    /// - `WORKERS` - Concurrent workers (default: 8)
    /// - `EVENTS_PER_WORKER` - Events per worker (default: 64)
    /// - `KEY_SPACE` - Distinct keys (default: 512)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            workers: parse_var("WORKERS").unwrap_or(defaults.workers),
            events_per_worker: parse_var("EVENTS_PER_WORKER")
                .unwrap_or(defaults.events_per_worker),
            key_space: parse_var("KEY_SPACE").unwrap_or(defaults.key_space),
        }
    }

    /// Rejects configurations the cache cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "CACHE_CAPACITY must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(CacheError::InvalidConfiguration(
                "WORKERS must be at least 1".to_string(),
            ));
        }
        if self.key_space == 0 {
            return Err(CacheError::InvalidConfiguration(
                "KEY_SPACE must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 256,
            workers: 8,
            events_per_worker: 64,
            key_space: 512,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
