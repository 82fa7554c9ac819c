//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
///
/// Pure membership probes (`contains`, `peek`) are not counted as lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found a resident entry
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of new keys inserted
    pub insertions: u64,
    /// Number of overwrites of an already resident key
    pub updates: u64,
    /// Number of entries evicted due to LRU policy
    pub evictions: u64,
    /// Number of entries removed explicitly
    pub removals: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total number of lookups (hits + misses).
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_removal(&mut self) {
        self.removals += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.lookups(), 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.5);
        assert_eq!(stats.lookups(), 2);
    }

    #[test]
    fn test_write_counters() {
        let mut stats = CacheStats::new();
        stats.record_insertion();
        stats.record_insertion();
        stats.record_update();
        stats.record_eviction();
        stats.record_removal();

        assert_eq!(stats.insertions, 2);
        assert_eq!(stats.updates, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.removals, 1);
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = CacheStats::new();
        stats.record_hit();

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["evictions"], 0);
    }
}
