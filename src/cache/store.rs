//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with an O(1) recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::cache::{CacheStats, RecencyList};
use crate::error::{CacheError, Result};

// == Bounded Cache ==
/// Capacity-bounded cache with least-recently-used eviction.
///
/// Holds at most `capacity` entries. Inserting a new key into a full cache
/// evicts exactly one entry, the least recently used one, before the new
/// entry goes in. `get`, `get_or`, `get_mut` and every `set` count as a use;
/// `contains`, `peek` and `iter` never reorder anything.
///
/// # Example
/// ```
/// use paste_cache::BoundedCache;
///
/// let mut cache = BoundedCache::new(2).unwrap();
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.get("a");
/// cache.set("c", 3); // evicts "b"
///
/// assert!(cache.contains("a"));
/// assert!(!cache.contains("b"));
/// ```
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    /// Key -> slot in `order`
    index: HashMap<K, usize>,
    /// Resident entries, most recently used first
    order: RecencyList<(K, V)>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache that holds at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidConfiguration`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be at least 1".to_string(),
            ));
        }

        debug!(capacity, "bounded cache created");
        Ok(Self {
            index: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.touch(key)?;
        self.order.get(idx).map(|(_, value)| value)
    }

    /// Like [`get`](Self::get), but falls back to `default` on a miss.
    ///
    /// The default is not inserted.
    pub fn get_or<'a, Q>(&'a mut self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    /// Mutable access to the value for `key`; counts as a use.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.touch(key)?;
        self.order.get_mut(idx).map(|(_, value)| value)
    }

    /// Reads the value for `key` without refreshing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.order.get(idx).map(|(_, value)| value)
    }

    // == Contains ==
    /// Membership probe. Does not count as a use.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Set ==
    /// Stores a key-value pair and marks the key most recently used.
    ///
    /// If the key already exists, the value is overwritten and nothing is
    /// evicted. Otherwise, when the cache is full, the least recently used
    /// entry is evicted first and handed back to the caller.
    pub fn set(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(slot) = self.order.get_mut(idx) {
                slot.1 = value;
            }
            self.order.touch(idx);
            self.stats.record_update();
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let slot_key = key.clone();
        let idx = self.order.push_front((slot_key, value));
        self.index.insert(key, idx);
        self.stats.record_insertion();

        evicted
    }

    /// Stores a key-value pair, returning the previous value for that key.
    ///
    /// Any entry evicted to make room is dropped.
    pub fn replace(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&idx) = self.index.get(&key) {
            let previous = self
                .order
                .get_mut(idx)
                .map(|slot| std::mem::replace(&mut slot.1, value));
            self.order.touch(idx);
            self.stats.record_update();
            return previous;
        }

        self.set(key, value);
        None
    }

    // == Remove ==
    /// Removes an entry by key, returning its value if it was resident.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.remove(key)?;
        let (_, value) = self.order.remove(idx)?;
        self.stats.record_removal();
        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.evict_oldest()?;
        self.index.remove(&key);
        self.stats.record_removal();
        Some((key, value))
    }

    /// The entry that the next overflowing insertion would evict.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.peek_oldest().map(|(key, value)| (key, value))
    }

    // == Clear ==
    /// Drops every entry. Capacity and statistics are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Iterates entries from most to least recently used without touching them.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|(key, value)| (key, value))
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::new();
    }

    fn touch<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&idx) => {
                self.order.touch(idx);
                self.stats.record_hit();
                trace!("cache hit");
                Some(idx)
            }
            None => {
                self.stats.record_miss();
                trace!("cache miss");
                None
            }
        }
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.evict_oldest()?;
        self.index.remove(&key);
        self.stats.record_eviction();
        debug!(
            len = self.index.len(),
            capacity = self.capacity,
            "evicted least recently used entry"
        );
        Some((key, value))
    }
}
