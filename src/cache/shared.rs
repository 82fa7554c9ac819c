//! Shared Cache Module
//!
//! Thread-safe handle around a [`BoundedCache`] for use from many tasks.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{BoundedCache, CacheStats};
use crate::error::Result;

// == Shared Cache ==
/// Cloneable, thread-safe handle to a single [`BoundedCache`].
///
/// Every operation, reads included, takes one exclusive lock for its whole
/// duration, because a `get` reorders recency. The lock is a synchronous
/// `std::sync::Mutex` and is never held across an `.await`, so the handle
/// can be used from tokio tasks and OS threads alike.
///
/// A `set` that evicts is a single step under the lock: no other caller can
/// observe the cache over capacity or with both entries missing.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<BoundedCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a shared cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        BoundedCache::new(capacity).map(Self::from_cache)
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: BoundedCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Runs `f` with exclusive access to the cache.
    ///
    /// Use this for compound steps that must be atomic. `f` must not call
    /// back into this handle.
    pub fn with<R>(&self, f: impl FnOnce(&mut BoundedCache<K, V>) -> R) -> R {
        f(&mut self.lock())
    }

    // == Get ==
    /// Returns a copy of the value for `key` and marks it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.lock().get(key).cloned()
    }

    /// Returns the value for `key`, or `default` without inserting it.
    pub fn get_or<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).unwrap_or(default)
    }

    /// Returns the cached value, or computes, stores and returns a new one.
    ///
    /// The lookup and the insert happen under one lock acquisition, so two
    /// callers racing on the same key compute it once.
    pub fn get_or_insert_with(&self, key: K, f: impl FnOnce() -> V) -> V
    where
        V: Clone,
    {
        let mut cache = self.lock();
        if let Some(value) = cache.get(&key) {
            return value.clone();
        }
        let value = f();
        cache.set(key, value.clone());
        value
    }

    // == Set ==
    /// Stores a key-value pair, returning the evicted entry if any.
    pub fn set(&self, key: K, value: V) -> Option<(K, V)> {
        self.lock().set(key, value)
    }

    /// Stores a key-value pair, returning the previous value for that key.
    pub fn replace(&self, key: K, value: V) -> Option<V> {
        self.lock().replace(key, value)
    }

    // == Contains ==
    /// Membership probe. Does not count as a use.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().contains(key)
    }

    // == Remove ==
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().remove(key)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    // == Stats ==
    /// Returns a copy of the current statistics.
    pub fn snapshot_stats(&self) -> CacheStats {
        self.lock().stats().clone()
    }

    // A poisoned lock is reused as-is. The cache stays consistent across a
    // panic as long as the key's Hash and Eq impls do not panic; a panicking
    // Clone happens before any slot is linked.
    fn lock(&self) -> MutexGuard<'_, BoundedCache<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
