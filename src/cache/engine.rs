//! Cache Engine Module
//!
//! Main cache engine combining an entry store with a policy tracker and
//! enforcing the capacity bound on every insert.

use std::borrow::Borrow;
use std::hash::Hash;
use std::marker::PhantomData;

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::cache::{CachePolicy, CacheStats, EntryStore, HashMapStore, PolicyTracker};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache Core ==
/// Unsynchronized cache engine.
///
/// Every method that changes the store also updates the tracker before it
/// returns, so after any call the two agree on which keys are resident and,
/// under `Lru`/`Lfu`, `len() <= capacity()`. [`Cache`] wraps this in a mutex
/// for shared use.
#[derive(Debug)]
pub struct CacheCore<K, V, S = HashMapStore<K, V>> {
    /// Key-value storage
    store: S,
    /// Eviction bookkeeping for the active policy
    tracker: PolicyTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    policy: CachePolicy,
    /// Maximum number of resident entries
    capacity: usize,
    _value: PhantomData<V>,
}

impl<K, V> CacheCore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache backed by a `HashMap`.
    ///
    /// Fails with [`CacheError::InvalidCapacity`] when `capacity` is zero.
    /// Any positive capacity is accepted; nothing is allocated up front.
    pub fn new(policy: CachePolicy, capacity: usize) -> Result<Self> {
        Self::with_store(policy, capacity, HashMapStore::new())
    }
}

impl<K, V, S> CacheCore<K, V, S>
where
    K: Hash + Eq + Clone,
    S: EntryStore<K, V>,
{
    /// Creates a cache on top of a caller-supplied, empty backing store.
    pub fn with_store(policy: CachePolicy, capacity: usize, store: S) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        if !store.is_empty() {
            return Err(CacheError::StoreNotEmpty(store.len()));
        }

        info!(%policy, capacity, "cache created");
        Ok(Self {
            store,
            tracker: PolicyTracker::for_policy(policy),
            stats: CacheStats::new(),
            policy,
            capacity,
            _value: PhantomData,
        })
    }

    // == Insert ==
    /// Stores `value` under `key` and counts it as a touch.
    ///
    /// Overwriting a resident key replaces its value without growing the cache.
    /// If the insert pushes the cache over capacity, the policy's candidate is
    /// evicted. The key just inserted is never that candidate.
    pub fn insert(&mut self, key: K, value: V) {
        self.store.put(key.clone(), value);
        self.tracker.on_touch(&key);
        self.enforce_capacity(&key);
    }

    fn enforce_capacity(&mut self, protect: &K) {
        while self.store.len() > self.capacity {
            let Some(victim) = self.tracker.eviction_candidate(Some(protect)) else {
                trace!(
                    policy = %self.policy,
                    len = self.store.len(),
                    capacity = self.capacity,
                    "over capacity with no eviction candidate"
                );
                break;
            };
            self.store.delete(&victim);
            self.tracker.on_remove(&victim);
            self.stats.record_eviction();
            debug!(policy = %self.policy, evictions = self.stats.evictions, "evicted entry");
        }
    }

    // == Lookup ==
    /// Returns a copy of the value for `key`.
    ///
    /// A hit counts as a touch. A miss leaves policy state alone.
    pub fn lookup<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        match self.store.get_key_value(key) {
            Some((resident, value)) => {
                self.tracker.on_touch(resident);
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Returns the value for `key` without counting a touch or a hit.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.get(key)
    }

    // == Contains ==
    /// Checks if `key` is resident, without counting a touch.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.get(key).is_some()
    }

    // == Remove ==
    /// Removes `key`, returning its value. No-op if the key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.store.delete(key)?;
        self.tracker.on_remove(key);
        Some(removed)
    }

    // == Clear ==
    /// Drops every entry and all policy state.
    ///
    /// Hit, miss and eviction counters survive; see [`reset_stats`](Self::reset_stats).
    pub fn clear(&mut self) {
        let dropped = self.store.len();
        self.store.clear();
        self.tracker.clear();
        debug!(policy = %self.policy, dropped, "cache cleared");
    }

    // == Stats ==
    /// Returns current cache statistics.
    ///
    /// `total_entries` is read from the store at call time.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.store.len());
        stats
    }

    /// Zeroes the hit, miss and eviction counters.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::new();
    }

    // == Introspection ==
    /// Returns the current number of resident entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the capacity fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the eviction policy fixed at construction.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Number of keys the policy tracker holds state for.
    ///
    /// Equals `len()` under `Lru` and `Lfu`; always 0 under `None`.
    pub fn tracked_len(&self) -> usize {
        self.tracker.len()
    }

    /// Touch count for `key` under `Lfu`, None otherwise.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match &self.tracker {
            PolicyTracker::Lfu(lfu) => lfu.frequency(key),
            _ => None,
        }
    }
}

// == Cache ==
/// Thread-safe cache.
///
/// All operations take one lock that covers both the store and the tracker,
/// so no caller can observe a value stored without its policy update.
#[derive(Debug)]
pub struct Cache<K, V, S = HashMapStore<K, V>> {
    inner: Mutex<CacheCore<K, V, S>>,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates an empty cache backed by a `HashMap`.
    ///
    /// Fails with [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(policy: CachePolicy, capacity: usize) -> Result<Self> {
        CacheCore::new(policy, capacity).map(Self::from_core)
    }

    /// Creates a cache from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.policy, config.capacity)
    }
}

impl<K, V, S> Cache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: EntryStore<K, V>,
{
    /// Creates a cache on top of a caller-supplied, empty backing store.
    pub fn with_store(policy: CachePolicy, capacity: usize, store: S) -> Result<Self> {
        CacheCore::with_store(policy, capacity, store).map(Self::from_core)
    }

    fn from_core(core: CacheCore<K, V, S>) -> Self {
        Self {
            inner: Mutex::new(core),
        }
    }

    /// See [`CacheCore::insert`].
    pub fn insert(&self, key: K, value: V) {
        self.inner.lock().insert(key, value);
    }

    /// See [`CacheCore::lookup`].
    pub fn lookup<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().lookup(key)
    }

    /// Returns a copy of the value for `key` without counting a touch.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Checks if `key` is resident, without counting a touch.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains_key(key)
    }

    /// See [`CacheCore::remove`].
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    /// See [`CacheCore::clear`].
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Zeroes the hit, miss and eviction counters.
    pub fn reset_stats(&self) {
        self.inner.lock().reset_stats();
    }

    /// Returns the current number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns the capacity fixed at construction.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns the eviction policy fixed at construction.
    pub fn policy(&self) -> CachePolicy {
        self.inner.lock().policy()
    }

    /// See [`CacheCore::tracked_len`].
    pub fn tracked_len(&self) -> usize {
        self.inner.lock().tracked_len()
    }

    /// See [`CacheCore::frequency`].
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().frequency(key)
    }
}
