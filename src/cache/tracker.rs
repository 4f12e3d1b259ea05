//! Policy Tracker Module
//!
//! Binds a policy to its bookkeeping structure behind one touch/remove/candidate
//! contract, so the engine runs a single eviction path for every policy.

use std::borrow::Borrow;
use std::hash::Hash;

use crate::cache::{CachePolicy, LfuTracker, LruTracker};

// == Policy Tracker ==
/// Per-policy eviction bookkeeping.
#[derive(Debug)]
pub enum PolicyTracker<K> {
    /// Records nothing and never nominates a key.
    Null,
    /// Recency order.
    Lru(LruTracker<K>),
    /// Touch counts.
    Lfu(LfuTracker<K>),
}

impl<K> PolicyTracker<K>
where
    K: Hash + Eq + Clone,
{
    /// Builds an empty tracker for `policy`.
    ///
    /// Storage grows with the tracked keys; capacity is only ever a bound.
    pub fn for_policy(policy: CachePolicy) -> Self {
        match policy {
            CachePolicy::None => PolicyTracker::Null,
            CachePolicy::Lru => PolicyTracker::Lru(LruTracker::new()),
            CachePolicy::Lfu => PolicyTracker::Lfu(LfuTracker::new()),
        }
    }

    /// Records an insert or successful lookup of `key`.
    pub fn on_touch(&mut self, key: &K) {
        match self {
            PolicyTracker::Null => {}
            PolicyTracker::Lru(lru) => lru.touch(key),
            PolicyTracker::Lfu(lfu) => lfu.touch(key),
        }
    }

    /// Forgets `key` after it left the store by any path.
    pub fn on_remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self {
            PolicyTracker::Null => {}
            PolicyTracker::Lru(lru) => lru.remove(key),
            PolicyTracker::Lfu(lfu) => lfu.remove(key),
        }
    }

    /// Nominates the next key to evict, never `protect`.
    pub fn eviction_candidate(&self, protect: Option<&K>) -> Option<K> {
        match self {
            PolicyTracker::Null => None,
            PolicyTracker::Lru(lru) => lru.candidate(protect).cloned(),
            PolicyTracker::Lfu(lfu) => lfu.candidate(protect).cloned(),
        }
    }

    pub fn clear(&mut self) {
        match self {
            PolicyTracker::Null => {}
            PolicyTracker::Lru(lru) => lru.clear(),
            PolicyTracker::Lfu(lfu) => lfu.clear(),
        }
    }

    /// Number of keys the tracker currently holds state for.
    pub fn len(&self) -> usize {
        match self {
            PolicyTracker::Null => 0,
            PolicyTracker::Lru(lru) => lru.len(),
            PolicyTracker::Lfu(lfu) => lfu.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
