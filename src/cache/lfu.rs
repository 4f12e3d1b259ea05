//! LFU Tracker Module
//!
//! Implements Least Frequently Used tracking for cache eviction.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Ordering key for a tracked entry: touch count, then insertion sequence.
type Rank = (u64, u64);

// == LFU Tracker ==
/// Tracks touch counts for LFU eviction strategy.
///
/// A key's counter is 1 after the insert that creates it and grows by one on
/// every later touch. Keys are kept in a `BTreeMap` ordered by
/// `(count, insertion sequence)`, so the eviction candidate is the key with the
/// lowest count, and among equal counts the one inserted first. Touch, remove
/// and candidate lookup are O(log n).
#[derive(Debug)]
pub struct LfuTracker<K> {
    index: HashMap<K, Rank>,
    ranked: BTreeMap<Rank, K>,
    next_seq: u64,
}

impl<K> Default for LfuTracker<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            ranked: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<K> LfuTracker<K>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new empty LFU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Increments the key's counter, starting it at 1 if the key is new.
    pub fn touch(&mut self, key: &K) {
        let (rank, owned) = match self.index.get_mut(key) {
            Some(rank) => {
                let old = *rank;
                rank.0 = rank.0.saturating_add(1);
                let owned = self.ranked.remove(&old).unwrap_or_else(|| key.clone());
                (*rank, owned)
            }
            None => {
                let rank = (1, self.next_seq);
                self.next_seq += 1;
                self.index.insert(key.clone(), rank);
                (rank, key.clone())
            }
        };
        self.ranked.insert(rank, owned);
    }

    // == Remove ==
    /// Drops the key's counter. No-op if the key is not tracked.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(rank) = self.index.remove(key) {
            self.ranked.remove(&rank);
        }
    }

    // == Candidate ==
    /// Returns the least frequently used key other than `protect`.
    ///
    /// Ties on count go to the key inserted first.
    pub fn candidate(&self, protect: Option<&K>) -> Option<&K> {
        self.ranked.values().find(|key| Some(*key) != protect)
    }

    // == Frequency ==
    /// Returns the key's current touch count.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|(count, _)| *count)
    }

    // == Clear ==
    /// Forgets every tracked key.
    ///
    /// The insertion sequence keeps counting so ordering stays unambiguous.
    pub fn clear(&mut self) {
        self.index.clear();
        self.ranked.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
