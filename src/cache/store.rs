//! Entry Store Module
//!
//! Exact-match key -> value storage backing the cache engine.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

// == Entry Store ==
/// Associative storage owned by one cache instance.
///
/// Implementations must not evict on their own. Capacity and eviction order are
/// decided entirely by the engine, so a store that drops entries behind its back
/// would leave the policy tracker pointing at keys that no longer exist.
pub trait EntryStore<K, V> {
    /// Inserts or overwrites, returning the previous value for `key`.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up the stored key and value.
    fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Looks up the stored value.
    fn get<'a, Q>(&'a self, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q> + 'a,
        V: 'a,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning its value if it was present.
    fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Removes every entry.
    fn clear(&mut self);

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == HashMap Store ==
/// Default [`EntryStore`] on top of a plain `HashMap`.
#[derive(Debug)]
pub struct HashMapStore<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for HashMapStore<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, V> HashMapStore<K, V>
where
    K: Hash + Eq,
{
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, V> EntryStore<K, V> for HashMapStore<K, V>
where
    K: Hash + Eq,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get_key_value(key)
    }

    fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
