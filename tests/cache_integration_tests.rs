//! Integration Tests for the public cache API
//!
//! Exercises each policy through `Cache` as an external caller would,
//! including shared use from several threads.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use policy_cache::cache::{EntryStore, HashMapStore};
use policy_cache::{Cache, CacheError, CachePolicy, Config};

// == Helper Functions ==

fn cache(policy: CachePolicy, capacity: usize) -> Cache<String, String> {
    Cache::new(policy, capacity).unwrap()
}

fn insert(cache: &Cache<String, String>, key: &str) {
    cache.insert(key.to_string(), format!("value_{key}"));
}

// == Construction ==

#[test]
fn test_zero_capacity_fails_fast() {
    let result: Result<Cache<String, String>, _> = Cache::new(CachePolicy::Lru, 0);
    assert_eq!(result.unwrap_err(), CacheError::InvalidCapacity(0));
}

#[test]
fn test_build_from_config() {
    let config = Config {
        policy: "lfu".parse().unwrap(),
        capacity: 3,
    };
    let cache: Cache<String, String> = Cache::from_config(&config).unwrap();

    assert_eq!(cache.policy(), CachePolicy::Lfu);
    assert_eq!(cache.capacity(), 3);
    assert!(cache.is_empty());
}

#[test]
fn test_unbounded_capacity_is_accepted() {
    let unbounded: Cache<u64, u64> = Cache::new(CachePolicy::None, usize::MAX).unwrap();
    for key in 0..100u64 {
        unbounded.insert(key, key);
    }
    assert_eq!(unbounded.len(), 100);

    let lru: Cache<u64, u64> = Cache::new(CachePolicy::Lru, usize::MAX).unwrap();
    lru.insert(1, 10);
    lru.insert(2, 20);
    assert_eq!(lru.lookup(&1), Some(10));
    assert_eq!(lru.remove(&2), Some(20));
    assert_eq!(lru.tracked_len(), 1);

    // Large finite bounds are accepted the same way
    let lfu: Cache<u64, u64> = Cache::new(CachePolicy::Lfu, usize::MAX / 64).unwrap();
    lfu.insert(1, 10);
    assert_eq!(lfu.lookup(&1), Some(10));
    assert_eq!(lfu.stats().evictions, 0);
}

// == Eviction Order ==

#[test]
fn test_lru_scenario() {
    let cache = cache(CachePolicy::Lru, 2);
    insert(&cache, "a");
    insert(&cache, "b");
    assert_eq!(cache.lookup("a"), Some("value_a".to_string()));
    insert(&cache, "c");

    assert_eq!(cache.lookup("b"), None);
    assert!(cache.contains_key("a"));
    assert!(cache.contains_key("c"));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_lru_first_inserted_evicted() {
    let cache = cache(CachePolicy::Lru, 3);
    for key in ["k1", "k2", "k3", "k4"] {
        insert(&cache, key);
    }

    assert!(!cache.contains_key("k1"));
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn test_lfu_scenario() {
    let cache = cache(CachePolicy::Lfu, 2);
    insert(&cache, "a");
    insert(&cache, "b");
    cache.lookup("a");
    assert_eq!(cache.frequency("a"), Some(2));
    assert_eq!(cache.frequency("b"), Some(1));
    insert(&cache, "c");

    assert!(!cache.contains_key("b"));
    assert!(cache.contains_key("a"));
    assert!(cache.contains_key("c"));
}

#[test]
fn test_none_policy_exceeds_capacity() {
    let cache = cache(CachePolicy::None, 2);
    for key in ["a", "b", "c", "d", "e"] {
        insert(&cache, key);
    }

    assert_eq!(cache.len(), 5);
    assert_eq!(cache.tracked_len(), 0);
    for key in ["a", "b", "c", "d", "e"] {
        assert!(cache.contains_key(key));
    }
}

// == Basic Semantics ==

#[test]
fn test_overwrite_updates_value() {
    for policy in [CachePolicy::None, CachePolicy::Lru, CachePolicy::Lfu] {
        let cache = cache(policy, 4);
        cache.insert("key".to_string(), "v1".to_string());
        cache.insert("key".to_string(), "v2".to_string());

        assert_eq!(cache.lookup("key"), Some("v2".to_string()));
        assert_eq!(cache.len(), 1);
    }
}

#[test]
fn test_remove_and_clear() {
    let cache = cache(CachePolicy::Lru, 4);
    insert(&cache, "a");
    insert(&cache, "b");

    assert_eq!(cache.remove("a"), Some("value_a".to_string()));
    assert_eq!(cache.remove("a"), None);
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.tracked_len(), 0);
    assert_eq!(cache.lookup("b"), None);
}

#[test]
fn test_stats_json() {
    let cache = cache(CachePolicy::Lru, 1);
    insert(&cache, "a");
    cache.lookup("a");
    cache.lookup("missing");
    insert(&cache, "b");

    let json = serde_json::to_value(cache.stats()).unwrap();
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["total_entries"], 1);
}

// == Custom Backing Store ==

/// Store that forwards to a `HashMapStore`, standing in for a host-provided map.
#[derive(Default)]
struct ForwardingStore {
    inner: HashMapStore<u32, u32>,
}

impl EntryStore<u32, u32> for ForwardingStore {
    fn put(&mut self, key: u32, value: u32) -> Option<u32> {
        self.inner.put(key, value)
    }

    fn get_key_value<Q>(&self, key: &Q) -> Option<(&u32, &u32)>
    where
        u32: std::borrow::Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        self.inner.get_key_value(key)
    }

    fn delete<Q>(&mut self, key: &Q) -> Option<u32>
    where
        u32: std::borrow::Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        self.inner.delete(key)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

#[test]
fn test_custom_store() {
    let cache: Cache<u32, u32, ForwardingStore> =
        Cache::with_store(CachePolicy::Lru, 2, ForwardingStore::default()).unwrap();
    for key in 0..5u32 {
        cache.insert(key, key * 10);
    }

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.lookup(&4), Some(40));
    assert_eq!(cache.stats().evictions, 3);
}

// == Concurrency ==

#[test]
fn test_concurrent_access_respects_capacity() {
    let cache: Arc<Cache<u32, u32>> = Arc::new(Cache::new(CachePolicy::Lru, 16).unwrap());

    thread::scope(|scope| {
        for t in 0..8u32 {
            let cache = Arc::clone(&cache);
            scope.spawn(move || {
                for i in 0..500u32 {
                    let key = (t * 31 + i) % 64;
                    if cache.lookup(&key).is_none() {
                        cache.insert(key, key);
                    }
                    if i % 50 == 0 {
                        cache.remove(&((key + 1) % 64));
                    }
                    assert!(cache.len() <= 16);
                }
            });
        }
    });

    assert!(cache.len() <= 16);
    assert_eq!(cache.tracked_len(), cache.len());
    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 8 * 500);
}

#[test]
fn test_concurrent_lfu_values_stay_consistent() {
    let cache: Cache<u32, u32> = Cache::new(CachePolicy::Lfu, 8).unwrap();

    thread::scope(|scope| {
        for t in 0..4u32 {
            let cache = &cache;
            scope.spawn(move || {
                for i in 0..400u32 {
                    let key = (i * 7 + t) % 20;
                    cache.insert(key, key * 2);
                    if let Some(value) = cache.lookup(&key) {
                        assert_eq!(value, key * 2);
                    }
                }
            });
        }
    });

    let resident: HashMap<u32, u32> = (0..20u32)
        .filter_map(|key| cache.peek(&key).map(|value| (key, value)))
        .collect();
    assert_eq!(resident.len(), cache.len());
    assert!(cache.len() <= 8);
    assert_eq!(cache.tracked_len(), cache.len());
}
