//! Cache Module
//!
//! Provides a bounded in-process cache with pluggable None/LRU/LFU eviction.

mod engine;
mod lfu;
mod lru;
mod policy;
mod stats;
mod store;
mod tracker;


// Re-export public types
pub use engine::{Cache, CacheCore};
pub use lfu::LfuTracker;
pub use lru::LruTracker;
pub use policy::CachePolicy;
pub use stats::CacheStats;
pub use store::{EntryStore, HashMapStore};
pub use tracker::PolicyTracker;
