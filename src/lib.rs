//! Policy Cache - A bounded in-process key-value cache
//!
//! Provides insert/lookup/remove/clear with a fixed capacity and a choice of
//! no eviction, LRU eviction or LFU eviction.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, CachePolicy, CacheStats};
pub use config::Config;
pub use error::{CacheError, Result};
