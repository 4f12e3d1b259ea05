//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

use crate::cache::CachePolicy;

/// Cache configuration parameters.
///
/// Policy and capacity are the only recognized options. Both are fixed for
/// the lifetime of a cache built from this config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Eviction policy
    pub policy: CachePolicy,
    /// Maximum number of resident entries
    pub capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_POLICY` - `none`, `lru` or `lfu` (default: lru)
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    ///
    /// Unparseable values fall back to the defaults. A capacity of zero is
    /// passed through and rejected when the cache is built.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            policy: env::var("CACHE_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.policy),
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: CachePolicy::Lru,
            capacity: 1000,
        }
    }
}
