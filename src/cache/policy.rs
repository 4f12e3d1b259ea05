//! Cache Policy Module
//!
//! The closed set of eviction policies a cache can be built with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

// == Cache Policy ==
/// Eviction policy, fixed when a cache is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    /// Never evict. Capacity is advisory only.
    None,
    /// Evict the least recently touched key.
    Lru,
    /// Evict the least frequently touched key.
    Lfu,
}

impl CachePolicy {
    /// Returns the lowercase policy name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CachePolicy::None => "none",
            CachePolicy::Lru => "lru",
            CachePolicy::Lfu => "lfu",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(CachePolicy::None),
            "lru" => Ok(CachePolicy::Lru),
            "lfu" => Ok(CachePolicy::Lfu),
            _ => Err(CacheError::UnknownPolicy(s.to_string())),
        }
    }
}
