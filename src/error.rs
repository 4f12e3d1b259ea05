//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Only construction and configuration parsing can fail. Cache operations
/// themselves are total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must be a positive integer
    #[error("Invalid capacity: {0} (capacity must be at least 1)")]
    InvalidCapacity(usize),

    /// Policy name did not match any known policy
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),

    /// A backing store handed to the cache already held entries
    #[error("Backing store is not empty: {0} entries present")]
    StoreNotEmpty(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
