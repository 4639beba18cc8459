//! Result cache for word frequency queries
//!
//! An LRU bounded by entry count, with a per-entry TTL and lock-free hit/miss
//! statistics. Deletion requests never go through it.

pub mod manager;
pub mod types;


pub use manager::ResultCache;
pub use types::{CacheEntry, CacheStats, WordQueryKey};
