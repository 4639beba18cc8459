//! Result cache implementation

use super::types::{AtomicCacheStats, CacheEntry, CacheStats, WordQueryKey};
use crate::config::ResultCacheConfig;
use crate::core::word_count::WordFrequency;
use crate::utils::error::{EngineError, Result};
use lru::LruCache;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::debug;

type CachedWords = Arc<Vec<WordFrequency>>;

/// Memoizes word frequency results by query parameters
#[derive(Debug)]
pub struct ResultCache {
    entries: RwLock<LruCache<WordQueryKey, CacheEntry<CachedWords>>>,
    ttl: Duration,
    enabled: bool,
    stats: AtomicCacheStats,
}

impl ResultCache {
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            EngineError::cache("Invalid cache configuration: max_entries must be greater than 0")
        })?;

        Ok(Self {
            entries: RwLock::new(LruCache::new(capacity)),
            ttl,
            enabled: true,
            stats: AtomicCacheStats::default(),
        })
    }

    /// Build from configuration. A disabled cache never stores anything.
    pub fn from_config(config: &ResultCacheConfig) -> Result<Self> {
        let mut cache = Self::new(config.max_entries.max(1), Duration::from_secs(config.ttl))?;
        cache.enabled = config.enabled;
        Ok(cache)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cached result for `key`, if present and fresh
    pub fn get(&self, key: &WordQueryKey) -> Option<CachedWords> {
        if !self.enabled {
            return None;
        }

        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key: {:?}", key);
                return Some(Arc::clone(&entry.value));
            }
            Some(_) => {
                entries.pop(key);
                self.stats.expirations.fetch_add(1, Ordering::Relaxed);
            }
            None => {}
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store the result for `key`
    pub fn put(&self, key: WordQueryKey, words: Vec<WordFrequency>) -> CachedWords {
        let value = Arc::new(words);
        if !self.enabled {
            return value;
        }

        let entry = CacheEntry::new(Arc::clone(&value), self.ttl);
        let mut entries = self.entries.write();
        if let Some((evicted, _)) = entries.push(key.clone(), entry) {
            if evicted != key {
                self.stats.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
        debug!("Cached result for key: {:?}", key);
        value
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics (lock-free counters plus current size)
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }

    /// Drop every entry and reset statistics
    pub fn clear(&self) {
        self.entries.write().clear();
        self.stats.reset();
    }
}
