//! Word frequency pipeline configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Word frequency pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordFrequencyConfig {
    /// Only files whose name ends with this suffix are read
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,
    /// Number of words returned when the caller gives none
    #[serde(default = "default_top_count")]
    pub default_top_count: i64,
    /// Approximate membership pre-filter
    #[serde(default)]
    pub bloom_filter: BloomFilterConfig,
    /// Result cache
    #[serde(default)]
    pub cache: ResultCacheConfig,
}

impl Default for WordFrequencyConfig {
    fn default() -> Self {
        Self {
            file_suffix: default_file_suffix(),
            default_top_count: default_top_count(),
            bloom_filter: BloomFilterConfig::default(),
            cache: ResultCacheConfig::default(),
        }
    }
}

impl WordFrequencyConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.file_suffix.is_empty() {
            return Err("file_suffix cannot be empty".to_string());
        }
        self.bloom_filter.validate()?;
        self.cache.validate()
    }
}

/// Bloom filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloomFilterConfig {
    /// Enable the pre-filter
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Expected number of distinct words per job
    #[serde(default = "default_bloom_expected_items")]
    pub expected_items: usize,
    /// Target false positive probability
    #[serde(default = "default_bloom_false_positive_rate")]
    pub false_positive_rate: f64,
}

impl Default for BloomFilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expected_items: default_bloom_expected_items(),
            false_positive_rate: default_bloom_false_positive_rate(),
        }
    }
}

impl BloomFilterConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.expected_items == 0 {
            return Err("bloom_filter.expected_items must be greater than 0".to_string());
        }
        if !(self.false_positive_rate > 0.0 && self.false_positive_rate < 1.0) {
            return Err("bloom_filter.false_positive_rate must be in (0, 1)".to_string());
        }
        Ok(())
    }
}

/// Result cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultCacheConfig {
    /// Enable result caching
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum number of cached results
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
    /// Time to live in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl: u64,
}

impl Default for ResultCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_cache_max_entries(),
            ttl: default_cache_ttl(),
        }
    }
}

impl ResultCacheConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.max_entries == 0 {
            return Err("cache.max_entries must be greater than 0".to_string());
        }
        Ok(())
    }
}
