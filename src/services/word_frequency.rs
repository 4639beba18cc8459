//! Top-k word frequencies over a directory tree

use crate::config::WordFrequencyConfig;
use crate::core::batch::{FileListPartitioner, WorkerPool};
use crate::core::cache_manager::{ResultCache, WordQueryKey};
use crate::core::word_count::{BloomFilter, FrequencyTable, WordFrequency, count_file, top_k};
use crate::utils::error::{EngineError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Computes and memoizes word frequency rankings
pub struct WordFrequencyService {
    pool: WorkerPool,
    cache: Arc<ResultCache>,
    partitioner: FileListPartitioner,
    config: WordFrequencyConfig,
}

impl WordFrequencyService {
    pub fn new(pool: WorkerPool, config: WordFrequencyConfig) -> Result<Self> {
        let cache = Arc::new(ResultCache::from_config(&config.cache)?);
        Ok(Self::with_cache(pool, cache, config))
    }

    pub fn with_cache(pool: WorkerPool, cache: Arc<ResultCache>, config: WordFrequencyConfig) -> Self {
        Self {
            pool,
            cache,
            partitioner: FileListPartitioner::new(config.file_suffix.clone()),
            config,
        }
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Count used when the caller does not supply one
    pub fn default_top_count(&self) -> i64 {
        self.config.default_top_count
    }

    /// The `top_count` most frequent words longer than `min_length` in every
    /// matching file below `folder_path`.
    pub async fn get_top_words(
        &self,
        folder_path: &str,
        min_length: i64,
        top_count: i64,
    ) -> Result<Vec<WordFrequency>> {
        let min_length = usize::try_from(min_length).map_err(|_| {
            EngineError::validation(format!(
                "minLength must not be negative, got {}",
                min_length
            ))
        })?;

        let key = WordQueryKey::new(folder_path, min_length, top_count);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.as_ref().clone());
        }

        info!(folder = folder_path, min_length, top_count, "Start counting words");

        let root = PathBuf::from(folder_path);
        let partitioner = self.partitioner.clone();
        let units = tokio::task::spawn_blocking(move || partitioner.partition(&root))
            .await
            .map_err(|e| EngineError::worker(format!("file discovery failed: {}", e)))??;
        let files = units.len();

        let table = Arc::new(self.new_table());
        let shared = Arc::clone(&table);
        let report = self
            .pool
            .run_blocking("word-frequency", units, move |unit| {
                count_file(&unit, min_length, &shared)
            })
            .await;

        let words = top_k(table.snapshot(), top_count);
        info!(
            folder = folder_path,
            files,
            distinct = table.len(),
            failed = report.failed(),
            "word counting finished"
        );

        if report.is_clean() {
            self.cache.put(key, words.clone());
        } else {
            warn!(
                folder = folder_path,
                failed = report.failed(),
                "not caching result with failed files"
            );
        }
        Ok(words)
    }

    fn new_table(&self) -> FrequencyTable {
        let bloom = &self.config.bloom_filter;
        if bloom.enabled {
            FrequencyTable::with_filter(Box::new(BloomFilter::from_config(bloom)))
        } else {
            FrequencyTable::new()
        }
    }
}
