//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::WorkerPool;
use crate::services::{DeletionService, WordFrequencyService};
use crate::storage::RowStore;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Both services run on the same worker pool, so concurrency across every
/// request never exceeds its size.
#[derive(Clone)]
pub struct AppState {
    /// Engine configuration (shared read-only)
    pub config: Arc<Config>,
    /// Shared worker pool
    pub pool: WorkerPool,
    /// Row purging
    pub deletion: Arc<DeletionService>,
    /// Word frequency ranking
    pub words: Arc<WordFrequencyService>,
}

impl AppState {
    /// Wire the services over `store`
    pub fn new(config: Config, store: Arc<dyn RowStore>) -> Result<Self> {
        let pool = WorkerPool::from_config(&config.engine);
        let deletion = DeletionService::new(store, pool.clone(), config.deletion.clone())?;
        let words = WordFrequencyService::new(pool.clone(), config.word_frequency.clone())?;

        Ok(Self {
            config: Arc::new(config),
            pool,
            deletion: Arc::new(deletion),
            words: Arc::new(words),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
