//! Worker pool configuration

use serde::{Deserialize, Serialize};

/// Batch engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fixed number of worker slots shared by all jobs.
    /// Defaults to one less than the number of CPUs, with a floor of one.
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl EngineConfig {
    /// Pin the pool size explicitly
    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = Some(worker_threads);
        self
    }

    /// Effective pool size
    pub fn pool_size(&self) -> usize {
        self.worker_threads
            .unwrap_or_else(|| num_cpus::get().saturating_sub(1))
            .max(1)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.worker_threads == Some(0) {
            return Err("worker_threads must be at least 1".to_string());
        }
        Ok(())
    }
}
