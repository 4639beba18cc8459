//! Deletion pipeline configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Largest batch whose DELETE stays within the bind parameter limit of every
/// supported backend (SQLite's default of 32766 is the tightest)
pub const MAX_BATCH_SIZE: usize = 32_766;

/// When a deletion request returns to its caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Return after every batch has executed
    #[default]
    Await,
    /// Return once every batch is submitted; the table stays locked until
    /// the batches drain
    Background,
}

/// Deletion pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionConfig {
    /// Maximum ids per DELETE statement
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Column compared against the cutoff
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
    /// Tables that may be purged. Empty means any valid identifier.
    #[serde(default)]
    pub allowed_tables: Vec<String>,
    /// Dispatch behaviour
    #[serde(default)]
    pub dispatch: DispatchMode,
}

impl Default for DeletionConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            timestamp_column: default_timestamp_column(),
            allowed_tables: Vec::new(),
            dispatch: DispatchMode::default(),
        }
    }
}

impl DeletionConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn with_allowed_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tables = tables.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        if self.batch_size > MAX_BATCH_SIZE {
            return Err(format!(
                "batch_size must be at most {} (one bind parameter per id)",
                MAX_BATCH_SIZE
            ));
        }
        if self.timestamp_column.trim().is_empty() {
            return Err("timestamp_column cannot be empty".to_string());
        }
        Ok(())
    }
}
