//! Configuration loading utilities
//!
//! Environment variables override values loaded from file or defaults.

use super::Config;
use super::models::DispatchMode;
use crate::utils::error::{EngineError, Result};
use std::env;
use std::str::FromStr;
use tracing::debug;

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| EngineError::Config(format!("Invalid {}: {}", key, e)))
}

impl Config {
    /// Apply `BULKOPS_*` and `DATABASE_URL` overrides
    pub fn with_env_overrides(mut self) -> Result<Self> {
        debug!("Applying configuration overrides from environment variables");

        // Server configuration
        if let Ok(host) = env::var("BULKOPS_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("BULKOPS_PORT") {
            self.server.port = parse_env("BULKOPS_PORT", &port)?;
        }

        // Engine configuration
        if let Ok(threads) = env::var("BULKOPS_WORKER_THREADS") {
            self.engine.worker_threads = Some(parse_env("BULKOPS_WORKER_THREADS", &threads)?);
        }

        // Deletion configuration
        if let Ok(batch_size) = env::var("BULKOPS_DELETE_BATCH_SIZE") {
            self.deletion.batch_size = parse_env("BULKOPS_DELETE_BATCH_SIZE", &batch_size)?;
        }
        if let Ok(column) = env::var("BULKOPS_TIMESTAMP_COLUMN") {
            self.deletion.timestamp_column = column;
        }
        if let Ok(tables) = env::var("BULKOPS_ALLOWED_TABLES") {
            self.deletion.allowed_tables = tables
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
        }
        if let Ok(mode) = env::var("BULKOPS_DELETE_DISPATCH") {
            self.deletion.dispatch = match mode.to_lowercase().as_str() {
                "await" => DispatchMode::Await,
                "background" => DispatchMode::Background,
                other => {
                    return Err(EngineError::Config(format!(
                        "Invalid BULKOPS_DELETE_DISPATCH: {}",
                        other
                    )));
                }
            };
        }

        // Word frequency configuration
        if let Ok(suffix) = env::var("BULKOPS_FILE_SUFFIX") {
            self.word_frequency.file_suffix = suffix;
        }

        // Database configuration
        if let Ok(db_url) = env::var("DATABASE_URL") {
            self.storage.database.url = db_url;
        }
        if let Ok(max_conn) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.storage.database.max_connections =
                parse_env("DATABASE_MAX_CONNECTIONS", &max_conn)?;
        }

        // Logging configuration
        if let Ok(level) = env::var("BULKOPS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(json) = env::var("BULKOPS_LOG_JSON") {
            self.logging.json = parse_env("BULKOPS_LOG_JSON", &json)?;
        }

        Ok(self)
    }
}
