//! Configuration management for the engine
//!
//! This module handles loading, validation, and management of all configuration.

pub mod loader;
pub mod models;

pub use models::*;

use crate::utils::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Worker pool configuration
    #[serde(default)]
    pub engine: EngineConfig,
    /// Deletion pipeline configuration
    #[serde(default)]
    pub deletion: DeletionConfig,
    /// Word frequency pipeline configuration
    #[serde(default)]
    pub word_frequency: WordFrequencyConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| EngineError::Config(format!("Server config error: {}", e)))?;
        self.engine
            .validate()
            .map_err(|e| EngineError::Config(format!("Engine config error: {}", e)))?;
        self.deletion
            .validate()
            .map_err(|e| EngineError::Config(format!("Deletion config error: {}", e)))?;
        self.word_frequency
            .validate()
            .map_err(|e| EngineError::Config(format!("Word frequency config error: {}", e)))?;
        self.storage
            .database
            .validate()
            .map_err(|e| EngineError::Config(format!("Database config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| EngineError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
