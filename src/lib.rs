//! # bulkops
//!
//! Bounded, concurrent batch jobs over large inputs:
//!
//! - **Table purge**: delete every row older than a cutoff, in id batches
//!   executed on a shared worker pool, with at most one purge per table.
//! - **Word frequency**: rank the most frequent words across a directory tree
//!   of text files using a low-contention concurrent frequency table and a
//!   bounded top-k selection.
//!
//! ## Embedding the engine
//!
//! ```rust,no_run
//! use bulkops::{Config, Engine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/bulkops.yaml").await?;
//!     let engine = Engine::new(config).await?;
//!     engine.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use crate::core::batch::{JobRegistry, WorkerPool};
pub use crate::core::word_count::{FrequencyTable, WordFrequency, top_k};
pub use services::{DeletionReport, DeletionService, WordFrequencyService};
pub use utils::error::{EngineError, Result};

use tracing::info;

/// The service: configuration plus a ready HTTP server
pub struct Engine {
    config: Config,
    server: server::server::HttpServer,
}

impl Engine {
    /// Connect storage and wire the services
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new engine instance");
        let server = server::server::HttpServer::new(&config).await?;
        Ok(Self { config, server })
    }

    /// Serve until shutdown
    pub async fn run(self) -> Result<()> {
        info!("Starting bulkops");
        info!(
            address = %self.config.server.address(),
            pool_size = self.config.engine.pool_size(),
            database = %self.config.storage.database.redacted_url(),
            dispatch = ?self.config.deletion.dispatch,
            "configuration loaded"
        );
        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
