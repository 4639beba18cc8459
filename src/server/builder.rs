//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::utils::error::{EngineError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    state: Option<AppState>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use pre-wired services instead of connecting to the configured database
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        match (self.config, self.state) {
            (_, Some(state)) => Ok(HttpServer::with_state(state.config.server.clone(), state)),
            (Some(config), None) => HttpServer::new(&config).await,
            (None, None) => Err(EngineError::config("Configuration is required")),
        }
    }
}

/// Run the server with `config`
pub async fn run_server(config: Config) -> Result<()> {
    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Server starting at: http://{}", server.config().address());
    info!("API Endpoints:");
    info!("   GET    /health - Health check");
    info!("   DELETE /api/v1/tables/{{table_name}}?olderThan=<date-time> - Purge old rows");
    info!("   GET    /api/v1/words/frequency?folderPath=..&minLength=..&topCount=.. - Top words");

    server.start().await
}
