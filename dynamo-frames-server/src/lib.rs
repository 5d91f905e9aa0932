//! dynamo-frames HTTP Server
//!
//! An HTTP data source backend that scans DynamoDB tables and returns them as
//! columnar data frames.
//!
//! # Features
//!
//! - Multi-query requests, one frame per `refId`
//! - Per-request data source settings (region, static credentials)
//! - Data source check endpoint
//! - CORS support
//!
//! # Example
//!
//! ```ignore
//! use dynamo_frames_server::{DynamoFramesServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let server = DynamoFramesServer::new(config);
//!     server.run().await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod routes;
pub mod settings;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{QueryError, Result, ServerError};
pub use frame::{Frame, FrameField};
pub use settings::{InstanceSettings, PluginContext, PluginSettings};
pub use state::{AppState, DynamoDbSourceFactory, SourceFactory, StaticSourceFactory};
pub use telemetry::{init_logging, TelemetryConfig};

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// dynamo-frames HTTP Server
pub struct DynamoFramesServer {
    /// Application state
    state: Arc<AppState>,
    /// Configured router
    router: Router,
}

impl DynamoFramesServer {
    /// Create a new server backed by DynamoDB
    pub fn new(config: ServerConfig) -> Self {
        let telemetry_config = TelemetryConfig::with_server_config(&config);
        Self::from_state(AppState::new(config, telemetry_config))
    }

    /// Create a server with a custom source factory
    pub fn with_sources(config: ServerConfig, sources: Arc<dyn SourceFactory>) -> Self {
        let telemetry_config = TelemetryConfig::with_server_config(&config);
        Self::from_state(AppState::with_sources(config, telemetry_config, sources))
    }

    fn from_state(state: AppState) -> Self {
        let state = Arc::new(state);
        let router = routes::build_router(state.clone());
        Self { state, router }
    }

    /// Get a reference to the application state
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Get the router for testing
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let addr = self.state.config.listen_addr;
        let listener = TcpListener::bind(addr).await?;

        info!(
            addr = %addr,
            default_region = %self.state.config.default_region,
            endpoint = self.state.config.endpoint_str(),
            "dynamo-frames server starting"
        );

        axum::serve(listener, self.router).await
    }
}
