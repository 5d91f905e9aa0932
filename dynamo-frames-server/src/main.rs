//! dynamo-frames server CLI
//!
//! Run with: `cargo run -p dynamo-frames-server -- --help`

use dynamo_frames_server::{
    telemetry::{init_logging, TelemetryConfig},
    DynamoFramesServer, ServerConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI + env via clap
    let config = ServerConfig::from_args();
    config.validate()?;

    let telemetry_config = TelemetryConfig::with_server_config(&config);
    init_logging(&telemetry_config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.listen_addr,
        cors = config.cors_enabled,
        default_region = %config.default_region,
        endpoint = config.endpoint_str(),
        scan_page_size = ?config.scan_page_size,
        scan_max_pages = ?config.scan_max_pages,
        log_format = ?telemetry_config.log_format,
        sensitive_data = ?telemetry_config.sensitive_data,
        "Starting dynamo-frames server"
    );

    let server = DynamoFramesServer::new(config);
    server.run().await.map_err(Into::into)
}
