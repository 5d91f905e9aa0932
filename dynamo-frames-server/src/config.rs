//! Server configuration

use clap::Parser;
use std::net::SocketAddr;

/// Region used when neither the query nor the data source settings name one
pub const DEFAULT_REGION: &str = "us-east-1";

/// dynamo-frames HTTP server configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "dynamo-frames-server")]
#[command(about = "Serves DynamoDB tables as data frames over HTTP")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "DYNAMO_FRAMES_LISTEN_ADDR", default_value = "0.0.0.0:8090")]
    pub listen_addr: SocketAddr,

    /// Enable CORS (Cross-Origin Resource Sharing)
    #[arg(long, env = "DYNAMO_FRAMES_CORS_ENABLED", default_value = "true")]
    pub cors_enabled: bool,

    /// Request body size limit in bytes (default 10MB)
    #[arg(long, env = "DYNAMO_FRAMES_BODY_LIMIT", default_value = "10485760")]
    pub body_limit: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DYNAMO_FRAMES_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    // === DynamoDB access ===
    /// Region used when neither the query nor the data source sets one
    #[arg(long, env = "DYNAMO_FRAMES_DEFAULT_REGION", default_value = DEFAULT_REGION)]
    pub default_region: String,

    /// DynamoDB endpoint override (e.g. http://localhost:4566 for LocalStack)
    #[arg(long, env = "DYNAMO_FRAMES_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// DynamoDB operation timeout in milliseconds
    #[arg(long, env = "DYNAMO_FRAMES_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Items requested per Scan page
    #[arg(long, env = "DYNAMO_FRAMES_SCAN_PAGE_SIZE")]
    pub scan_page_size: Option<i32>,

    /// Maximum Scan pages per query (unbounded when unset)
    #[arg(long, env = "DYNAMO_FRAMES_SCAN_MAX_PAGES")]
    pub scan_max_pages: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8090)),
            cors_enabled: true,
            body_limit: 10 * 1024 * 1024, // 10MB
            log_level: "info".to_string(),
            default_region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            timeout_ms: None,
            scan_page_size: None,
            scan_max_pages: None,
        }
    }
}

impl ServerConfig {
    /// Create config from CLI args
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Validate configuration at startup
    pub fn validate(&self) -> Result<(), String> {
        if self.default_region.trim().is_empty() {
            return Err("default_region must not be empty".to_string());
        }
        if matches!(self.scan_page_size, Some(n) if n <= 0) {
            return Err("scan_page_size must be positive".to_string());
        }
        if self.scan_max_pages == Some(0) {
            return Err("scan_max_pages must be positive".to_string());
        }
        if self.body_limit == 0 {
            return Err("body_limit must be positive".to_string());
        }
        Ok(())
    }

    /// Endpoint description for logging
    pub fn endpoint_str(&self) -> &str {
        self.endpoint_url.as_deref().unwrap_or("aws")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_clap_defaults() {
        let parsed = ServerConfig::try_parse_from(["dynamo-frames-server"]).unwrap();
        let default = ServerConfig::default();
        assert_eq!(parsed.listen_addr, default.listen_addr);
        assert_eq!(parsed.cors_enabled, default.cors_enabled);
        assert_eq!(parsed.body_limit, default.body_limit);
        assert_eq!(parsed.default_region, default.default_region);
        assert_eq!(parsed.endpoint_url, None);
    }

    #[test]
    fn test_parse_overrides() {
        let parsed = ServerConfig::try_parse_from([
            "dynamo-frames-server",
            "--listen-addr",
            "127.0.0.1:9000",
            "--default-region",
            "eu-central-1",
            "--endpoint-url",
            "http://localhost:4566",
            "--scan-page-size",
            "25",
        ])
        .unwrap();
        assert_eq!(parsed.listen_addr.port(), 9000);
        assert_eq!(parsed.default_region, "eu-central-1");
        assert_eq!(parsed.endpoint_str(), "http://localhost:4566");
        assert_eq!(parsed.scan_page_size, Some(25));
    }

    #[test]
    fn test_validate() {
        assert!(ServerConfig::default().validate().is_ok());

        let bad = ServerConfig {
            scan_page_size: Some(0),
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = ServerConfig {
            default_region: " ".to_string(),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
