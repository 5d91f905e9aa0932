//! Application state management
//!
//! Handlers share one [`AppState`]. Record sources are not long-lived: every
//! query carries its own data source settings, so a [`SourceFactory`] builds a
//! source per query from those settings and the resolved region.

use crate::config::ServerConfig;
use crate::settings::PluginSettings;
use crate::telemetry::TelemetryConfig;
use async_trait::async_trait;
use dynamo_frames_aws::{load_sdk_config, AwsError, DynamoDbConfig, DynamoDbSource, RecordSource};
use std::fmt;
use std::sync::Arc;

/// Builds a record source for one query
#[async_trait]
pub trait SourceFactory: Send + Sync {
    async fn connect(
        &self,
        settings: &PluginSettings,
        region: &str,
    ) -> Result<Arc<dyn RecordSource>, AwsError>;
}

/// Factory producing DynamoDB sources
///
/// Static credentials from the data source secrets are used when both key
/// halves are present; otherwise the SDK default provider chain applies.
#[derive(Debug, Clone, Default)]
pub struct DynamoDbSourceFactory {
    endpoint: Option<String>,
    timeout_ms: Option<u64>,
    page_size: Option<i32>,
    max_pages: Option<usize>,
}

impl DynamoDbSourceFactory {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            endpoint: config.endpoint_url.clone(),
            timeout_ms: config.timeout_ms,
            page_size: config.scan_page_size,
            max_pages: config.scan_max_pages,
        }
    }
}

#[async_trait]
impl SourceFactory for DynamoDbSourceFactory {
    async fn connect(
        &self,
        settings: &PluginSettings,
        region: &str,
    ) -> Result<Arc<dyn RecordSource>, AwsError> {
        let credentials = settings.credentials();
        let sdk_config = load_sdk_config(credentials.as_ref(), Some(region)).await;
        let source = DynamoDbSource::new(
            &sdk_config,
            DynamoDbConfig {
                region: Some(region.to_string()),
                endpoint: self.endpoint.clone(),
                timeout_ms: self.timeout_ms,
                page_size: self.page_size,
                max_pages: self.max_pages,
            },
        )?;
        Ok(Arc::new(source))
    }
}

/// Factory handing out one shared source regardless of settings
#[derive(Clone)]
pub struct StaticSourceFactory {
    source: Arc<dyn RecordSource>,
}

impl StaticSourceFactory {
    pub fn new(source: impl RecordSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

impl fmt::Debug for StaticSourceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticSourceFactory(..)")
    }
}

#[async_trait]
impl SourceFactory for StaticSourceFactory {
    async fn connect(
        &self,
        _settings: &PluginSettings,
        _region: &str,
    ) -> Result<Arc<dyn RecordSource>, AwsError> {
        Ok(self.source.clone())
    }
}

/// Application state shared across all request handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Telemetry configuration
    pub telemetry_config: TelemetryConfig,

    /// Source construction for queries
    pub sources: Arc<dyn SourceFactory>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("telemetry_config", &self.telemetry_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create state backed by DynamoDB
    pub fn new(config: ServerConfig, telemetry_config: TelemetryConfig) -> Self {
        let sources = Arc::new(DynamoDbSourceFactory::from_config(&config));
        Self::with_sources(config, telemetry_config, sources)
    }

    /// Create state with a custom source factory
    pub fn with_sources(
        config: ServerConfig,
        telemetry_config: TelemetryConfig,
        sources: Arc<dyn SourceFactory>,
    ) -> Self {
        Self {
            config,
            telemetry_config,
            sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamo_frames_aws::MemorySource;
    use dynamo_frames_tabular::record;

    #[tokio::test]
    async fn test_static_factory_ignores_settings() {
        let factory = StaticSourceFactory::new(
            MemorySource::new().with_table("users", vec![record([("id", "1")])]),
        );
        let source = factory
            .connect(&PluginSettings::default(), "us-east-1")
            .await
            .unwrap();
        assert_eq!(source.scan("users").await.unwrap().len(), 1);
    }

    #[test]
    fn test_dynamodb_factory_from_config() {
        let config = ServerConfig {
            endpoint_url: Some("http://localhost:8000".to_string()),
            scan_page_size: Some(50),
            ..Default::default()
        };
        let factory = DynamoDbSourceFactory::from_config(&config);
        assert_eq!(factory.endpoint.as_deref(), Some("http://localhost:8000"));
        assert_eq!(factory.page_size, Some(50));
        assert_eq!(factory.max_pages, None);
    }
}
