//! DynamoDB scan source
//!
//! Provides `DynamoDbSource`, which implements [`RecordSource`] by issuing
//! `Scan` requests against a table and following `LastEvaluatedKey` until the
//! table is exhausted (or a configured page cap is reached).

pub mod convert;
mod paginate;

use crate::error::{AwsError, Result};
use crate::source::{require_table_name, RecordSource};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::Client;
use aws_smithy_types::timeout::TimeoutConfig;
use dynamo_frames_tabular::RecordBatch;
use std::fmt;
use std::time::Duration;

use self::paginate::{collect_pages, ScanPage};

/// Provider name reported for credentials supplied through settings.
const STATIC_PROVIDER_NAME: &str = "dynamo-frames-static";

/// DynamoDB source configuration
#[derive(Debug, Clone, Default)]
pub struct DynamoDbConfig {
    /// AWS region (optional, uses SDK default if not specified)
    pub region: Option<String>,
    /// Optional endpoint override (e.g. LocalStack)
    pub endpoint: Option<String>,
    /// Timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Items per Scan page (`Limit`); DynamoDB default when unset
    pub page_size: Option<i32>,
    /// Stop after this many pages; unbounded when unset
    pub max_pages: Option<usize>,
}

impl DynamoDbConfig {
    /// Validate configuration before building a client
    pub fn validate(&self) -> Result<()> {
        if matches!(self.page_size, Some(n) if n <= 0) {
            return Err(AwsError::invalid_config("page_size must be positive"));
        }
        if self.max_pages == Some(0) {
            return Err(AwsError::invalid_config("max_pages must be positive"));
        }
        Ok(())
    }
}

/// Static access keys supplied by data source settings.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl StaticCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.filter(|t| !t.is_empty()),
        }
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Load an SDK config, using static credentials when supplied and the default
/// provider chain otherwise.
pub async fn load_sdk_config(
    credentials: Option<&StaticCredentials>,
    region: Option<&str>,
) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }

    if let Some(creds) = credentials {
        loader = loader.credentials_provider(Credentials::new(
            creds.access_key_id.clone(),
            creds.secret_access_key.clone(),
            creds.session_token.clone(),
            None,
            STATIC_PROVIDER_NAME,
        ));
    }

    loader.load().await
}

/// DynamoDB-backed record source
#[derive(Clone)]
pub struct DynamoDbSource {
    client: Client,
    page_size: Option<i32>,
    max_pages: Option<usize>,
}

impl fmt::Debug for DynamoDbSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamoDbSource")
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

impl DynamoDbSource {
    /// Create a new DynamoDB source
    ///
    /// Configuration:
    /// - `region`: Override SDK region (uses SDK default if not specified)
    /// - `endpoint`: Override the service endpoint
    /// - `timeout_ms`: Operation timeout in milliseconds
    pub fn new(sdk_config: &SdkConfig, config: DynamoDbConfig) -> Result<Self> {
        config.validate()?;

        if config.region.is_none() && sdk_config.region().is_none() {
            return Err(AwsError::MissingRegion);
        }

        // Inherit HTTP client, retry config, credentials etc. from SdkConfig,
        // then apply our overrides
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);

        if let Some(region) = config.region {
            builder = builder.region(Region::new(region));
        }

        if let Some(endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        if let Some(timeout_ms) = config.timeout_ms {
            let timeout_config = TimeoutConfig::builder()
                .operation_timeout(Duration::from_millis(timeout_ms))
                .build();
            builder = builder.timeout_config(timeout_config);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            page_size: config.page_size,
            max_pages: config.max_pages,
        })
    }

    /// Map a Scan failure to a source error
    fn scan_error(table_name: &str, err: SdkError<ScanError>) -> AwsError {
        match &err {
            SdkError::ServiceError(service_err) => {
                scan_service_error(table_name, service_err.err())
            }
            _ => AwsError::dynamodb(format!("Scan failed: {}", err)),
        }
    }
}

/// Classify an error returned by the DynamoDB service for a Scan
fn scan_service_error(table_name: &str, err: &ScanError) -> AwsError {
    match err {
        ScanError::ResourceNotFoundException(_) => {
            AwsError::not_found(format!("table {}", table_name))
        }
        ScanError::ProvisionedThroughputExceededException(_)
        | ScanError::RequestLimitExceeded(_) => AwsError::throttled(err.to_string()),
        other if is_auth_error_code(other.code()) => AwsError::unauthorized(other.to_string()),
        other => AwsError::dynamodb(format!("Scan failed: {}", other)),
    }
}

fn is_auth_error_code(code: Option<&str>) -> bool {
    matches!(
        code,
        Some(
            "UnrecognizedClientException"
                | "InvalidSignatureException"
                | "AccessDeniedException"
                | "ExpiredTokenException"
                | "MissingAuthenticationToken"
        )
    )
}

#[async_trait]
impl RecordSource for DynamoDbSource {
    async fn scan(&self, table_name: &str) -> Result<RecordBatch> {
        require_table_name(table_name)?;

        collect_pages(table_name, self.max_pages, |start_key| {
            let request = self
                .client
                .scan()
                .table_name(table_name)
                .set_limit(self.page_size)
                .set_exclusive_start_key(start_key);
            async move {
                let output = request
                    .send()
                    .await
                    .map_err(|e| Self::scan_error(table_name, e))?;
                Ok(ScanPage {
                    items: output.items().to_vec(),
                    last_evaluated_key: output.last_evaluated_key().cloned(),
                })
            }
        })
        .await
    }
}
