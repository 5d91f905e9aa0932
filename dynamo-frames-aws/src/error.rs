//! Error types for DynamoDB record sources

use thiserror::Error;

/// Errors from record retrieval
#[derive(Debug, Error)]
pub enum AwsError {
    /// Table not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unauthorized - invalid or missing credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Throttled - provisioned throughput or request limit exceeded
    #[error("Throttled: {0}")]
    Throttled(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Missing region configuration
    #[error("Missing AWS region configuration")]
    MissingRegion,

    /// DynamoDB SDK error
    #[error("DynamoDB error: {0}")]
    DynamoDB(String),
}

impl AwsError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn throttled(msg: impl Into<String>) -> Self {
        Self::Throttled(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn dynamodb(msg: impl Into<String>) -> Self {
        Self::DynamoDB(msg.into())
    }
}

/// Result type for record retrieval
pub type Result<T> = std::result::Result<T, AwsError>;
