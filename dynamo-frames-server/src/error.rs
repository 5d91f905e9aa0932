//! Server error types with HTTP status code mapping
//!
//! Two levels of failure exist:
//!
//! - [`ServerError`]: the request as a whole is unusable (malformed body).
//!   Rendered as an HTTP error response.
//! - [`QueryError`]: one query of a multi-query request failed. Rendered into
//!   that query's result entry; sibling queries are unaffected.

use crate::settings::SettingsError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dynamo_frames_aws::AwsError;
use serde::Serialize;
use thiserror::Error;

/// Compact error type identifiers
pub mod errors {
    pub const JSON_PARSE: &str = "err:request/JsonParse";
}

/// Request-level error
#[derive(Error, Debug)]
pub enum ServerError {
    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ServerError {
    /// Map error to error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Json(_) => errors::JSON_PARSE,
        }
    }

    /// Map error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Json(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// HTTP status code
    pub status: u16,
    /// Error type (e.g., "err:request/JsonParse")
    #[serde(rename = "@type")]
    pub error_type: String,
    /// Optional cause for nested errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ErrorResponse>>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type();

        let cause = match &self {
            ServerError::Json(json_err) => Some(Box::new(ErrorResponse {
                error: format!("at line {}, column {}", json_err.line(), json_err.column()),
                status: status.as_u16(),
                error_type: errors::JSON_PARSE.to_string(),
                cause: None,
            })),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            status: status.as_u16(),
            error_type: error_type.to_string(),
            cause,
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            format!(
                r#"{{"error":"{}","status":{},"@type":"{}"}}"#,
                self,
                status.as_u16(),
                error_type
            )
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}

/// Failure of a single query
#[derive(Error, Debug)]
pub enum QueryError {
    /// Query model did not decode
    #[error("json unmarshal: {0}")]
    Unmarshal(#[source] serde_json::Error),

    /// Data source settings did not load
    #[error("failed to load plugin settings: {0}")]
    Settings(#[from] SettingsError),

    /// Query did not name a table
    #[error("tableName is required in the query")]
    MissingTableName,

    /// Could not build a client for the data source
    #[error("failed to create AWS session: {0}")]
    Session(#[source] AwsError),

    /// Retrieval failed
    #[error("failed to scan DynamoDB table {table}: {source}")]
    Scan {
        table: String,
        #[source]
        source: AwsError,
    },
}

impl QueryError {
    /// Status reported in the query's result entry.
    ///
    /// Every per-query failure is reported as Bad Request, including
    /// retrieval failures.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Short label for span error codes
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Unmarshal(_) => "unmarshal",
            QueryError::Settings(_) => "settings",
            QueryError::MissingTableName => "missing_table_name",
            QueryError::Session(_) => "session",
            QueryError::Scan { .. } => "scan",
        }
    }
}

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_status() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ServerError::from(json_err);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), errors::JSON_PARSE);
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_query_error_messages() {
        assert_eq!(
            QueryError::MissingTableName.to_string(),
            "tableName is required in the query"
        );
        let scan = QueryError::Scan {
            table: "users".to_string(),
            source: AwsError::not_found("table users"),
        };
        assert_eq!(
            scan.to_string(),
            "failed to scan DynamoDB table users: Not found: table users"
        );
        assert_eq!(scan.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(scan.code(), "scan");
    }
}
