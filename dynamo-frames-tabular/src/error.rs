//! Error types for tabular operations.

use thiserror::Error;

/// Errors from tabular operations.
///
/// The extraction pipeline itself never fails; these are only produced when a
/// [`Table`](crate::Table) is built from caller-supplied columns.
#[derive(Debug, Error)]
pub enum TabularError {
    /// Schema or structural error (row count mismatch, duplicate column name)
    #[error("Schema error: {0}")]
    Schema(String),
}

/// Result type for tabular operations.
pub type Result<T> = std::result::Result<T, TabularError>;
