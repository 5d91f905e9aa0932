//! Record source trait

use crate::error::{AwsError, Result};
use async_trait::async_trait;
use dynamo_frames_tabular::RecordBatch;

/// Retrieves the records of one table as a batch.
///
/// Implementations own authentication, pagination and network error
/// handling. The returned batch preserves the order records were produced in.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Scan every record of `table_name`.
    async fn scan(&self, table_name: &str) -> Result<RecordBatch>;
}

/// Reject empty table names before any request is made.
pub(crate) fn require_table_name(table_name: &str) -> Result<()> {
    if table_name.trim().is_empty() {
        return Err(AwsError::invalid_config("table name must not be empty"));
    }
    Ok(())
}
