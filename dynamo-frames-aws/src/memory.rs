//! In-memory record source

use crate::error::{AwsError, Result};
use crate::source::{require_table_name, RecordSource};
use async_trait::async_trait;
use dynamo_frames_tabular::RecordBatch;
use std::collections::HashMap;

/// Record source serving fixed batches by table name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<String, RecordBatch>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a table.
    pub fn with_table(mut self, table_name: impl Into<String>, batch: RecordBatch) -> Self {
        self.tables.insert(table_name.into(), batch);
        self
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn scan(&self, table_name: &str) -> Result<RecordBatch> {
        require_table_name(table_name)?;
        self.tables
            .get(table_name)
            .cloned()
            .ok_or_else(|| AwsError::not_found(format!("table {}", table_name)))
    }
}
