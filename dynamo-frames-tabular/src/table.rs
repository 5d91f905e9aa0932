//! Columnar tables assembled from record batches.
//!
//! A [`Table`] is an ordered list of [`Column`]s sharing one row count. Every
//! column's cells are stringified; the column's [`ColumnKind`] records what
//! discovery saw first and is carried alongside for presentation.
//!
//! # Design
//!
//! - **Columnar storage**: cells are stored per column, not per row
//! - **Deterministic order**: columns appear in first-seen discovery order
//! - **Total**: [`extract_table`] never fails; invalid shapes are only
//!   reachable through [`Table::new`], which validates them

use std::collections::{HashMap, HashSet};

use crate::discovery::{discover_columns, ColumnSet};
use crate::error::{Result, TabularError};
use crate::kind::ColumnKind;
use crate::materialize::{materialize_columns, PLACEHOLDER};
use crate::value::Record;

/// One materialized column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Field name.
    pub name: String,
    /// Kind fixed at discovery.
    pub kind: ColumnKind,
    /// One cell per record, in batch order.
    pub values: Vec<String>,
}

impl Column {
    /// Create a column.
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Number of rows in this column.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the cell at `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).map(String::as_str)
    }

    /// Whether the cell at `idx` is the placeholder. Out-of-range rows are not.
    #[inline]
    pub fn is_placeholder(&self, idx: usize) -> bool {
        self.get(idx) == Some(PLACEHOLDER)
    }
}

/// Ordered collection of equally long columns with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    num_rows: usize,
    name_to_index: HashMap<String, usize>,
}

impl Table {
    /// Create a table, validating row counts and name uniqueness.
    ///
    /// An empty column list yields an empty table with zero rows.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let num_rows = columns.first().map_or(0, Column::len);

        let mut seen = HashSet::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            if col.len() != num_rows {
                return Err(TabularError::Schema(format!(
                    "Row count mismatch: column {} ({}) has {} rows, expected {}",
                    i,
                    col.name,
                    col.len(),
                    num_rows
                )));
            }
            if !seen.insert(col.name.as_str()) {
                return Err(TabularError::Schema(format!(
                    "Duplicate column name: {}",
                    col.name
                )));
            }
        }

        Ok(Self::from_parts(columns, num_rows))
    }

    fn from_parts(columns: Vec<Column>, num_rows: usize) -> Self {
        let name_to_index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            columns,
            num_rows,
            name_to_index,
        }
    }

    /// Create an empty table (no columns, no rows).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in table order.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get column by index.
    #[inline]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Get column by name.
    #[inline]
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.name_to_index.get(name).map(|&i| &self.columns[i])
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Consume the table, returning its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

/// Package discovered columns and their cells into a table.
///
/// Columns keep the order of `columns`. Row count is always the batch
/// length, even when no record has a field.
pub fn assemble(batch: &[Record], columns: &ColumnSet) -> Table {
    let materialized = materialize_columns(batch, columns)
        .into_iter()
        .map(|(name, kind, values)| Column::new(name, kind, values))
        .collect();
    Table::from_parts(materialized, batch.len())
}

/// Run the full pipeline: discover columns, materialize cells, assemble.
pub fn extract_table(batch: &[Record]) -> Table {
    let columns = discover_columns(batch);
    let table = assemble(batch, &columns);
    tracing::debug!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "extracted table"
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_table_new_validates_rows() {
        let err = Table::new(vec![
            Column::new("a", ColumnKind::String, cells(&["1", "2"])),
            Column::new("b", ColumnKind::String, cells(&["1"])),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Row count mismatch"));
    }

    #[test]
    fn test_table_new_rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::new("a", ColumnKind::String, cells(&["1"])),
            Column::new("a", ColumnKind::Number, cells(&["2"])),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate column name"));
    }

    #[test]
    fn test_table_lookup() {
        let table = Table::new(vec![
            Column::new("id", ColumnKind::Number, cells(&["1", "2"])),
            Column::new("name", ColumnKind::String, cells(&["a", PLACEHOLDER])),
        ])
        .unwrap();

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column(0).unwrap().name, "id");

        let name = table.column_by_name("name").unwrap();
        assert_eq!(name.get(0), Some("a"));
        assert!(!name.is_placeholder(0));
        assert!(name.is_placeholder(1));
        assert!(!name.is_placeholder(5));
        assert!(table.column_by_name("missing").is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table, Table::empty());
    }

    #[test]
    fn test_extract_empty_batch() {
        let table = extract_table(&[]);
        assert_eq!(table.num_columns(), 0);
        assert_eq!(table.num_rows(), 0);
    }

    #[test]
    fn test_batch_of_empty_records_keeps_row_count() {
        let batch = vec![Record::new(); 3];
        let table = extract_table(&batch);
        assert_eq!(table.num_columns(), 0);
        assert_eq!(table.num_rows(), batch.len());
        assert!(table.is_empty());
    }

    #[test]
    fn test_assemble_matches_materialized_columns() {
        use crate::discovery::discover_columns;
        use crate::value::{record, AttributeValue};

        let batch = vec![
            record([("a", AttributeValue::from("x")), ("b", AttributeValue::from(1i64))]),
            record([("a", AttributeValue::Bool(true))]),
        ];
        let columns = discover_columns(&batch);
        let table = assemble(&batch, &columns);
        let expected: Vec<_> = materialize_columns(&batch, &columns);

        assert_eq!(table.num_columns(), expected.len());
        for (column, (name, kind, values)) in table.columns().iter().zip(expected) {
            assert_eq!(column.name, name);
            assert_eq!(column.kind, kind);
            assert_eq!(column.values, values);
        }
        assert_eq!(table.column_by_name("a").unwrap().values, vec!["x", PLACEHOLDER]);
    }
}
