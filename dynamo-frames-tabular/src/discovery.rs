//! Column discovery.
//!
//! One pass over a batch collects every field name seen in any record, and
//! fixes each column's kind from the first record (in batch order) that
//! contains the field. A later record carrying a different kind for the same
//! field never changes the recorded kind.
//!
//! Column order is first-seen order: records are visited in batch order, and
//! fields within a record in name order (records are ordered maps).

use std::collections::HashMap;

use crate::kind::ColumnKind;
use crate::value::Record;

/// A discovered column: field name plus the kind fixed at first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Field name.
    pub name: String,
    /// Kind of the field's first occurrence.
    pub kind: ColumnKind,
}

/// Ordered set of discovered columns with lookup by name.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: Vec<ColumnSpec>,
    name_to_index: HashMap<String, usize>,
}

impl ColumnSet {
    /// Create an empty column set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with `kind` unless it is already present.
    ///
    /// Returns `true` if the column was newly added.
    pub fn observe(&mut self, name: &str, kind: ColumnKind) -> bool {
        if self.name_to_index.contains_key(name) {
            return false;
        }
        self.name_to_index
            .insert(name.to_string(), self.columns.len());
        self.columns.push(ColumnSpec {
            name: name.to_string(),
            kind,
        });
        true
    }

    /// Get column index by name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Get the recorded kind for a field.
    #[inline]
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.index_of(name).map(|i| self.columns[i].kind)
    }

    /// Whether a field was discovered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Number of discovered columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnSpec> + '_ {
        self.columns.iter()
    }

    /// Column names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a ColumnSpec;
    type IntoIter = std::slice::Iter<'a, ColumnSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// Discover the unified column set of a batch.
pub fn discover_columns(batch: &[Record]) -> ColumnSet {
    let mut columns = ColumnSet::new();
    for record in batch {
        for (name, value) in record {
            if !columns.contains(name) {
                columns.observe(name, ColumnKind::of(value));
            }
        }
    }
    tracing::trace!(
        records = batch.len(),
        columns = columns.len(),
        "discovered columns"
    );
    columns
}
