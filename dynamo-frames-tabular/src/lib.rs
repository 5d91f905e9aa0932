//! Columnar tables from loosely-structured DynamoDB records.
//!
//! Records in a batch need not share a schema. This crate turns a batch into
//! a single table:
//!
//! 1. **Discovery** ([`discover_columns`]): every field seen in any record
//!    becomes a column; its [`ColumnKind`] is fixed by the first record that
//!    contains it.
//! 2. **Materialization** ([`materialize_column`]): one string cell per
//!    record. `S`, `N` and `B` values matching the column kind are rendered;
//!    anything else, including a missing field, is [`PLACEHOLDER`].
//! 3. **Assembly** ([`assemble`]): columns in first-seen order, all with the
//!    batch's row count.
//!
//! [`extract_table`] runs all three. The pipeline is pure, synchronous and
//! never fails.

pub mod discovery;
pub mod error;
pub mod kind;
pub mod materialize;
pub mod table;
pub mod value;
pub mod wire;

pub use discovery::{discover_columns, ColumnSet, ColumnSpec};
pub use error::{Result, TabularError};
pub use kind::{classify, ColumnKind};
pub use materialize::{
    materialize_column, materialize_columns, render_cell, render_value, PLACEHOLDER,
};
pub use table::{assemble, extract_table, Column, Table};
pub use value::{record, AttributeValue, Record, RecordBatch};
pub use wire::{decode_batch, decode_record, RawAttributeValue};
