//! Column materialization.
//!
//! Each discovered column becomes one string cell per record, in batch order.
//! A cell is rendered only when the record's value is `S`, `N` or `B` and has
//! the same kind the column was fixed with at discovery. A missing field, any
//! other value case, and a value whose kind differs from the column's all
//! produce [`PLACEHOLDER`]. Columns discovered as `BOOL`, `M`, `L`, `NULL` or
//! `UNKNOWN` therefore contain only placeholders.
//!
//! Binary values are rendered by reading the bytes as UTF-8; invalid
//! sequences are replaced with U+FFFD, so non-text payloads do not survive
//! rendering byte-for-byte.

use crate::discovery::ColumnSet;
use crate::kind::ColumnKind;
use crate::value::{AttributeValue, Record};

/// Cell value used for missing fields and values that cannot be rendered.
pub const PLACEHOLDER: &str = "N/A";

/// Render a value as a cell, or `None` if its case is not rendered natively.
pub fn render_value(value: &AttributeValue) -> Option<String> {
    match value {
        AttributeValue::S(s) => Some(s.clone()),
        AttributeValue::N(n) => Some(n.clone()),
        AttributeValue::B(b) => Some(String::from_utf8_lossy(b).into_owned()),
        _ => None,
    }
}

/// Render the cell for `field` in one record of a column fixed as `kind`.
#[inline]
pub fn render_cell(record: &Record, field: &str, kind: ColumnKind) -> String {
    record
        .get(field)
        .filter(|value| ColumnKind::of(value) == kind)
        .and_then(render_value)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Materialize one column across the batch.
pub fn materialize_column(batch: &[Record], field: &str, kind: ColumnKind) -> Vec<String> {
    batch
        .iter()
        .map(|record| render_cell(record, field, kind))
        .collect()
}

/// Materialize every discovered column, in column-set order.
pub fn materialize_columns(
    batch: &[Record],
    columns: &ColumnSet,
) -> Vec<(String, ColumnKind, Vec<String>)> {
    columns
        .iter()
        .map(|spec| {
            (
                spec.name.clone(),
                spec.kind,
                materialize_column(batch, &spec.name, spec.kind),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::discover_columns;
    use crate::value::record;
    use std::collections::BTreeMap;

    #[test]
    fn test_render_native_cases() {
        assert_eq!(render_value(&AttributeValue::S("a".into())), Some("a".into()));
        assert_eq!(render_value(&AttributeValue::S(String::new())), Some(String::new()));
        assert_eq!(
            render_value(&AttributeValue::N("-0.001".into())),
            Some("-0.001".into())
        );
        assert_eq!(
            render_value(&AttributeValue::B(b"bytes".to_vec())),
            Some("bytes".into())
        );
    }

    #[test]
    fn test_non_utf8_binary_is_lossy() {
        let cell = render_value(&AttributeValue::B(vec![0x66, 0xff, 0x6f])).unwrap();
        assert_eq!(cell, "f\u{fffd}o");
    }

    #[test]
    fn test_unrendered_cases() {
        assert_eq!(render_value(&AttributeValue::Bool(true)), None);
        assert_eq!(render_value(&AttributeValue::Null), None);
        assert_eq!(render_value(&AttributeValue::M(BTreeMap::new())), None);
        assert_eq!(render_value(&AttributeValue::L(vec![])), None);
        assert_eq!(render_value(&AttributeValue::Unknown), None);
    }

    #[test]
    fn test_placeholder_differs_from_empty_string() {
        let batch = vec![record([("a", "")]), record([("b", "x")])];
        let cells = materialize_column(&batch, "a", ColumnKind::String);
        assert_eq!(cells, vec!["".to_string(), PLACEHOLDER.to_string()]);
        assert_ne!(cells[0], cells[1]);
    }

    #[test]
    fn test_unrendered_column_is_all_placeholders() {
        let batch = vec![
            record([("flag", AttributeValue::Bool(true))]),
            record([("flag", AttributeValue::Bool(false))]),
        ];
        assert_eq!(
            materialize_column(&batch, "flag", ColumnKind::Boolean),
            vec![PLACEHOLDER.to_string(), PLACEHOLDER.to_string()]
        );
    }

    #[test]
    fn test_mismatched_case_becomes_placeholder() {
        let batch = vec![
            record([("x", AttributeValue::S("a".into()))]),
            record([("x", AttributeValue::N("1".into()))]),
            record([("x", AttributeValue::Bool(false))]),
        ];
        let columns = discover_columns(&batch);
        let materialized = materialize_columns(&batch, &columns);
        assert_eq!(materialized.len(), 1);
        let (name, kind, cells) = &materialized[0];
        assert_eq!(name, "x");
        assert_eq!(*kind, ColumnKind::String);
        assert_eq!(cells, &vec!["a".to_string(), "N/A".to_string(), "N/A".to_string()]);
    }
}
