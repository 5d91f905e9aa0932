//! Data frame response format
//!
//! A frame is the wire form of one extracted table: a name (the query's
//! `refId`) and one field per column, in table order. Every field is typed
//! `string`; the discovered DynamoDB kind rides along as `kind`.

use dynamo_frames_tabular::{ColumnKind, Table};
use serde::{Deserialize, Serialize};

/// Field value type reported for every column
pub const FIELD_TYPE_STRING: &str = "string";

/// One frame field (column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub kind: ColumnKind,
    pub values: Vec<String>,
}

/// Named collection of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub fields: Vec<FrameField>,
}

impl Frame {
    /// Build a frame from an extracted table
    pub fn from_table(name: impl Into<String>, table: Table) -> Self {
        let fields = table
            .into_columns()
            .into_iter()
            .map(|column| FrameField {
                name: column.name,
                field_type: FIELD_TYPE_STRING.to_string(),
                kind: column.kind,
                values: column.values,
            })
            .collect();
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FrameField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Row count (0 for a frame without fields)
    pub fn num_rows(&self) -> usize {
        self.fields.first().map_or(0, |f| f.values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamo_frames_tabular::{extract_table, record, AttributeValue};
    use serde_json::json;

    #[test]
    fn test_frame_from_table() {
        let batch = vec![
            record([("id", AttributeValue::from("1")), ("ok", AttributeValue::Bool(true))]),
            record([("id", "2")]),
        ];
        let frame = Frame::from_table("A", extract_table(&batch));

        assert_eq!(frame.name, "A");
        assert_eq!(frame.num_rows(), 2);
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({
                "name": "A",
                "fields": [
                    {"name": "id", "type": "string", "kind": "S", "values": ["1", "2"]},
                    {"name": "ok", "type": "string", "kind": "BOOL", "values": ["N/A", "N/A"]}
                ]
            })
        );
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::from_table("B", extract_table(&[]));
        assert!(frame.fields.is_empty());
        assert_eq!(frame.num_rows(), 0);
        assert!(frame.field("id").is_none());
    }
}
