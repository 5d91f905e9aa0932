//! Conversion from SDK attribute values to tabular records
//!
//! The SDK models sets (`SS`, `NS`, `BS`) and a catch-all `Unknown` variant
//! that the tabular model has no case for; those become
//! [`AttributeValue::Unknown`], as does `NULL: false`.

use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;
use dynamo_frames_tabular::{AttributeValue, Record};
use std::collections::HashMap;

/// Convert a single SDK attribute value
pub fn convert_attribute(attr: &SdkAttributeValue) -> AttributeValue {
    match attr {
        SdkAttributeValue::S(s) => AttributeValue::S(s.clone()),
        SdkAttributeValue::N(n) => AttributeValue::N(n.clone()),
        SdkAttributeValue::B(blob) => AttributeValue::B(blob.as_ref().to_vec()),
        SdkAttributeValue::Bool(b) => AttributeValue::Bool(*b),
        SdkAttributeValue::Null(true) => AttributeValue::Null,
        SdkAttributeValue::M(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), convert_attribute(v)))
                .collect(),
        ),
        SdkAttributeValue::L(list) => {
            AttributeValue::L(list.iter().map(convert_attribute).collect())
        }
        _ => AttributeValue::Unknown,
    }
}

/// Convert a scanned DynamoDB item into a record
pub fn item_to_record(item: &HashMap<String, SdkAttributeValue>) -> Record {
    item.iter()
        .map(|(k, v)| (k.clone(), convert_attribute(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::primitives::Blob;
    use dynamo_frames_tabular::{extract_table, ColumnKind};

    #[test]
    fn test_convert_scalars() {
        assert_eq!(
            convert_attribute(&SdkAttributeValue::S("a".into())),
            AttributeValue::S("a".into())
        );
        assert_eq!(
            convert_attribute(&SdkAttributeValue::N("3.14".into())),
            AttributeValue::N("3.14".into())
        );
        assert_eq!(
            convert_attribute(&SdkAttributeValue::B(Blob::new(b"raw".to_vec()))),
            AttributeValue::B(b"raw".to_vec())
        );
        assert_eq!(
            convert_attribute(&SdkAttributeValue::Bool(true)),
            AttributeValue::Bool(true)
        );
    }

    #[test]
    fn test_convert_null() {
        assert_eq!(
            convert_attribute(&SdkAttributeValue::Null(true)),
            AttributeValue::Null
        );
        assert_eq!(
            convert_attribute(&SdkAttributeValue::Null(false)),
            AttributeValue::Unknown
        );
    }

    #[test]
    fn test_convert_sets_are_unknown() {
        assert_eq!(
            convert_attribute(&SdkAttributeValue::Ss(vec!["a".into()])),
            AttributeValue::Unknown
        );
        assert_eq!(
            convert_attribute(&SdkAttributeValue::Ns(vec!["1".into()])),
            AttributeValue::Unknown
        );
        assert_eq!(
            convert_attribute(&SdkAttributeValue::Bs(vec![Blob::new(vec![1])])),
            AttributeValue::Unknown
        );
    }

    #[test]
    fn test_convert_nested() {
        let mut inner = HashMap::new();
        inner.insert("k".to_string(), SdkAttributeValue::N("1".into()));
        let value = SdkAttributeValue::L(vec![
            SdkAttributeValue::M(inner),
            SdkAttributeValue::Null(true),
        ]);

        match convert_attribute(&value) {
            AttributeValue::L(items) => {
                assert_eq!(items.len(), 2);
                match &items[0] {
                    AttributeValue::M(m) => assert_eq!(m["k"], AttributeValue::N("1".into())),
                    other => panic!("expected map, got {:?}", other),
                }
                assert_eq!(items[1], AttributeValue::Null);
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_items_feed_the_pipeline() {
        let mut first = HashMap::new();
        first.insert("id".to_string(), SdkAttributeValue::S("1".into()));
        first.insert("active".to_string(), SdkAttributeValue::Bool(true));
        let mut second = HashMap::new();
        second.insert("id".to_string(), SdkAttributeValue::S("2".into()));
        second.insert("tags".to_string(), SdkAttributeValue::Ss(vec!["x".into()]));

        let batch = vec![item_to_record(&first), item_to_record(&second)];
        let table = extract_table(&batch);

        assert_eq!(table.num_rows(), 2);
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["active", "id", "tags"]);
        assert_eq!(table.column_by_name("id").unwrap().values, vec!["1", "2"]);
        assert_eq!(
            table.column_by_name("tags").unwrap().kind,
            ColumnKind::Unknown
        );
    }
}
