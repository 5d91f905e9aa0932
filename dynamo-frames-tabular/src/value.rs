//! Record model: attribute values, records, and record batches.
//!
//! An [`AttributeValue`] is a sum type with exactly one populated case. Values
//! that arrive with no recognisable case (an empty DynamoDB JSON object, an
//! SDK variant this crate does not model, `NULL: false`) are represented
//! explicitly as [`AttributeValue::Unknown`] rather than as an error.

use std::collections::BTreeMap;

/// A single DynamoDB attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// String (`S`)
    S(String),
    /// Number (`N`), kept as decimal text to avoid precision loss
    N(String),
    /// Binary (`B`)
    B(Vec<u8>),
    /// Boolean (`BOOL`)
    Bool(bool),
    /// Explicit null (`NULL: true`)
    Null,
    /// Nested map (`M`)
    M(BTreeMap<String, AttributeValue>),
    /// Nested list (`L`)
    L(Vec<AttributeValue>),
    /// No recognised case was populated
    Unknown,
}

impl AttributeValue {
    /// Get the string payload, if this is an `S` value.
    #[inline]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Get the number text, if this is an `N` value.
    #[inline]
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }

    /// Get the raw bytes, if this is a `B` value.
    #[inline]
    pub fn as_b(&self) -> Option<&[u8]> {
        match self {
            Self::B(b) => Some(b),
            _ => None,
        }
    }

    /// Get the boolean, if this is a `BOOL` value.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this is an explicit null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::S(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::S(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        Self::N(n.to_string())
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(b: Vec<u8>) -> Self {
        Self::B(b)
    }
}

/// One logical row: field name to value.
///
/// Backed by a `BTreeMap` so iteration within a record is by field name,
/// which keeps column discovery deterministic regardless of how the record
/// was produced.
pub type Record = BTreeMap<String, AttributeValue>;

/// Records returned together by one scan. Order determines output row order.
pub type RecordBatch = Vec<Record>;

/// Build a record from `(name, value)` pairs.
///
/// Later pairs overwrite earlier pairs with the same name.
pub fn record<K, V, I>(fields: I) -> Record
where
    K: Into<String>,
    V: Into<AttributeValue>,
    I: IntoIterator<Item = (K, V)>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_only_their_case() {
        let s = AttributeValue::from("x");
        assert_eq!(s.as_s(), Some("x"));
        assert_eq!(s.as_n(), None);

        let n = AttributeValue::from(42);
        assert_eq!(n.as_n(), Some("42"));
        assert_eq!(n.as_s(), None);

        let b = AttributeValue::from(vec![1u8, 2, 3]);
        assert_eq!(b.as_b(), Some(&[1u8, 2, 3][..]));

        assert_eq!(AttributeValue::from(true).as_bool(), Some(true));
        assert!(AttributeValue::Null.is_null());
        assert!(!AttributeValue::Unknown.is_null());
    }

    #[test]
    fn test_record_builder_orders_by_name() {
        let r = record([("name", "a"), ("id", "1")]);
        let keys: Vec<&str> = r.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name"]);
    }
}
