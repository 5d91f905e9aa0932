//! DynamoDB JSON wire form of attribute values.
//!
//! Each value is an object keyed by a type descriptor:
//!
//! ```text
//! {"S": "text"}   {"N": "12.5"}   {"B": "<base64>"}   {"BOOL": true}
//! {"NULL": true}  {"M": {...}}    {"L": [...]}
//! ```
//!
//! Decoding goes through [`RawAttributeValue`], which mirrors the wire shape
//! with one optional slot per descriptor. The raw form is then collapsed into
//! an [`AttributeValue`] by a fixed precedence (S, N, B, BOOL, M, L, NULL), so
//! malformed inputs with several populated slots, or none, still decode to
//! exactly one case. Descriptors this crate does not model (`SS`, `NS`, `BS`)
//! are ignored.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::{AttributeValue, Record, RecordBatch};

/// Wire-shaped attribute value with every descriptor slot optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAttributeValue {
    #[serde(rename = "S")]
    pub s: Option<String>,
    #[serde(rename = "N")]
    pub n: Option<String>,
    #[serde(rename = "B", default, deserialize_with = "deserialize_base64")]
    pub b: Option<Vec<u8>>,
    #[serde(rename = "BOOL")]
    pub bool: Option<bool>,
    #[serde(rename = "M")]
    pub m: Option<BTreeMap<String, RawAttributeValue>>,
    #[serde(rename = "L")]
    pub l: Option<Vec<RawAttributeValue>>,
    #[serde(rename = "NULL")]
    pub null: Option<bool>,
}

fn deserialize_base64<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded: Option<String> = Option::deserialize(deserializer)?;
    encoded
        .map(|s| {
            STANDARD
                .decode(s.as_bytes())
                .map_err(|e| D::Error::custom(format!("invalid base64 in B value: {}", e)))
        })
        .transpose()
}

impl From<RawAttributeValue> for AttributeValue {
    fn from(raw: RawAttributeValue) -> Self {
        if let Some(s) = raw.s {
            AttributeValue::S(s)
        } else if let Some(n) = raw.n {
            AttributeValue::N(n)
        } else if let Some(b) = raw.b {
            AttributeValue::B(b)
        } else if let Some(b) = raw.bool {
            AttributeValue::Bool(b)
        } else if let Some(m) = raw.m {
            AttributeValue::M(m.into_iter().map(|(k, v)| (k, v.into())).collect())
        } else if let Some(l) = raw.l {
            AttributeValue::L(l.into_iter().map(Into::into).collect())
        } else if raw.null == Some(true) {
            AttributeValue::Null
        } else {
            AttributeValue::Unknown
        }
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawAttributeValue::deserialize(deserializer).map(Into::into)
    }
}

impl Serialize for AttributeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if matches!(self, AttributeValue::Unknown) { 0 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        match self {
            AttributeValue::S(s) => map.serialize_entry("S", s)?,
            AttributeValue::N(n) => map.serialize_entry("N", n)?,
            AttributeValue::B(b) => map.serialize_entry("B", &STANDARD.encode(b))?,
            AttributeValue::Bool(b) => map.serialize_entry("BOOL", b)?,
            AttributeValue::Null => map.serialize_entry("NULL", &true)?,
            AttributeValue::M(m) => map.serialize_entry("M", m)?,
            AttributeValue::L(l) => map.serialize_entry("L", l)?,
            AttributeValue::Unknown => {}
        }
        map.end()
    }
}

/// Decode one record from DynamoDB JSON (an object of attribute values).
pub fn decode_record(json: &str) -> serde_json::Result<Record> {
    serde_json::from_str(json)
}

/// Decode a batch from DynamoDB JSON (an array of records).
pub fn decode_batch(json: &str) -> serde_json::Result<RecordBatch> {
    serde_json::from_str(json)
}
