//! Column kinds and the value classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::AttributeValue;

/// Kind tag of a column, derived solely from which value case is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    #[serde(rename = "S")]
    String,
    #[serde(rename = "N")]
    Number,
    #[serde(rename = "B")]
    Binary,
    #[serde(rename = "BOOL")]
    Boolean,
    #[serde(rename = "M")]
    Map,
    #[serde(rename = "L")]
    List,
    #[serde(rename = "NULL")]
    Null,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl ColumnKind {
    /// Classify a single attribute value.
    ///
    /// Precedence for ambiguous inputs is S, N, B, BOOL, M, L, NULL, then
    /// UNKNOWN; it is applied when decoding wire values (see
    /// [`crate::wire`]), so by the time a value reaches here exactly one case
    /// is populated.
    #[inline]
    pub fn of(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::S(_) => Self::String,
            AttributeValue::N(_) => Self::Number,
            AttributeValue::B(_) => Self::Binary,
            AttributeValue::Bool(_) => Self::Boolean,
            AttributeValue::M(_) => Self::Map,
            AttributeValue::L(_) => Self::List,
            AttributeValue::Null => Self::Null,
            AttributeValue::Unknown => Self::Unknown,
        }
    }

    /// DynamoDB type descriptor for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "S",
            Self::Number => "N",
            Self::Binary => "B",
            Self::Boolean => "BOOL",
            Self::Map => "M",
            Self::List => "L",
            Self::Null => "NULL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Whether the materializer renders values of this kind as text.
    #[inline]
    pub fn is_renderable(&self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Binary)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a single attribute value. Shorthand for [`ColumnKind::of`].
#[inline]
pub fn classify(value: &AttributeValue) -> ColumnKind {
    ColumnKind::of(value)
}
