//! Structured payloads for `info string ext:<name> <json>` lines.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extension value - flexible JSON-like type.
///
/// Objects keep their keys sorted so rendered payloads are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtensionValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Unsigned integer too large for `Int`.
    UInt(u64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
    /// Array of values.
    Array(Vec<ExtensionValue>),
    /// Object/map of values.
    Object(BTreeMap<String, ExtensionValue>),
}

impl ExtensionValue {
    /// Create an object from key-value pairs.
    pub fn object<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ExtensionValue>,
    {
        ExtensionValue::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create an array from values.
    pub fn array<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ExtensionValue>,
    {
        ExtensionValue::Array(values.into_iter().map(Into::into).collect())
    }

    /// Serializes to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<bool> for ExtensionValue {
    fn from(v: bool) -> Self {
        ExtensionValue::Bool(v)
    }
}

impl From<i32> for ExtensionValue {
    fn from(v: i32) -> Self {
        ExtensionValue::Int(v as i64)
    }
}

impl From<u32> for ExtensionValue {
    fn from(v: u32) -> Self {
        ExtensionValue::Int(i64::from(v))
    }
}

impl From<u64> for ExtensionValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => ExtensionValue::Int(v),
            Err(_) => ExtensionValue::UInt(v),
        }
    }
}

impl From<i64> for ExtensionValue {
    fn from(v: i64) -> Self {
        ExtensionValue::Int(v)
    }
}

impl From<f64> for ExtensionValue {
    fn from(v: f64) -> Self {
        ExtensionValue::Float(v)
    }
}

impl From<&str> for ExtensionValue {
    fn from(v: &str) -> Self {
        ExtensionValue::String(v.to_string())
    }
}

impl From<String> for ExtensionValue {
    fn from(v: String) -> Self {
        ExtensionValue::String(v)
    }
}

impl<T: Into<ExtensionValue>> From<Option<T>> for ExtensionValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ExtensionValue::Null, Into::into)
    }
}
