use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A flat log payload: string keys mapped to scalar values.
///
/// `BTreeMap` keeps serialization order deterministic across runs.
pub type Payload = BTreeMap<String, FieldValue>;

/// Scalar value permitted in a log payload.
///
/// The payload is deliberately restricted to a closed variant set
/// (string | integer | float | boolean | null) instead of an open
/// `serde_json::Value`, so every payload serializes the same way every time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl FieldValue {
    /// Render the value as a label string (labels are always strings on the
    /// wire, whatever the payload carried).
    pub fn as_label_value(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Str(value) => value.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
