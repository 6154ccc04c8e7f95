use serde::Serialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    Null,
    Scalar(Scalar),
    Sequence(Vec<NormalizedValue>),
    Mapping(BTreeMap<String, NormalizedValue>),
}

impl NormalizedValue {
    pub fn get(&self, key: &str) -> Option<&NormalizedValue> {
        match self {
            NormalizedValue::Mapping(fields) => fields.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NormalizedValue::Scalar(Scalar::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            NormalizedValue::Scalar(Scalar::Bool(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            NormalizedValue::Scalar(Scalar::Number(number)) => number.as_u64(),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[NormalizedValue]> {
        match self {
            NormalizedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NormalizedValue::Null)
    }
}

/// Returns `None` for a null document; anything else is converted recursively.
pub fn normalize(value: &Value) -> Option<NormalizedValue> {
    match value {
        Value::Null => None,
        other => Some(normalize_node(other)),
    }
}

fn normalize_node(value: &Value) -> NormalizedValue {
    match value {
        Value::Null => NormalizedValue::Null,
        Value::Array(items) => NormalizedValue::Sequence(items.iter().map(normalize_node).collect()),
        Value::Object(fields) => NormalizedValue::Mapping(
            fields
                .iter()
                .map(|(name, field)| (name.clone(), normalize_node(field)))
                .collect(),
        ),
        Value::Bool(flag) => NormalizedValue::Scalar(Scalar::Bool(*flag)),
        Value::Number(number) => NormalizedValue::Scalar(Scalar::Number(number.clone())),
        Value::String(text) => NormalizedValue::Scalar(Scalar::Text(text.clone())),
    }
}
