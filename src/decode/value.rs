//! Strict JSON value coercion.
//!
//! Converts raw document values into the typed shape a slot expects. Unlike
//! lenient extraction, a value of the wrong JSON type is an error here.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::decode::duration::RawDuration;
use crate::decode::fields::FieldKind;
use crate::error::{CheckDefinitionError, Result};

/// A typed slot value, produced by [`coerce`].
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Str(String),
    Bool(bool),
    Int(i64),
    StrList(Vec<String>),
    Header(BTreeMap<String, Vec<String>>),
    Duration(RawDuration),
}

impl SlotValue {
    /// Whether the value counts as "not provided" for dialect resolution.
    pub fn is_empty(&self) -> bool {
        match self {
            SlotValue::Str(s) => s.is_empty(),
            SlotValue::StrList(list) => list.is_empty(),
            SlotValue::Header(map) => map.is_empty(),
            SlotValue::Bool(_) | SlotValue::Int(_) | SlotValue::Duration(_) => false,
        }
    }
}

/// Coerce `value` (read from document key `key`) into the shape of `kind`.
pub fn coerce(kind: FieldKind, key: &str, value: &Value) -> Result<SlotValue> {
    match kind {
        FieldKind::Str => value_to_string(key, value).map(SlotValue::Str),
        FieldKind::Bool => value_to_bool(key, value).map(SlotValue::Bool),
        FieldKind::Int => value_to_int(key, value).map(SlotValue::Int),
        FieldKind::StrList => value_to_string_list(key, value).map(SlotValue::StrList),
        FieldKind::Header => value_to_header(key, value).map(SlotValue::Header),
        FieldKind::Duration => RawDuration::from_value(key, value).map(SlotValue::Duration),
    }
}

pub fn value_to_string(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(CheckDefinitionError::malformed(key, value, "expected a string")),
    }
}

pub fn value_to_bool(key: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        _ => Err(CheckDefinitionError::malformed(key, value, "expected a boolean")),
    }
}

/// Integers only; `3.0` and out-of-range numbers are rejected.
pub fn value_to_int(key: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| CheckDefinitionError::malformed(key, value, "expected an integer")),
        _ => Err(CheckDefinitionError::malformed(key, value, "expected an integer")),
    }
}

/// Array of strings. A `null` element becomes an empty string.
pub fn value_to_string_list(key: &str, value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| CheckDefinitionError::malformed(key, value, "expected an array of strings"))?;

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Null => Ok(String::new()),
            _ => Err(CheckDefinitionError::malformed(
                key,
                item,
                "expected an array of strings",
            )),
        })
        .collect()
}

/// Object of string arrays, e.g. `{"Accept": ["application/json"]}`.
pub fn value_to_header(key: &str, value: &Value) -> Result<BTreeMap<String, Vec<String>>> {
    let obj = value
        .as_object()
        .ok_or_else(|| CheckDefinitionError::malformed(key, value, "expected an object of string arrays"))?;

    let mut header = BTreeMap::new();
    for (name, values) in obj {
        let values = match values {
            Value::Null => Vec::new(),
            _ => value_to_string_list(&format!("{}.{}", key, name), values)?,
        };
        header.insert(name.clone(), values);
    }
    Ok(header)
}
