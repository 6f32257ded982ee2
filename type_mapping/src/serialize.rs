//! Serialization utilities
//!
//! This module provides serialization functions
//! for converting Rust models to ordered field maps.

use crate::field_map::FieldMap;
use crate::types::SqlValue;
use serde::Serialize;

/// Convert a JSON value into the closest `SqlValue`
pub fn value_to_sql_value(value: serde_json::Value) -> SqlValue {
    match value {
        serde_json::Value::Null => SqlValue::Null,
        serde_json::Value::Bool(b) => SqlValue::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlValue::Integer(i)
            } else if let Some(u) = n.as_u64() {
                SqlValue::Unsigned(u)
            } else if let Some(f) = n.as_f64() {
                SqlValue::Float(f)
            } else {
                SqlValue::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => SqlValue::Text(s),
        other => SqlValue::Json(other),
    }
}

/// Serialize a model into a field map, one entry per top-level field
///
/// Fails when the model does not serialize to a JSON object.
pub fn serialize_to_field_map<T: Serialize>(data: &T) -> Result<FieldMap, serde_json::Error> {
    match serde_json::to_value(data)? {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| (key, value_to_sql_value(value)))
            .collect()),
        _ => Err(serde::ser::Error::custom(
            "model must serialize to an object to be used as a field map",
        )),
    }
}
