//! Value type definitions
//!
//! This module provides the value model used for SQL literals
//! and the conversions from common Rust types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value that can be rendered as a SQL literal by a connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    Timestamp(chrono::NaiveDateTime),
    Json(serde_json::Value), // Structured values, stored as JSON text
}

impl SqlValue {
    /// Whether this value is textual (eligible for case folding)
    pub fn is_text(&self) -> bool {
        matches!(self, SqlValue::Text(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Lower-case a textual value; any other value is returned unchanged
    pub fn to_lowercase(&self) -> SqlValue {
        match self {
            SqlValue::Text(s) => SqlValue::Text(s.to_lowercase()),
            other => other.clone(),
        }
    }
}

impl From<String> for SqlValue {
    fn from(val: String) -> Self {
        SqlValue::Text(val)
    }
}

impl From<&str> for SqlValue {
    fn from(val: &str) -> Self {
        SqlValue::Text(val.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(val: &String) -> Self {
        SqlValue::Text(val.clone())
    }
}

impl From<i16> for SqlValue {
    fn from(val: i16) -> Self {
        SqlValue::Integer(val as i64)
    }
}

impl From<i32> for SqlValue {
    fn from(val: i32) -> Self {
        SqlValue::Integer(val as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(val: i64) -> Self {
        SqlValue::Integer(val)
    }
}

impl From<u32> for SqlValue {
    fn from(val: u32) -> Self {
        SqlValue::Unsigned(val as u64)
    }
}

impl From<u64> for SqlValue {
    fn from(val: u64) -> Self {
        SqlValue::Unsigned(val)
    }
}

impl From<f64> for SqlValue {
    fn from(val: f64) -> Self {
        SqlValue::Float(val)
    }
}

impl From<bool> for SqlValue {
    fn from(val: bool) -> Self {
        SqlValue::Boolean(val)
    }
}

impl From<Uuid> for SqlValue {
    fn from(val: Uuid) -> Self {
        SqlValue::Text(val.hyphenated().to_string())
    }
}

impl From<chrono::NaiveDateTime> for SqlValue {
    fn from(val: chrono::NaiveDateTime) -> Self {
        SqlValue::Timestamp(val)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for SqlValue {
    fn from(val: chrono::DateTime<chrono::Utc>) -> Self {
        SqlValue::Timestamp(val.naive_utc())
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(val: serde_json::Value) -> Self {
        crate::serialize::value_to_sql_value(val)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}
