//! MySQL adapter backed by an sqlx connection pool

use super::{dialect, Connection, ExecuteOutcome, Record};
use crate::errors::QueryError;
use async_trait::async_trait;
use config::DatabaseConfig;
use serde_json::Value;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Row, TypeInfo};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use type_mapping::SqlValue;

/// Connection adapter for MySQL/MariaDB servers
#[derive(Debug)]
pub struct MySqlConnection {
    pool: MySqlPool,
    last_error: Mutex<Option<String>>,
    last_insert_id: AtomicU64,
}

impl MySqlConnection {
    /// Open a pool using the given configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, QueryError> {
        let mut pool_options = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&config.connection_string()).await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self {
            pool,
            last_error: Mutex::new(None),
            last_insert_id: AtomicU64::new(0),
        }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    fn record_outcome<T>(&self, result: &Result<T, QueryError>) {
        let message = result
            .as_ref()
            .err()
            .map(|e| e.adapter_message().map_or_else(|| e.to_string(), str::to_string));
        if let Ok(mut last_error) = self.last_error.lock() {
            *last_error = message;
        }
    }
}

#[async_trait]
impl Connection for MySqlConnection {
    async fn query(&self, sql: &str) -> Result<Vec<Record>, QueryError> {
        tracing::debug!(sql, "query");
        let result = match sqlx::query(sql).persistent(false).fetch_all(&self.pool).await {
            Ok(rows) => rows
                .iter()
                .map(row_to_record)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| QueryError::execution("decoding", sql, e.to_string())),
            Err(e) => Err(QueryError::execution("querying", sql, e.to_string())),
        };
        self.record_outcome(&result);
        result
    }

    async fn query_one(&self, sql: &str) -> Result<Option<Record>, QueryError> {
        tracing::debug!(sql, "query one");
        let result = match sqlx::query(sql)
            .persistent(false)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(row) => row
                .as_ref()
                .map(row_to_record)
                .transpose()
                .map_err(|e| QueryError::execution("decoding", sql, e.to_string())),
            Err(e) => Err(QueryError::execution("querying", sql, e.to_string())),
        };
        self.record_outcome(&result);
        result
    }

    async fn execute(&self, sql: &str) -> Result<ExecuteOutcome, QueryError> {
        tracing::debug!(sql, "execute");
        let result = sqlx::query(sql)
            .persistent(false)
            .execute(&self.pool)
            .await
            .map(|done| ExecuteOutcome {
                rows_affected: done.rows_affected(),
                last_insert_id: done.last_insert_id(),
            })
            .map_err(|e| QueryError::execution("executing", sql, e.to_string()));
        self.record_outcome(&result);

        let outcome = result?;
        self.last_insert_id
            .store(outcome.last_insert_id, Ordering::SeqCst);
        Ok(outcome)
    }

    fn quote_identifier(&self, name: &str) -> String {
        dialect::quote_identifier(name)
    }

    fn quote_value(&self, value: &SqlValue) -> String {
        dialect::quote_value(value)
    }

    fn last_insert_id(&self) -> u64 {
        self.last_insert_id.load(Ordering::SeqCst)
    }

    fn last_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|e| e.clone())
    }
}

/// How a column is decoded, chosen from the type name the server reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Boolean,
    Signed,
    Unsigned,
    Float,
    Double,
    Decimal,
    DateTime,
    Date,
    Time,
    Json,
    Binary,
    Text,
}

impl ColumnKind {
    fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "BOOLEAN" => ColumnKind::Boolean,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => ColumnKind::Signed,
            t if t.ends_with("UNSIGNED") => ColumnKind::Unsigned,
            "FLOAT" => ColumnKind::Float,
            "DOUBLE" => ColumnKind::Double,
            "DECIMAL" => ColumnKind::Decimal,
            "DATETIME" | "TIMESTAMP" => ColumnKind::DateTime,
            "DATE" => ColumnKind::Date,
            "TIME" => ColumnKind::Time,
            "JSON" => ColumnKind::Json,
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
                ColumnKind::Binary
            }
            _ => ColumnKind::Text,
        }
    }
}

/// Decode a fetched row column by column into a property bag
fn row_to_record(row: &MySqlRow) -> Result<Record, sqlx::Error> {
    let mut record = Record::new();
    for column in row.columns() {
        let kind = ColumnKind::from_type_name(column.type_info().name());
        let value = decode_column(row, column.ordinal(), kind)?;
        record.insert(column.name().to_string(), value);
    }
    Ok(record)
}

fn decode_column(row: &MySqlRow, index: usize, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    let value = match kind {
        ColumnKind::Boolean => row.try_get::<Option<bool>, _>(index)?.map(Value::from),
        ColumnKind::Signed => row.try_get::<Option<i64>, _>(index)?.map(Value::from),
        ColumnKind::Unsigned => row.try_get::<Option<u64>, _>(index)?.map(Value::from),
        ColumnKind::Float => row
            .try_get::<Option<f32>, _>(index)?
            .map(|f| float_value(f as f64)),
        ColumnKind::Double => row.try_get::<Option<f64>, _>(index)?.map(float_value),
        // DECIMAL travels as text on the wire, keep it that way to preserve precision
        ColumnKind::Decimal => row
            .try_get_unchecked::<Option<String>, _>(index)?
            .map(Value::String),
        ColumnKind::DateTime => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(index)?
            .map(|ts| Value::String(ts.format(dialect::TIMESTAMP_FORMAT).to_string())),
        ColumnKind::Date => row
            .try_get::<Option<chrono::NaiveDate>, _>(index)?
            .map(|d| Value::String(d.to_string())),
        ColumnKind::Time => row
            .try_get::<Option<chrono::NaiveTime>, _>(index)?
            .map(|t| Value::String(t.to_string())),
        ColumnKind::Json => row.try_get::<Option<Value>, _>(index)?,
        ColumnKind::Binary => row
            .try_get::<Option<Vec<u8>>, _>(index)?
            .map(|bytes| binary_value(&bytes)),
        ColumnKind::Text => row
            .try_get_unchecked::<Option<String>, _>(index)?
            .map(Value::String),
    };
    Ok(value.unwrap_or(Value::Null))
}

/// Non-finite floats have no JSON form and become null
fn float_value(f: f64) -> Value {
    serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
}

fn binary_value(bytes: &[u8]) -> Value {
    Value::String(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_kind_dispatch() {
        let cases = [
            ("BOOLEAN", ColumnKind::Boolean),
            ("TINYINT", ColumnKind::Signed),
            ("BIGINT", ColumnKind::Signed),
            ("INT UNSIGNED", ColumnKind::Unsigned),
            ("BIGINT UNSIGNED", ColumnKind::Unsigned),
            ("FLOAT", ColumnKind::Float),
            ("DOUBLE", ColumnKind::Double),
            ("DECIMAL", ColumnKind::Decimal),
            ("DATETIME", ColumnKind::DateTime),
            ("TIMESTAMP", ColumnKind::DateTime),
            ("DATE", ColumnKind::Date),
            ("TIME", ColumnKind::Time),
            ("JSON", ColumnKind::Json),
            ("VARBINARY", ColumnKind::Binary),
            ("LONGBLOB", ColumnKind::Binary),
            ("VARCHAR", ColumnKind::Text),
            ("CHAR", ColumnKind::Text),
            ("ENUM", ColumnKind::Text),
            ("NULL", ColumnKind::Text),
        ];
        for (type_name, expected) in cases {
            assert_eq!(ColumnKind::from_type_name(type_name), expected, "{type_name}");
        }
    }

    #[test]
    fn test_float_values() {
        assert_eq!(float_value(1.5), json!(1.5));
        assert_eq!(float_value(f64::NAN), Value::Null);
        assert_eq!(float_value(f64::INFINITY), Value::Null);
    }

    #[test]
    fn test_binary_values_are_lossy_text() {
        assert_eq!(binary_value(b"abc"), json!("abc"));
        assert_eq!(binary_value(&[0x61, 0xff]), json!("a\u{fffd}"));
    }
}
