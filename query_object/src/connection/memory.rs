//! In-process adapter that records statements instead of running them
//!
//! Useful for tests and for dry runs that only need the rendered SQL.
//! Result sets are served from a FIFO queue primed by the caller.

use super::{dialect, Connection, ExecuteOutcome, Record};
use crate::errors::QueryError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use type_mapping::SqlValue;

#[derive(Debug, Default)]
pub struct MemoryConnection {
    statements: Mutex<Vec<String>>,
    results: Mutex<VecDeque<Vec<Record>>>,
    affected_rows: Mutex<VecDeque<u64>>,
    insert_ids: Mutex<VecDeque<u64>>,
    pending_failure: Mutex<Option<String>>,
    last_error: Mutex<Option<String>>,
    insert_counter: AtomicU64,
    last_insert_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows returned by the next `query` call
    pub fn push_result(&self, rows: Vec<Record>) {
        lock(&self.results).push_back(rows);
    }

    /// Queue rows given as JSON objects; non-object entries are skipped
    pub fn push_json_rows(&self, rows: serde_json::Value) {
        let records = match rows {
            serde_json::Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            serde_json::Value::Object(map) => vec![map],
            _ => Vec::new(),
        };
        self.push_result(records);
    }

    /// Queue the affected-row count of the next `execute` call (default 1)
    pub fn push_affected_rows(&self, count: u64) {
        lock(&self.affected_rows).push_back(count);
    }

    /// Queue the id reported by the next INSERT instead of the counter
    ///
    /// `0` stands for a table without an auto-increment key.
    pub fn push_insert_id(&self, id: u64) {
        lock(&self.insert_ids).push_back(id);
    }

    /// Make the next statement fail with the given adapter message
    pub fn fail_next(&self, message: impl Into<String>) {
        *lock(&self.pending_failure) = Some(message.into());
    }

    /// All statements seen so far, in execution order
    pub fn statements(&self) -> Vec<String> {
        lock(&self.statements).clone()
    }

    pub fn last_statement(&self) -> Option<String> {
        lock(&self.statements).last().cloned()
    }

    fn record(&self, sql: &str) -> Result<(), String> {
        lock(&self.statements).push(sql.to_string());
        let failure = lock(&self.pending_failure).take();
        *lock(&self.last_error) = failure.clone();
        match failure {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Connection for MemoryConnection {
    async fn query(&self, sql: &str) -> Result<Vec<Record>, QueryError> {
        tracing::debug!(sql, "query (memory)");
        self.record(sql)
            .map_err(|message| QueryError::execution("querying", sql, message))?;
        Ok(lock(&self.results).pop_front().unwrap_or_default())
    }

    /// Consumes one queued result set and returns its first row
    async fn query_one(&self, sql: &str) -> Result<Option<Record>, QueryError> {
        tracing::debug!(sql, "query one (memory)");
        self.record(sql)
            .map_err(|message| QueryError::execution("querying", sql, message))?;
        let rows = lock(&self.results).pop_front().unwrap_or_default();
        Ok(rows.into_iter().next())
    }

    async fn execute(&self, sql: &str) -> Result<ExecuteOutcome, QueryError> {
        tracing::debug!(sql, "execute (memory)");
        self.record(sql)
            .map_err(|message| QueryError::execution("executing", sql, message))?;

        let last_insert_id = if sql.trim_start().to_ascii_uppercase().starts_with("INSERT") {
            match lock(&self.insert_ids).pop_front() {
                Some(id) => id,
                None => self.insert_counter.fetch_add(1, Ordering::SeqCst) + 1,
            }
        } else {
            0
        };
        self.last_insert_id.store(last_insert_id, Ordering::SeqCst);

        Ok(ExecuteOutcome {
            rows_affected: lock(&self.affected_rows).pop_front().unwrap_or(1),
            last_insert_id,
        })
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
        lock(&self.last_error).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_records_statements_and_serves_results() {
        let connection = MemoryConnection::new();
        connection.push_json_rows(json!([{"uid": 1}, {"uid": 2}]));

        let rows = connection.query("SELECT 1").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(connection.query("SELECT 2").await.unwrap().is_empty());
        assert_eq!(connection.statements(), vec!["SELECT 1", "SELECT 2"]);
    }

    #[tokio::test]
    async fn test_failure_sets_and_clears_last_error() {
        let connection = MemoryConnection::new();
        connection.fail_next("table missing");

        let err = connection.execute("DELETE FROM `x`").await.unwrap_err();
        assert_eq!(err.adapter_message(), Some("table missing"));
        assert!(connection.has_error());

        connection.execute("DELETE FROM `x`").await.unwrap();
        assert!(!connection.has_error());
    }

    #[tokio::test]
    async fn test_insert_ids_increase() {
        let connection = MemoryConnection::new();
        connection.execute("INSERT INTO `t` (`a`) VALUES (1)").await.unwrap();
        let outcome = connection.execute("INSERT INTO `t` (`a`) VALUES (2)").await.unwrap();
        assert_eq!(outcome.last_insert_id, 2);
        assert_eq!(connection.last_insert_id(), 2);
    }

    #[tokio::test]
    async fn test_statement_without_generated_id_resets_last_insert_id() {
        let connection = MemoryConnection::new();
        connection.execute("INSERT INTO `t` (`a`) VALUES (1)").await.unwrap();
        connection.push_insert_id(0);

        let outcome = connection.execute("INSERT INTO `u` (`k`) VALUES ('x')").await.unwrap();
        assert_eq!(outcome.last_insert_id, 0);
        assert_eq!(connection.last_insert_id(), 0);
    }

    #[tokio::test]
    async fn test_query_one_consumes_one_result_set() {
        let connection = MemoryConnection::new();
        connection.push_json_rows(json!([{"uid": 1}, {"uid": 2}]));
        connection.push_json_rows(json!([{"uid": 3}]));

        let row = connection.query_one("SELECT 1").await.unwrap().unwrap();
        assert_eq!(row["uid"], json!(1));
        let row = connection.query_one("SELECT 2").await.unwrap().unwrap();
        assert_eq!(row["uid"], json!(3));
        assert!(connection.query_one("SELECT 3").await.unwrap().is_none());
    }
}
