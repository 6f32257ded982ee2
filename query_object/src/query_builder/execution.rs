//! Terminal operations
//!
//! Each operation renders one statement, awaits the adapter once and maps
//! the outcome. Adapter failures are either logged and swallowed or
//! returned, depending on the [`ErrorMode`].

use super::builder::{Query, COUNT_ALIAS};
use crate::connection::{ExecuteOutcome, Record};
use crate::errors::QueryError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use type_mapping::FieldMap;

/// What a terminal operation does when the adapter reports a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Log a warning and return an empty result
    #[default]
    Silent,
    /// Return the failure as `QueryError::Execution`
    Raise,
}

impl ErrorMode {
    pub fn from_flag(raise: bool) -> Self {
        if raise {
            ErrorMode::Raise
        } else {
            ErrorMode::Silent
        }
    }

    fn resolve<R>(self, error: QueryError, fallback: R) -> Result<R, QueryError> {
        match self {
            ErrorMode::Raise => Err(error),
            ErrorMode::Silent => {
                tracing::warn!(error = %error, "statement failed");
                Ok(fallback)
            }
        }
    }
}

/// Map a fetched row onto `T`
pub fn map_record<T: DeserializeOwned>(record: Record) -> Result<T, QueryError> {
    serde_json::from_value(Value::Object(record)).map_err(QueryError::mapping::<T>)
}

/// Read a numeric column that may arrive as a number or as text
pub(crate) fn record_u64(record: &Record, column: &str) -> u64 {
    match record.get(column) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

impl Query {
    /// Fetch all rows matching the query
    pub async fn list<T: DeserializeOwned>(&self, mode: ErrorMode) -> Result<Vec<T>, QueryError> {
        let sql = self.select_sql();
        match self.connection.query(&sql).await {
            Ok(rows) => rows.into_iter().map(map_record).collect(),
            Err(error) => mode.resolve(error, Vec::new()),
        }
    }

    /// Fetch the first matching row, if any
    ///
    /// Only one row is pulled from the adapter; add a limit when the
    /// statement itself should stop early.
    pub async fn first<T: DeserializeOwned>(&self, mode: ErrorMode) -> Result<Option<T>, QueryError> {
        let sql = self.select_sql();
        match self.connection.query_one(&sql).await {
            Ok(row) => row.map(map_record).transpose(),
            Err(error) => mode.resolve(error, None),
        }
    }

    /// Number of matching rows, via [`Query::count_query`]
    pub async fn count(&self, mode: ErrorMode) -> Result<u64, QueryError> {
        let record = self.count_query().first::<Record>(mode).await?;
        Ok(record.map_or(0, |record| record_u64(&record, COUNT_ALIAS)))
    }

    /// Run the UPDATE for `fields`; returns the affected row count
    pub async fn save(&self, fields: &FieldMap, mode: ErrorMode) -> Result<u64, QueryError> {
        Ok(self.try_save(fields, mode).await?.unwrap_or(0))
    }

    /// Like [`Query::save`], but `None` when the UPDATE failed silently
    pub async fn try_save(&self, fields: &FieldMap, mode: ErrorMode) -> Result<Option<u64>, QueryError> {
        let sql = self.update_sql(fields);
        self.run_statement(&sql, mode)
            .await
            .map(|outcome| outcome.map(|o| o.rows_affected))
    }

    /// Run the DELETE; returns the affected row count
    pub async fn delete(&self, mode: ErrorMode) -> Result<u64, QueryError> {
        Ok(self.try_delete(mode).await?.unwrap_or(0))
    }

    /// Like [`Query::delete`], but `None` when the DELETE failed silently
    pub async fn try_delete(&self, mode: ErrorMode) -> Result<Option<u64>, QueryError> {
        let sql = self.delete_sql();
        self.run_statement(&sql, mode)
            .await
            .map(|outcome| outcome.map(|o| o.rows_affected))
    }

    /// Run the INSERT for `fields`; returns the id generated by this
    /// statement (0 without an auto-increment key), `None` on a silent
    /// failure
    pub async fn insert(&self, fields: &FieldMap, mode: ErrorMode) -> Result<Option<u64>, QueryError> {
        let sql = self.insert_sql(fields);
        self.run_statement(&sql, mode)
            .await
            .map(|outcome| outcome.map(|o| o.last_insert_id))
    }

    async fn run_statement(&self, sql: &str, mode: ErrorMode) -> Result<Option<ExecuteOutcome>, QueryError> {
        match self.connection.execute(sql).await {
            Ok(outcome) => Ok(Some(outcome)),
            Err(error) => mode.resolve(error, None),
        }
    }

    pub fn has_error(&self) -> bool {
        self.connection.has_error()
    }

    /// Error text of the last failed statement on this connection
    pub fn error(&self) -> Option<String> {
        self.connection.last_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{Connection, MemoryConnection};
    use crate::query_builder::{Criterion, Order};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        uid: i64,
        name: String,
    }

    fn setup() -> (Arc<MemoryConnection>, Query) {
        let connection = Arc::new(MemoryConnection::new());
        let query = Query::new(connection.clone(), "items", None).unwrap();
        (connection, query)
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let (connection, query) = setup();
        connection.push_json_rows(json!([
            {"uid": 1, "name": "one"},
            {"uid": 2, "name": "two"}
        ]));

        let items: Vec<Item> = query.list(ErrorMode::Raise).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], Item { uid: 2, name: "two".to_string() });
        assert_eq!(connection.last_statement().unwrap(), "SELECT * FROM `items`");
    }

    #[tokio::test]
    async fn test_first_returns_none_for_no_rows() {
        let (_connection, query) = setup();
        let item: Option<Item> = query.first(ErrorMode::Raise).await.unwrap();
        assert!(item.is_none());
    }

    #[tokio::test]
    async fn test_mapping_failure_always_surfaces() {
        let (connection, query) = setup();
        connection.push_json_rows(json!([{"uid": "not a number", "name": "x"}]));

        let result = query.list::<Item>(ErrorMode::Silent).await;
        assert!(matches!(result, Err(QueryError::Mapping { .. })));
    }

    #[tokio::test]
    async fn test_silent_mode_swallows_failures() {
        let (connection, query) = setup();
        connection.fail_next("no such table");

        let items: Vec<Item> = query.list(ErrorMode::Silent).await.unwrap();
        assert!(items.is_empty());
        assert!(query.has_error());
        assert_eq!(query.error().as_deref(), Some("no such table"));
    }

    #[tokio::test]
    async fn test_raise_mode_returns_execution_error() {
        let (connection, query) = setup();
        connection.fail_next("no such table");

        let err = query.delete(ErrorMode::Raise).await.unwrap_err();
        match err {
            QueryError::Execution { sql, message, .. } => {
                assert_eq!(sql, "DELETE FROM `items`");
                assert_eq!(message, "no such table");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_count_strips_ordering_and_pagination() {
        let (connection, query) = setup();
        connection.push_json_rows(json!([{"cnt": 42}]));

        let query = query
            .add(Criterion::eq("name", "x"))
            .add_order(Order::desc("uid"))
            .set_first_result(10)
            .set_max_results(5);
        let count = query.count(ErrorMode::Raise).await.unwrap();

        assert_eq!(count, 42);
        assert_eq!(
            connection.last_statement().unwrap(),
            "SELECT COUNT(*) AS `cnt` FROM `items` WHERE (`name` = 'x')"
        );
    }

    #[tokio::test]
    async fn test_first_reads_a_single_row() {
        let (connection, query) = setup();
        connection.push_json_rows(json!([
            {"uid": 1, "name": "one"},
            {"uid": 2, "name": "two"}
        ]));
        connection.push_json_rows(json!([{"uid": 3, "name": "three"}]));

        let item: Option<Item> = query.first(ErrorMode::Raise).await.unwrap();
        assert_eq!(item.unwrap().uid, 1);
        let item: Option<Item> = query.first(ErrorMode::Raise).await.unwrap();
        assert_eq!(item.unwrap().uid, 3);
    }

    #[tokio::test]
    async fn test_silent_outcome_comes_from_the_statement() {
        let (connection, query) = setup();
        let query = query.add(Criterion::eq("uid", 1));
        let fields = FieldMap::new().with("name", "x");

        connection.fail_next("deadlock");
        assert_eq!(query.try_save(&fields, ErrorMode::Silent).await.unwrap(), None);
        // a later success on the shared connection clears its error state
        connection.execute("SELECT 1").await.unwrap();
        assert!(!connection.has_error());

        connection.fail_next("deadlock");
        assert_eq!(query.try_delete(ErrorMode::Silent).await.unwrap(), None);
        connection.push_affected_rows(0);
        assert_eq!(query.try_delete(ErrorMode::Silent).await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_insert_returns_the_statement_id() {
        let (connection, query) = setup();
        let fields = FieldMap::new().with("name", "x");

        assert_eq!(query.insert(&fields, ErrorMode::Raise).await.unwrap(), Some(1));
        connection.push_insert_id(0);
        assert_eq!(query.insert(&fields, ErrorMode::Raise).await.unwrap(), Some(0));
        assert_eq!(
            connection.last_statement().unwrap(),
            "INSERT INTO `items` (`name`) VALUES ('x')"
        );

        connection.fail_next("duplicate entry");
        assert_eq!(query.insert(&fields, ErrorMode::Silent).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_count_accepts_textual_numbers() {
        let (connection, query) = setup();
        connection.push_json_rows(json!([{"cnt": "7"}]));
        assert_eq!(query.count(ErrorMode::Raise).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_save_and_delete_report_affected_rows() {
        let (connection, query) = setup();
        connection.push_affected_rows(3);

        let query = query.add(Criterion::eq("uid", 1));
        let fields = FieldMap::new().with("name", "renamed");
        assert_eq!(query.save(&fields, ErrorMode::Raise).await.unwrap(), 3);
        assert_eq!(
            connection.last_statement().unwrap(),
            "UPDATE `items` SET `name`='renamed' WHERE (`uid` = 1)"
        );

        assert_eq!(query.delete(ErrorMode::Raise).await.unwrap(), 1);
    }
}
