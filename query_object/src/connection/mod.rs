//! Connection adapters
//!
//! The query engine talks to a database only through the [`Connection`]
//! trait: it hands over rendered SQL text and asks for identifier and
//! value quoting. Everything engine-specific lives behind it.

pub mod dialect;
pub mod memory;
pub mod mysql;

use crate::errors::QueryError;
use async_trait::async_trait;
use std::fmt::Debug;
use type_mapping::SqlValue;

pub use memory::MemoryConnection;
pub use mysql::MySqlConnection;

/// One fetched row as a generic property bag
pub type Record = serde_json::Map<String, serde_json::Value>;

/// What a non-row-returning statement reported back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecuteOutcome {
    pub rows_affected: u64,
    /// Auto-increment id generated by this statement; 0 when none was
    pub last_insert_id: u64,
}

/// Contract between the query engine and a database connection
#[async_trait]
pub trait Connection: Send + Sync + Debug {
    /// Execute a row-returning statement and fetch all rows
    async fn query(&self, sql: &str) -> Result<Vec<Record>, QueryError>;

    /// Execute a row-returning statement and fetch only its first row
    async fn query_one(&self, sql: &str) -> Result<Option<Record>, QueryError>;

    /// Execute a statement and report affected rows and generated id
    async fn execute(&self, sql: &str) -> Result<ExecuteOutcome, QueryError>;

    /// Quote a single identifier (table, column or alias)
    fn quote_identifier(&self, name: &str) -> String;

    /// Render a value as an escaped SQL literal
    fn quote_value(&self, value: &SqlValue) -> String;

    /// Id reported by the most recent statement on this connection
    ///
    /// Shared by every caller of the connection; prefer
    /// [`ExecuteOutcome::last_insert_id`] for the statement you ran.
    fn last_insert_id(&self) -> u64;

    /// Error text of the last failed statement, cleared by the next success
    fn last_error(&self) -> Option<String>;

    fn has_error(&self) -> bool {
        self.last_error().is_some()
    }
}
