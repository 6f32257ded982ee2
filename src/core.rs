//! Core QueryCraft functionality
//!
//! This module contains the main QueryCraft struct, the entry point that
//! owns the connection and hands out queries and repositories bound to it.

use std::sync::Arc;

use config::{AppConfig, DatabaseConfig, RepositoryConfig};
use query_object::compat::{Combine, RestrictionArg, to_restrictions};
use query_object::{Connection, ErrorMode, MySqlConnection, Query, Record, Repository, TableModel};
use type_mapping::FieldMap;

use crate::errors::QueryCraftError;

/// Main QueryCraft coordinator
#[derive(Debug, Clone)]
pub struct QueryCraft {
    connection: Arc<dyn Connection>,
    repository_config: RepositoryConfig,
}

impl QueryCraft {
    /// Connect to the database described by `config`
    pub async fn new(config: DatabaseConfig) -> Result<Self, QueryCraftError> {
        config.validate()?;
        let connection = MySqlConnection::connect(&config).await?;
        crate::debug_log!(host = %config.host, database = %config.database, "connected");
        Ok(Self::with_connection(Arc::new(connection)))
    }

    /// Connect using a full application configuration
    pub async fn from_config(config: &AppConfig) -> Result<Self, QueryCraftError> {
        let querycraft = Self::new(config.database.clone()).await?;
        Ok(querycraft.with_repository_config(config.repository.clone()))
    }

    /// Wrap an existing connection
    pub fn with_connection(connection: Arc<dyn Connection>) -> Self {
        Self {
            connection,
            repository_config: RepositoryConfig::default(),
        }
    }

    pub fn with_repository_config(mut self, config: RepositoryConfig) -> Self {
        self.repository_config = config;
        self
    }

    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    fn error_mode(&self) -> ErrorMode {
        ErrorMode::from_flag(self.repository_config.raise_errors)
    }

    /// Start a query on `table`
    pub fn create_query(&self, table: &str, alias: Option<&str>) -> Result<Query, QueryCraftError> {
        Ok(Query::new(self.connection.clone(), table, alias)?)
    }

    /// Repository for a model type, using the configured defaults
    pub fn repository<T: TableModel>(&self) -> Repository<T> {
        Repository::with_config(self.connection.clone(), &self.repository_config)
    }

    fn restricted_query(
        &self,
        table: &str,
        restrictions: Vec<RestrictionArg>,
    ) -> Result<Query, QueryCraftError> {
        let mut query = self.create_query(table, None)?;
        if let Some(criterion) = to_restrictions(restrictions, Combine::And)? {
            query = query.add(criterion);
        }
        Ok(query)
    }

    /// Insert one row and return the id generated by that INSERT
    ///
    /// 0 when the table has no auto-increment key or the insert failed
    /// silently.
    pub async fn insert(&self, table: &str, fields: &FieldMap) -> Result<u64, QueryCraftError> {
        let id = self
            .create_query(table, None)?
            .insert(fields, self.error_mode())
            .await?;
        crate::trace_log!(table, ?id, "insert");
        Ok(id.unwrap_or(0))
    }

    /// Update matching rows, then read them back
    pub async fn update(
        &self,
        table: &str,
        fields: &FieldMap,
        restrictions: Vec<RestrictionArg>,
    ) -> Result<Vec<Record>, QueryCraftError> {
        let query = self.restricted_query(table, restrictions)?;
        let mode = self.error_mode();

        if query.try_save(fields, mode).await?.is_none() {
            return Ok(Vec::new());
        }
        Ok(query.list::<Record>(mode).await?)
    }

    /// Delete matching rows and return how many were removed
    pub async fn delete(
        &self,
        table: &str,
        restrictions: Vec<RestrictionArg>,
    ) -> Result<u64, QueryCraftError> {
        let query = self.restricted_query(table, restrictions)?;
        Ok(query.delete(self.error_mode()).await?)
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), QueryCraftError> {
        self.connection.query("SELECT 1").await?;
        Ok(())
    }
}
