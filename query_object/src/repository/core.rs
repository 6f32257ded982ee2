use crate::compat::{to_orders, to_restrictions, Combine, OrderArg, RestrictionArg};
use crate::connection::Connection;
use crate::errors::QueryError;
use crate::query_builder::{ErrorMode, Query};
use crate::traits::TableModel;
use config::RepositoryConfig;
use std::marker::PhantomData;
use std::sync::Arc;

/// Table accessor for one model type
///
/// Every operation is translated into one or more [`Query`] operations on
/// the shared connection.
#[derive(Clone)]
pub struct Repository<T: TableModel> {
    pub(crate) connection: Arc<dyn Connection>,
    pub(crate) id_column: String,
    pub(crate) mode: ErrorMode,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T: TableModel> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table", &T::table_name())
            .field("id_column", &self.id_column)
            .field("mode", &self.mode)
            .finish()
    }
}

impl<T: TableModel> Repository<T> {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self::with_config(connection, &RepositoryConfig::default())
    }

    pub fn with_config(connection: Arc<dyn Connection>, config: &RepositoryConfig) -> Self {
        let id_column = T::id_column()
            .map(str::to_string)
            .unwrap_or_else(|| config.id_column.clone());

        Self {
            connection,
            id_column,
            mode: ErrorMode::from_flag(config.raise_errors),
            _phantom: PhantomData,
        }
    }

    pub fn set_error_mode(&mut self, mode: ErrorMode) {
        self.mode = mode;
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.mode
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn table_name(&self) -> &'static str {
        T::table_name()
    }

    /// Error text of the last failed statement on this connection
    pub fn error(&self) -> Option<String> {
        self.connection.last_error()
    }

    /// Query on this table with restrictions, ordering and pagination
    ///
    /// A negative `first_result` and a non-positive `max_results` leave the
    /// respective bound unset.
    pub fn create_query(
        &self,
        alias: Option<&str>,
        restrictions: Vec<RestrictionArg>,
        orders: Vec<OrderArg>,
        first_result: i64,
        max_results: i64,
    ) -> Result<Query, QueryError> {
        let mut query = Query::new(self.connection.clone(), T::table_name(), alias)?;

        if let Some(criterion) = to_restrictions(restrictions, Combine::And)? {
            query = query.add(criterion);
        }
        for order in to_orders(orders) {
            query = query.add_order(order);
        }
        if first_result >= 0 {
            query = query.set_first_result(first_result);
        }
        if max_results > 0 {
            query = query.set_max_results(max_results);
        }
        Ok(query)
    }

    pub(crate) fn base_query(&self) -> Result<Query, QueryError> {
        Query::new(self.connection.clone(), T::table_name(), None)
    }
}
