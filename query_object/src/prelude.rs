//! Convenience re-exports for common query-object usage

// Expression nodes and the query aggregate
pub use crate::query_builder::{
    AggregateFunction, ComparisonOperator, Criterion, ErrorMode, GroupBy, LogicalOperator, Order,
    Pagination, Projection, Property, Query, SortOrder,
};

// Legacy argument forms
pub use crate::compat::{to_criterion, to_order, to_restrictions, Combine, OrderArg, RestrictionArg};

// Connections
pub use crate::connection::{Connection, ExecuteOutcome, MemoryConnection, MySqlConnection, Record};

// Repository layer
pub use crate::repository::Repository;
pub use crate::traits::TableModel;

// Error types
pub use crate::errors::QueryError;
pub use crate::validation::ValidationError;

// Value model
pub use type_mapping::{FieldMap, SqlValue};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
