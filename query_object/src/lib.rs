//! Query Object - SQL composition and rendering core for QueryCraft
//!
//! This crate provides the expression nodes, the query aggregate and its
//! renderer, the connection contract with its adapters, and a repository
//! layer built on top of them.

pub mod compat;
pub mod connection;
pub mod errors;
pub mod prelude;
pub mod query_builder;
pub mod repository;
pub mod traits;
pub mod validation;

pub use compat::{Combine, OrderArg, RestrictionArg};
pub use connection::{Connection, ExecuteOutcome, MemoryConnection, MySqlConnection, Record};
pub use errors::QueryError;
pub use query_builder::{
    Criterion, ErrorMode, GroupBy, Order, Pagination, Projection, Property, Query, SortOrder,
};
pub use repository::Repository;
pub use traits::*;
pub use validation::{ValidatedAlias, ValidatedTableName, ValidationError};
