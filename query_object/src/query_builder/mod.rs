//! Query builder
//!
//! Expression nodes, the `Query` aggregate and the renderer that turns
//! them into SELECT, UPDATE, DELETE and INSERT statements.

pub mod builder;
pub mod criterion;
pub mod execution;
pub mod grouping;
pub mod join;
pub mod ordering;
pub mod pagination;
pub mod projection;
pub mod property;
pub mod sql_generation;


pub use builder::{Query, COUNT_ALIAS};
pub use criterion::{ComparisonOperator, Criterion, LogicalOperator};
pub use execution::ErrorMode;
pub use grouping::GroupBy;
pub use join::JoinClause;
pub use ordering::{Order, SortOrder};
pub use pagination::Pagination;
pub use projection::{AggregateFunction, Projection};
pub use property::Property;
