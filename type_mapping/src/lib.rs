//! Unified value mapping between Rust types and SQL literals
//! This crate provides the value model shared across the querycraft ecosystem

pub mod field_map;
pub mod serialize;
pub mod types;

pub use field_map::FieldMap;
pub use serialize::{serialize_to_field_map, value_to_sql_value};
pub use types::SqlValue;
