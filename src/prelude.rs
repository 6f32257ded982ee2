//! Convenience re-exports for common QueryCraft usage
//!
//! This prelude module re-exports the most commonly used items from the QueryCraft workspace,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use querycraft::prelude::*;
//!
//! let eq = Criterion::eq("name", "Ann");
//! let order = Order::desc("uid");
//! # let _ = (eq, order);
//! ```

// Core QueryCraft components
pub use crate::core::QueryCraft;
pub use crate::errors::QueryCraftError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, RepositoryConfig};

// Re-export commonly used query-object types for convenience
pub use query_object::prelude::*;

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;
