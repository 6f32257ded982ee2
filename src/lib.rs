//! # QueryCraft
//!
//! Compose SQL statements from typed criteria, projections and orderings
//! instead of hand-written strings, and map result rows onto plain data
//! objects. A thin repository layer gives one accessor per table.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use querycraft::prelude::*;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct User {
//!     pub uid: Option<u64>,
//!     pub name: String,
//!     pub email: String,
//! }
//!
//! impl TableModel for User {
//!     fn table_name() -> &'static str {
//!         "users"
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 3306, "querycraft".to_string(),
//!         "app".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!     let querycraft = QueryCraft::new(config).await?;
//!
//!     let users = querycraft.repository::<User>();
//!     let uid = users
//!         .create(&User { uid: None, name: "John Doe".into(), email: "john@example.com".into() })
//!         .await?;
//!
//!     let recent: Vec<User> = querycraft
//!         .create_query("users", Some("u"))?
//!         .add(Criterion::like("email", "%@example.com").ignore_case())
//!         .add_order(Order::desc("uid"))
//!         .set_max_results(10)
//!         .list(ErrorMode::Raise)
//!         .await?;
//!     println!("created {uid}, {} recent users", recent.len());
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::QueryCraft;
pub use errors::QueryCraftError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, RepositoryConfig};

// Re-export internal crates used by the public API
pub use query_object;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
