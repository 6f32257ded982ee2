use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    /// The adapter reported a failure for a rendered statement
    #[error("Database error when {operation}: {message} (SQL: {sql})")]
    Execution {
        operation: &'static str,
        sql: String,
        message: String,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Row mapping error for {target}: {source}")]
    Mapping {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported operator '{0}'")]
    InvalidOperator(String),
}

impl QueryError {
    pub fn execution(operation: &'static str, sql: impl Into<String>, message: impl Into<String>) -> Self {
        QueryError::Execution {
            operation,
            sql: sql.into(),
            message: message.into(),
        }
    }

    pub fn mapping<T>(source: serde_json::Error) -> Self {
        QueryError::Mapping {
            target: std::any::type_name::<T>(),
            source,
        }
    }

    /// Message text as reported by the adapter, if this is an execution failure
    pub fn adapter_message(&self) -> Option<&str> {
        match self {
            QueryError::Execution { message, .. } => Some(message),
            QueryError::Connection(message) => Some(message),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for QueryError {
    fn from(error: sqlx::Error) -> Self {
        QueryError::Connection(error.to_string())
    }
}
