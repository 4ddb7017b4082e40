//! # Database Errors
//!
//! ```text
//!   sqlx::Error ─────┐
//!   MigrateError ────┼──► DbError ──► ApiError { code, message }
//!   ValidationError ─┘
//! ```

use bookstore_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A UNIQUE column already holds a value (only `books.isbn` today).
    /// SQLite names the column but not the value, so `value` is only
    /// known when the caller fills it in.
    #[error("Duplicate {field}{} already exists", quoted(.value))]
    UniqueViolation { field: String, value: Option<String> },

    /// Rejected before reaching SQLite.
    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite refused the statement, e.g. a CHECK constraint.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: Some(value.into()),
        }
    }

    /// Whether retrying later could succeed.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DbError::ConnectionFailed(_) | DbError::MigrationFailed(_) | DbError::PoolExhausted
        )
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                // "UNIQUE constraint failed: books.isbn"
                match msg.strip_prefix("UNIQUE constraint failed: ") {
                    Some(field) => DbError::UniqueViolation {
                        field: field.to_string(),
                        value: None,
                    },
                    None => DbError::QueryFailed(msg.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

fn quoted(value: &Option<String>) -> String {
    value.as_ref().map(|v| format!(": '{}'", v)).unwrap_or_default()
}
