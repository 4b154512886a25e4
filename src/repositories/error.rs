//! Store errors
//!
//! Every repository returns `StoreError` so that the services do not depend on
//! the backend in use. `sqlx` errors are classified here once.

use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("storage unavailable")]
    Unavailable,

    #[error("generated id {0} does not fit the id column")]
    IdOutOfRange(u64),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Self::UniqueViolation(db.message().to_string())
            }
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                Self::Constraint(db.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => Self::Unavailable,
            other => {
                error!("Database error: {:?}", other);
                Self::Database(other)
            }
        }
    }
}
