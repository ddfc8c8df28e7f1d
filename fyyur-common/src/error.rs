//! Common error types for Fyyur

use thiserror::Error;

/// Common result type for Fyyur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the store, the directory operations and the web layer
#[derive(Error, Debug)]
pub enum Error {
    /// Read-side database error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A write could not be committed; the transaction was rolled back
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap a store failure that happened inside a write transaction
    pub fn persistence(source: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        let detail = match &source {
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::ForeignKeyViolation => {
                    format!("referenced record does not exist ({})", db.message())
                }
                ErrorKind::UniqueViolation => format!("duplicate record ({})", db.message()),
                ErrorKind::NotNullViolation => format!("missing required value ({})", db.message()),
                ErrorKind::CheckViolation => format!("invalid value ({})", db.message()),
                _ => db.message().to_string(),
            },
            other => other.to_string(),
        };

        Error::Persistence(detail)
    }
}
