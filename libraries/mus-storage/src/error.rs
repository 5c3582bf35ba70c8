/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored timestamp could not be represented
    #[error("Invalid timestamp in column {column}: {value}")]
    InvalidTimestamp { column: &'static str, value: i64 },

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for mus_core::MusError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Database(e) => mus_core::MusError::Database(e.to_string()),
            other => mus_core::MusError::storage(other.to_string()),
        }
    }
}
