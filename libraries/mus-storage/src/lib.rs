//! Mus Player Storage
//!
//! `SQLite` implementation of the track catalog: users, tracks, favorite
//! markers, uploaded payload metadata and upload targets.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each table owns a module of plain query functions
//! - **Caller Context**: [`LocalCatalog`] wraps the pool with the identity of
//!   the caller and implements `CatalogProvider`
//! - **Change Feed**: every catalog write bumps a shared version counter
//!
//! # Example
//!
//! ```rust,no_run
//! use mus_core::{CallerIdentity, CatalogProvider, ChangeFeed};
//! use mus_storage::{create_pool, run_migrations, LocalCatalog, UrlResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://mus.db").await?;
//! run_migrations(&pool).await?;
//!
//! let catalog = LocalCatalog::new(pool, UrlResolver::new("http://localhost:8080"), ChangeFeed::new())
//!     .for_caller(Some(CallerIdentity::with_profile("dev|ada", "ada@example.com", "Ada", None)));
//!
//! catalog.register_caller().await?;
//! let tracks = catalog.list_tracks().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod urls;

// Vertical slices
pub mod blobs;
pub mod favorites;
pub mod tracks;
pub mod uploads;
pub mod users;

pub use context::{LocalCatalog, DEFAULT_UPLOAD_TTL_SECS};
pub use error::StorageError;
pub use urls::UrlResolver;

use chrono::{DateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before building any [`LocalCatalog`].
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://mus.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("SQLite pool ready");

    Ok(pool)
}

/// Decode a millisecond timestamp column
pub(crate) fn timestamp(column: &'static str, value: i64) -> Result<DateTime<Utc>, StorageError> {
    DateTime::from_timestamp_millis(value).ok_or(StorageError::InvalidTimestamp { column, value })
}
