//! User registration and lookup

use crate::timestamp;
use chrono::Utc;
use mus_core::{
    error::{MusError, Result},
    types::{CallerIdentity, User, UserId},
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const USER_COLUMNS: &str = "id, token_identifier, email, full_name, image_url, created_at";

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        token_identifier: row.try_get("token_identifier")?,
        email: row.try_get("email")?,
        full_name: row.try_get("full_name")?,
        image_url: row.try_get("image_url")?,
        created_at: timestamp("created_at", row.try_get("created_at")?)?,
    })
}

/// Look up the user registered for a token identifier
pub async fn get_by_token(pool: &SqlitePool, token_identifier: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE token_identifier = ?"
    ))
    .bind(token_identifier)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get all users, oldest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, rowid"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(user_from_row).collect()
}

/// Outcome of [`store`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub user_id: UserId,
    /// Whether this call inserted the row
    pub created: bool,
}

/// Register a caller, returning the user for its token identifier
///
/// An existing user is returned untouched, its profile is not refreshed.
/// A new user needs an email and a name on the identity. Two concurrent
/// registrations of the same identity converge on one row through the
/// unique token index.
pub async fn store(pool: &SqlitePool, identity: &CallerIdentity) -> Result<Registration> {
    if let Some(user) = get_by_token(pool, &identity.token_identifier).await? {
        return Ok(Registration {
            user_id: user.id,
            created: false,
        });
    }

    let email = identity
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| MusError::invalid_input("identity has no email"))?;
    let full_name = identity
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| MusError::invalid_input("identity has no name"))?;

    let id = UserId::generate();
    let inserted = sqlx::query(
        "INSERT INTO users (id, token_identifier, email, full_name, image_url, created_at)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT(token_identifier) DO NOTHING",
    )
    .bind(&id)
    .bind(&identity.token_identifier)
    .bind(email)
    .bind(full_name)
    .bind(identity.picture_url.as_deref())
    .bind(Utc::now().timestamp_millis())
    .execute(pool)
    .await?
    .rows_affected();

    if inserted == 1 {
        tracing::info!(user_id = %id, "Registered new user");
        return Ok(Registration {
            user_id: id,
            created: true,
        });
    }

    // Lost a race with a concurrent registration of the same identity
    get_by_token(pool, &identity.token_identifier)
        .await?
        .map(|user| Registration {
            user_id: user.id,
            created: false,
        })
        .ok_or_else(|| MusError::UserNotRegistered {
            token_identifier: identity.token_identifier.clone(),
        })
}
