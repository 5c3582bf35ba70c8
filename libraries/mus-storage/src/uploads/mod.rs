//! Single-use upload targets

use chrono::{DateTime, Duration, Utc};
use mus_core::{
    error::{MusError, Result},
    types::{UploadId, UserId},
};
use sqlx::{Row, SqlitePool};

/// Issue a new upload credential for `user_id`, valid for `ttl`
///
/// Returns the credential and its deadline.
pub async fn create(
    pool: &SqlitePool,
    user_id: &UserId,
    ttl: Duration,
) -> Result<(UploadId, DateTime<Utc>)> {
    let id = UploadId::generate();
    let now = Utc::now();
    let expires_at = now + ttl;

    sqlx::query(
        "INSERT INTO upload_targets (id, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(user_id)
    .bind(now.timestamp_millis())
    .bind(expires_at.timestamp_millis())
    .execute(pool)
    .await?;

    Ok((id, expires_at))
}

/// Use up an upload credential
///
/// The credential is deleted even when it turns out to be expired, so a
/// second attempt reports `UploadNotFound`.
pub async fn consume(pool: &SqlitePool, id: &UploadId, now: DateTime<Utc>) -> Result<UserId> {
    let row = sqlx::query("DELETE FROM upload_targets WHERE id = ? RETURNING user_id, expires_at")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| MusError::UploadNotFound(id.clone()))?;

    let expires_at: i64 = row.try_get("expires_at")?;
    if now.timestamp_millis() >= expires_at {
        tracing::debug!(upload_id = %id, "Rejected expired upload target");
        return Err(MusError::UploadExpired(id.clone()));
    }

    Ok(row.try_get("user_id")?)
}

/// Delete every credential past its deadline
///
/// Returns the number of credentials removed.
pub async fn purge_expired(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM upload_targets WHERE expires_at <= ?")
        .bind(now.timestamp_millis())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
