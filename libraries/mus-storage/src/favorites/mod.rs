//! Per-user favorite markers

use chrono::Utc;
use mus_core::{
    error::Result,
    types::{TrackId, UserId},
};
use sqlx::SqlitePool;

/// Mark a track as a user's favorite. Marking twice is a no-op.
///
/// Returns whether a new marker was created.
pub async fn add(pool: &SqlitePool, user_id: &UserId, track_id: &TrackId) -> Result<bool> {
    let result = sqlx::query(
        "INSERT INTO favorites (user_id, track_id, created_at)
         VALUES (?, ?, ?)
         ON CONFLICT(user_id, track_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(track_id)
    .bind(Utc::now().timestamp_millis())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a user's favorite marker. Removing a missing marker is a no-op.
///
/// Returns whether a marker was removed.
pub async fn remove(pool: &SqlitePool, user_id: &UserId, track_id: &TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND track_id = ?")
        .bind(user_id)
        .bind(track_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
