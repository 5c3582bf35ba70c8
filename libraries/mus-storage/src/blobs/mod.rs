//! Metadata for uploaded binary payloads

use crate::timestamp;
use mus_core::{
    error::Result,
    types::{Blob, StorageId},
};
use sqlx::{Row, SqlitePool};

/// Record a payload whose bytes have already been written
pub async fn insert(pool: &SqlitePool, blob: &Blob) -> Result<()> {
    sqlx::query("INSERT INTO blobs (id, content_type, size, created_at) VALUES (?, ?, ?, ?)")
        .bind(&blob.id)
        .bind(&blob.content_type)
        .bind(blob.size)
        .bind(blob.created_at.timestamp_millis())
        .execute(pool)
        .await?;

    Ok(())
}

/// Get blob metadata by ID
pub async fn get_by_id(pool: &SqlitePool, id: &StorageId) -> Result<Option<Blob>> {
    let row = sqlx::query("SELECT id, content_type, size, created_at FROM blobs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(Blob {
            id: row.try_get("id")?,
            content_type: row.try_get("content_type")?,
            size: row.try_get("size")?,
            created_at: timestamp("created_at", row.try_get("created_at")?)?,
        })),
        None => Ok(None),
    }
}

/// Check if a blob exists
pub async fn exists(pool: &SqlitePool, id: &StorageId) -> Result<bool> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM blobs WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(row.try_get::<i64, _>("count")? > 0)
}
