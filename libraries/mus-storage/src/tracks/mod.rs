//! Track records and the per-caller catalog projection

use crate::{timestamp, UrlResolver};
use chrono::Utc;
use mus_core::{
    error::Result,
    types::{StorageId, Track, TrackId, TrackOwner, TrackRecord, UserId},
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn record_from_row(row: &SqliteRow) -> Result<TrackRecord> {
    Ok(TrackRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        song: row.try_get("song")?,
        image: row.try_get("image")?,
        owner_id: row.try_get("owner_id")?,
        created_at: timestamp("created_at", row.try_get("created_at")?)?,
    })
}

/// Create a track owned by `owner_id` from an uploaded audio payload
pub async fn create(
    pool: &SqlitePool,
    owner_id: &UserId,
    song: &StorageId,
    title: &str,
) -> Result<TrackRecord> {
    let id = TrackId::generate();
    let created_at = Utc::now().timestamp_millis();

    sqlx::query(
        "INSERT INTO tracks (id, title, song, image, owner_id, created_at)
         VALUES (?, ?, ?, NULL, ?, ?)",
    )
    .bind(&id)
    .bind(title)
    .bind(song)
    .bind(owner_id)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(TrackRecord {
        id,
        title: title.to_string(),
        song: song.clone(),
        image: None,
        owner_id: owner_id.clone(),
        created_at: timestamp("created_at", created_at)?,
    })
}

/// Get track record by ID
pub async fn get_by_id(pool: &SqlitePool, id: &TrackId) -> Result<Option<TrackRecord>> {
    let row = sqlx::query(
        "SELECT id, title, song, image, owner_id, created_at FROM tracks WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(record_from_row).transpose()
}

/// Replace a track's cover image
///
/// Returns `false` when no track has that id.
pub async fn set_image(pool: &SqlitePool, id: &TrackId, image: &StorageId) -> Result<bool> {
    let result = sqlx::query("UPDATE tracks SET image = ? WHERE id = ?")
        .bind(image)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Every track with resolved URLs, its owner, and `caller_id`'s favorite flag
///
/// The favorite marker is looked up by the requesting caller, never by the
/// track's owner. Order is creation order, which is what playlist
/// navigation walks.
pub async fn list_for_caller(
    pool: &SqlitePool,
    caller_id: &UserId,
    urls: &UrlResolver,
) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        r#"
        SELECT
            t.id, t.title, t.song, t.image, t.created_at,
            u.id AS owner_id,
            u.full_name AS owner_name,
            u.image_url AS owner_image,
            EXISTS(
                SELECT 1 FROM favorites f
                WHERE f.user_id = ? AND f.track_id = t.id
            ) AS favorite
        FROM tracks t
        JOIN users u ON u.id = t.owner_id
        ORDER BY t.created_at, t.rowid
        "#,
    )
    .bind(caller_id)
    .fetch_all(pool)
    .await?;

    let mut tracks = Vec::with_capacity(rows.len());
    for row in rows {
        let song: StorageId = row.try_get("song")?;
        let image: Option<StorageId> = row.try_get("image")?;
        let favorite: i64 = row.try_get("favorite")?;

        tracks.push(Track {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            audio_url: urls.storage_url(&song),
            cover_url: image.as_ref().map(|id| urls.storage_url(id)),
            owner: TrackOwner {
                id: row.try_get("owner_id")?,
                display_name: row.try_get("owner_name")?,
                avatar_url: row.try_get("owner_image")?,
            },
            favorite: favorite != 0,
            created_at: timestamp("created_at", row.try_get("created_at")?)?,
        });
    }

    Ok(tracks)
}
