use crate::{favorites, tracks, uploads, users, UrlResolver};
use async_trait::async_trait;
use chrono::Duration;
use mus_core::{
    catalog::{CatalogProvider, ChangeFeed},
    error::{MusError, Result},
    types::*,
};
use sqlx::SqlitePool;
use tokio::sync::watch;

/// Default lifetime of an issued upload target
pub const DEFAULT_UPLOAD_TTL_SECS: i64 = 3600;

/// SQLite catalog acting on behalf of one (possibly anonymous) caller
///
/// Cheap to build; the server creates one per request from shared parts.
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    pool: SqlitePool,
    urls: UrlResolver,
    feed: ChangeFeed,
    caller: Option<CallerIdentity>,
    upload_ttl: Duration,
}

impl LocalCatalog {
    /// Anonymous catalog; every operation fails with `Unauthorized` until a
    /// caller is attached with [`LocalCatalog::for_caller`]
    pub fn new(pool: SqlitePool, urls: UrlResolver, feed: ChangeFeed) -> Self {
        Self {
            pool,
            urls,
            feed,
            caller: None,
            upload_ttl: Duration::seconds(DEFAULT_UPLOAD_TTL_SECS),
        }
    }

    /// Same catalog acting for `caller`
    pub fn for_caller(&self, caller: Option<CallerIdentity>) -> Self {
        Self {
            caller,
            ..self.clone()
        }
    }

    pub fn with_upload_ttl(mut self, ttl: Duration) -> Self {
        self.upload_ttl = ttl;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn urls(&self) -> &UrlResolver {
        &self.urls
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    pub fn caller(&self) -> Option<&CallerIdentity> {
        self.caller.as_ref()
    }

    fn identity(&self) -> Result<&CallerIdentity> {
        self.caller
            .as_ref()
            .ok_or_else(|| MusError::unauthorized("no authenticated caller"))
    }

    /// The registered user behind the current caller
    pub async fn current_user(&self) -> Result<User> {
        let identity = self.identity()?;
        users::get_by_token(&self.pool, &identity.token_identifier)
            .await?
            .ok_or_else(|| MusError::UserNotRegistered {
                token_identifier: identity.token_identifier.clone(),
            })
    }

    async fn existing_track(&self, track_id: &TrackId) -> Result<TrackRecord> {
        tracks::get_by_id(&self.pool, track_id)
            .await?
            .ok_or_else(|| MusError::TrackNotFound(track_id.clone()))
    }

    async fn ensure_blob(&self, storage_id: &StorageId) -> Result<()> {
        if crate::blobs::exists(&self.pool, storage_id).await? {
            Ok(())
        } else {
            Err(MusError::BlobNotFound(storage_id.clone()))
        }
    }
}

#[async_trait]
impl CatalogProvider for LocalCatalog {
    async fn register_caller(&self) -> Result<UserId> {
        let registration = users::store(&self.pool, self.identity()?).await?;
        if registration.created {
            self.feed.notify();
        }
        Ok(registration.user_id)
    }

    async fn list_tracks(&self) -> Result<Vec<Track>> {
        let user = self.current_user().await?;
        let tracks = tracks::list_for_caller(&self.pool, &user.id, &self.urls).await?;
        tracing::debug!(user_id = %user.id, count = tracks.len(), "Listed catalog");
        Ok(tracks)
    }

    async fn request_upload_target(&self) -> Result<UploadTarget> {
        let user = self.current_user().await?;
        let (upload_id, expires_at) =
            uploads::create(&self.pool, &user.id, self.upload_ttl).await?;

        Ok(UploadTarget {
            url: self.urls.upload_url(&upload_id),
            upload_id,
            expires_at,
        })
    }

    async fn register_uploaded_track(
        &self,
        storage_id: StorageId,
        title: &str,
    ) -> Result<TrackId> {
        let user = self.current_user().await?;

        let title = title.trim();
        if title.is_empty() {
            return Err(MusError::invalid_input("track title cannot be empty"));
        }
        self.ensure_blob(&storage_id).await?;

        let record = tracks::create(&self.pool, &user.id, &storage_id, title).await?;
        tracing::info!(track_id = %record.id, owner_id = %user.id, "Registered uploaded track");

        self.feed.notify();
        Ok(record.id)
    }

    async fn attach_cover_image(&self, track_id: TrackId, image: StorageId) -> Result<()> {
        let user = self.current_user().await?;
        let track = self.existing_track(&track_id).await?;

        if track.owner_id != user.id {
            return Err(MusError::permission_denied(
                "only the track owner can change its cover",
            ));
        }
        self.ensure_blob(&image).await?;

        tracks::set_image(&self.pool, &track_id, &image).await?;
        tracing::info!(track_id = %track_id, "Attached cover image");

        self.feed.notify();
        Ok(())
    }

    async fn set_favorite(&self, track_id: TrackId, favorite: bool) -> Result<()> {
        let user = self.current_user().await?;
        self.existing_track(&track_id).await?;

        let changed = if favorite {
            favorites::add(&self.pool, &user.id, &track_id).await?
        } else {
            favorites::remove(&self.pool, &user.id, &track_id).await?
        };

        if changed {
            tracing::debug!(track_id = %track_id, favorite, "Updated favorite");
            self.feed.notify();
        }
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.feed.subscribe()
    }
}
