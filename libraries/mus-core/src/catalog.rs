//! Catalog provider trait and change feed

use crate::error::Result;
use crate::types::{StorageId, Track, TrackId, UploadTarget, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

/// Access to the track catalog on behalf of one caller
///
/// Implementations carry the caller's identity themselves (the local
/// SQLite provider is built per request, the HTTP client holds a token), so
/// no operation takes the caller as an argument.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Register the current caller, returning the existing id when already
    /// registered. Safe to call on every mount.
    async fn register_caller(&self) -> Result<UserId>;

    /// Every track visible to the caller, in catalog order
    async fn list_tracks(&self) -> Result<Vec<Track>>;

    /// Issue a single-use handle for uploading a binary payload
    async fn request_upload_target(&self) -> Result<UploadTarget>;

    /// Create a track owned by the caller from an uploaded audio payload
    async fn register_uploaded_track(
        &self,
        storage_id: StorageId,
        title: &str,
    ) -> Result<TrackId>;

    /// Attach an uploaded image as the track's cover
    async fn attach_cover_image(&self, track_id: TrackId, image: StorageId) -> Result<()>;

    /// Add or remove the caller's favorite marker on a track
    async fn set_favorite(&self, track_id: TrackId, favorite: bool) -> Result<()>;

    /// Receiver that observes the catalog version moving on every write
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// Monotonic catalog version shared by everything that writes the catalog
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: Arc<watch::Sender<u64>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Current version
    pub fn version(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Bump the version, waking every subscriber
    pub fn notify(&self) -> u64 {
        let mut next = 0;
        self.tx.send_modify(|version| {
            *version += 1;
            next = *version;
        });
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_bumps_version() {
        let feed = ChangeFeed::new();
        assert_eq!(feed.version(), 0);
        assert_eq!(feed.notify(), 1);
        assert_eq!(feed.notify(), 2);
        assert_eq!(feed.version(), 2);
    }

    #[test]
    fn clones_share_one_version() {
        let feed = ChangeFeed::new();
        let other = feed.clone();
        other.notify();
        assert_eq!(feed.version(), 1);
    }

    #[test]
    fn subscribers_see_changes() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();
        assert!(!rx.has_changed().unwrap());

        feed.notify();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
    }
}
