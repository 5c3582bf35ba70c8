//! Playlist session
//!
//! Binds a [`PlaylistViewModel`] to a [`CatalogProvider`]. Mounting registers
//! the caller before anything else, then loads the first snapshot; every
//! change reported by the provider triggers a fresh listing. Dropping the
//! session is unmount.

use crate::error::Result;
use crate::types::{NowPlaying, PlaylistConfig, Selection};
use crate::view_model::PlaylistViewModel;
use mus_core::{CatalogProvider, Track, TrackId, UserId};
use tokio::sync::watch;

pub struct PlaylistSession<P: CatalogProvider> {
    provider: P,
    user_id: UserId,
    changes: watch::Receiver<u64>,
    view_model: PlaylistViewModel,
}

impl<P: CatalogProvider> PlaylistSession<P> {
    /// Register the caller, subscribe, then load the first snapshot
    ///
    /// The subscription is taken before the initial listing so a write
    /// landing in between is not missed.
    pub async fn mount(provider: P, config: PlaylistConfig) -> Result<Self> {
        let user_id = provider.register_caller().await?;

        let mut changes = provider.subscribe();
        changes.borrow_and_update();

        let mut session = Self {
            provider,
            user_id,
            changes,
            view_model: PlaylistViewModel::new(config),
        };
        session.refresh().await?;

        tracing::info!(user_id = %session.user_id, "Mounted playlist session");
        Ok(session)
    }

    /// Re-list the catalog and apply it
    pub async fn refresh(&mut self) -> Result<()> {
        let tracks = self.provider.list_tracks().await?;
        tracing::debug!(count = tracks.len(), "Applying catalog snapshot");
        self.view_model.apply_snapshot(tracks);
        Ok(())
    }

    /// Wait for the next catalog change and refresh
    ///
    /// Returns `false` once the provider's feed has closed.
    pub async fn wait_for_change(&mut self) -> Result<bool> {
        if self.changes.changed().await.is_err() {
            tracing::debug!("Catalog feed closed");
            return Ok(false);
        }
        self.changes.borrow_and_update();

        self.refresh().await?;
        Ok(true)
    }

    /// Mark or unmark a track for the current caller, then refresh
    pub async fn set_favorite(&mut self, track_id: TrackId, favorite: bool) -> Result<()> {
        self.provider.set_favorite(track_id, favorite).await?;
        self.refresh().await
    }

    pub fn select(&mut self, track: &Track) -> Result<&Selection> {
        self.view_model.select(track)
    }

    pub fn next(&mut self) -> Result<Option<&NowPlaying>> {
        self.view_model.next()
    }

    pub fn previous(&mut self) -> Result<Option<&NowPlaying>> {
        self.view_model.previous()
    }

    pub fn toggle_favorites_only(&mut self) -> bool {
        self.view_model.toggle_favorites_only()
    }

    pub fn view_model(&self) -> &PlaylistViewModel {
        &self.view_model
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
