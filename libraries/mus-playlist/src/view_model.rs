//! Playlist view model
//!
//! Holds the latest catalog snapshot, the favorites filter and the current
//! selection. The filtered view is derived on every read and never stored,
//! so it can not drift from the catalog it was computed from.
//!
//! Navigation wraps around in both directions:
//! - `next()` from the last entry (or with no index) goes to the first
//! - `previous()` from the first entry (or with no index) goes to the last

use crate::error::{PlaylistError, Result};
use crate::types::{CatalogState, NowPlaying, PlaylistConfig, Selection, TogglePolicy};
use mus_core::{Track, TrackId};

/// Single-owner playlist state, mutated through `&mut self`
#[derive(Debug, Clone, Default)]
pub struct PlaylistViewModel {
    config: PlaylistConfig,
    catalog: CatalogState,
    favorites_only: bool,
    selection: Selection,
}

impl PlaylistViewModel {
    pub fn new(config: PlaylistConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PlaylistConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.catalog, CatalogState::Loading)
    }

    /// Latest snapshot, `None` while loading
    pub fn catalog(&self) -> Option<&[Track]> {
        self.catalog.tracks()
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.selection.now_playing.as_ref()
    }

    /// Tracks shown to the user, in catalog order
    ///
    /// Empty while loading.
    pub fn filtered_view(&self) -> Vec<&Track> {
        self.catalog
            .tracks()
            .unwrap_or_default()
            .iter()
            .filter(|track| !self.favorites_only || track.favorite)
            .collect()
    }

    /// Play `track`
    ///
    /// The track is looked up by id and its display fields are taken from
    /// the catalog's copy. The index is the track's position in the current
    /// view, or `None` when the view does not contain it.
    pub fn select(&mut self, track: &Track) -> Result<&Selection> {
        self.ensure_loaded()?;

        let now_playing = self
            .catalog
            .tracks()
            .and_then(|tracks| tracks.iter().find(|t| t.id == track.id))
            .map(NowPlaying::from)
            .ok_or_else(|| PlaylistError::TrackNotInCatalog(track.id.clone()))?;

        let index = self.position_in_view(&track.id);
        self.selection = Selection {
            now_playing: Some(now_playing),
            index,
        };
        Ok(&self.selection)
    }

    /// Advance to the next track in the view, wrapping to the first
    ///
    /// Returns `Ok(None)` without touching the selection when the view is
    /// empty.
    pub fn next(&mut self) -> Result<Option<&NowPlaying>> {
        self.ensure_loaded()?;

        let len = self.filtered_view().len();
        if len == 0 {
            return Ok(None);
        }

        let target = match self.selection.index {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        Ok(self.play_at(target))
    }

    /// Step back to the previous track in the view, wrapping to the last
    pub fn previous(&mut self) -> Result<Option<&NowPlaying>> {
        self.ensure_loaded()?;

        let len = self.filtered_view().len();
        if len == 0 {
            return Ok(None);
        }

        let target = match self.selection.index {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        Ok(self.play_at(target))
    }

    /// Flip the favorites filter, returning the new value
    ///
    /// The playing track is never interrupted; only its index changes
    /// according to [`TogglePolicy`].
    pub fn toggle_favorites_only(&mut self) -> bool {
        self.favorites_only = !self.favorites_only;

        self.selection.index = match self.config.toggle_policy {
            TogglePolicy::Recompute => self.selected_position(),
            TogglePolicy::ClearIndex => None,
        };

        tracing::debug!(
            favorites_only = self.favorites_only,
            index = ?self.selection.index,
            "Toggled favorites filter"
        );
        self.favorites_only
    }

    /// Replace the catalog with a fresh snapshot
    pub fn apply_snapshot(&mut self, tracks: Vec<Track>) {
        self.catalog = CatalogState::Loaded(tracks);
        self.reconcile_selection();
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.is_loading() {
            Err(PlaylistError::CatalogNotLoaded)
        } else {
            Ok(())
        }
    }

    fn position_in_view(&self, track_id: &TrackId) -> Option<usize> {
        self.filtered_view()
            .iter()
            .position(|track| &track.id == track_id)
    }

    fn selected_position(&self) -> Option<usize> {
        self.selection
            .track_id()
            .and_then(|id| self.position_in_view(id))
    }

    fn play_at(&mut self, index: usize) -> Option<&NowPlaying> {
        let now_playing = self
            .filtered_view()
            .get(index)
            .map(|track| NowPlaying::from(*track))?;

        self.selection = Selection {
            now_playing: Some(now_playing),
            index: Some(index),
        };
        self.selection.now_playing.as_ref()
    }

    fn reconcile_selection(&mut self) {
        let Some(selected_id) = self.selection.track_id().cloned() else {
            return;
        };

        let refreshed = self
            .catalog
            .tracks()
            .and_then(|tracks| tracks.iter().find(|t| t.id == selected_id))
            .map(NowPlaying::from);

        match refreshed {
            Some(now_playing) => {
                self.selection.now_playing = Some(now_playing);
                self.selection.index = self.position_in_view(&selected_id);
            }
            None => {
                tracing::debug!(track_id = %selected_id, "Selected track left the catalog");
                self.selection = Selection::default();
            }
        }
    }
}
