//! Core types for the playlist view model

use mus_core::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// What happens to the selection index when the favorites filter flips
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TogglePolicy {
    /// Re-locate the selected track in the new view (`None` if filtered out)
    #[default]
    Recompute,

    /// Forget the index; the next `next()` starts from the top
    ClearIndex,
}

/// Configuration for the playlist view model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// Index handling on favorites toggle (default: Recompute)
    #[serde(default)]
    pub toggle_policy: TogglePolicy,
}

/// Catalog snapshot as held by the view model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    /// No snapshot delivered yet
    #[default]
    Loading,

    /// Latest snapshot, in provider order
    Loaded(Vec<Track>),
}

impl CatalogState {
    pub fn tracks(&self) -> Option<&[Track]> {
        match self {
            Self::Loading => None,
            Self::Loaded(tracks) => Some(tracks),
        }
    }
}

/// Track handed to the audio element
///
/// Copied out of the catalog so playback survives filter changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub track_id: TrackId,
    pub audio_url: String,
    pub title: String,
    pub artist: String,
    pub cover_url: Option<String>,
}

impl From<&Track> for NowPlaying {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.id.clone(),
            audio_url: track.audio_url.clone(),
            title: track.title.clone(),
            artist: track.owner.display_name.clone(),
            cover_url: track.cover_url.clone(),
        }
    }
}

/// Current selection
///
/// `index` is a position in the *filtered view*, not in the catalog. It is
/// only ever `Some` while `now_playing` is `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub now_playing: Option<NowPlaying>,
    pub index: Option<usize>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.now_playing.is_none()
    }

    pub fn track_id(&self) -> Option<&TrackId> {
        self.now_playing.as_ref().map(|n| &n.track_id)
    }
}
