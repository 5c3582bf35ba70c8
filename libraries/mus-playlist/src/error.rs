//! Error types for the playlist view model

use mus_core::{MusError, TrackId};
use thiserror::Error;

/// Playlist errors
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// Navigation attempted before the first catalog snapshot arrived
    #[error("Catalog is still loading")]
    CatalogNotLoaded,

    /// Selection names a track the current snapshot does not hold
    #[error("Track not in catalog: {0}")]
    TrackNotInCatalog(TrackId),

    /// The catalog provider rejected a request
    #[error(transparent)]
    Catalog(#[from] MusError),
}

impl PlaylistError {
    /// Whether the host should stop the session instead of retrying
    ///
    /// Authorization and consistency failures cannot recover without the
    /// user signing in again.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::CatalogNotLoaded | Self::TrackNotInCatalog(_) => false,
            Self::Catalog(err) => err.is_authorization() || err.is_consistency(),
        }
    }
}

/// Result type for playlist operations
pub type Result<T> = std::result::Result<T, PlaylistError>;
