//! Mus Player - Playlist
//!
//! Client-side playlist logic for Mus Player:
//! - Catalog snapshot with a derived favorites-only view
//! - Wraparound next/previous navigation over that view
//! - A session driver that keeps the snapshot fresh from a
//!   [`mus_core::CatalogProvider`]
//!
//! The view model performs no I/O. Anything async lives in
//! [`PlaylistSession`].
//!
//! # Example
//!
//! ```rust
//! use mus_playlist::{PlaylistConfig, PlaylistViewModel};
//!
//! let mut playlist = PlaylistViewModel::new(PlaylistConfig::default());
//! assert!(playlist.is_loading());
//!
//! playlist.apply_snapshot(Vec::new());
//! assert!(playlist.next().unwrap().is_none());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod session;
pub mod types;
pub mod view_model;

pub use error::{PlaylistError, Result};
pub use session::PlaylistSession;
pub use types::{CatalogState, NowPlaying, PlaylistConfig, Selection, TogglePolicy};
pub use view_model::PlaylistViewModel;
