//! Mus Player Core
//!
//! Domain types, error taxonomy and the catalog provider trait shared by
//! every other crate in the workspace.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track` (the per-caller catalog projection),
//!   `TrackRecord`, `User`, `CallerIdentity`, `UploadTarget`, `Blob`
//! - **Core Trait**: `CatalogProvider`, implemented by the SQLite store and
//!   the HTTP client
//! - **Error Handling**: unified `MusError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use mus_core::types::{CallerIdentity, TrackId};
//! use mus_core::ChangeFeed;
//!
//! let caller = CallerIdentity::with_profile("issuer|ada", "ada@example.com", "Ada", None);
//! assert_eq!(caller.token_identifier, "issuer|ada");
//!
//! let feed = ChangeFeed::new();
//! let rx = feed.subscribe();
//! feed.notify();
//! assert_eq!(*rx.borrow(), 1);
//!
//! let id = TrackId::generate();
//! assert!(!id.as_str().is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::{CatalogProvider, ChangeFeed};
pub use error::{MusError, Result};
pub use types::{
    Blob, CallerIdentity, StorageId, Track, TrackId, TrackOwner, TrackRecord, UploadId,
    UploadReceipt, UploadTarget, User, UserId,
};
