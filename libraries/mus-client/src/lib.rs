//! HTTP client for the Mus Player server.
//!
//! This crate provides a client for:
//! - Registering the signed-in caller
//! - Listing the catalog as seen by that caller
//! - Uploading audio and cover images
//! - Marking favorites
//! - Following catalog changes by polling the server's version counter
//!
//! [`MusClient`] implements [`mus_core::CatalogProvider`]; anything written
//! against that trait works unchanged over the network.

mod catalog;
mod client;
mod error;
mod feed;
mod types;
mod upload;

pub use client::MusClient;
pub use error::{ClientError, Result};
pub use types::{ClientConfig, ErrorBody, HealthResponse, DEFAULT_POLL_INTERVAL};
