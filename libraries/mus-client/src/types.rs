//! Types for Mus server API requests and responses.

use mus_core::{StorageId, TrackId, UserId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default interval between catalog version polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Configuration for connecting to a Mus server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "https://mus.example.com")
    pub url: String,
    /// Identity token sent as `Authorization: Bearer`
    pub access_token: Option<String>,
    /// How often subscriptions poll the catalog version
    pub poll_interval: Duration,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Create a config carrying an identity token.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::new(url)
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoreUserResponse {
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterTrackRequest<'a> {
    pub storage_id: &'a StorageId,
    pub title: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterTrackResponse {
    pub track_id: TrackId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttachCoverRequest<'a> {
    pub storage_id: &'a StorageId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VersionResponse {
    pub version: u64,
}
