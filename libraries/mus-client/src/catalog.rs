//! Catalog operations over HTTP.

use crate::client::{parse_json, MusClient};
use crate::feed;
use crate::types::{
    AttachCoverRequest, RegisterTrackRequest, RegisterTrackResponse, StoreUserResponse,
};
use async_trait::async_trait;
use mus_core::{CatalogProvider, Result, StorageId, Track, TrackId, UploadTarget, UserId};
use reqwest::Method;
use tokio::sync::watch;
use tracing::debug;

#[async_trait]
impl CatalogProvider for MusClient {
    async fn register_caller(&self) -> Result<UserId> {
        let response = self
            .send(self.request(Method::POST, "/api/users/store").await)
            .await?;
        let body: StoreUserResponse = parse_json(response, "user registration").await?;

        debug!(user_id = %body.user_id, "Registered caller");
        Ok(body.user_id)
    }

    async fn list_tracks(&self) -> Result<Vec<Track>> {
        let response = self
            .send(self.request(Method::GET, "/api/tracks").await)
            .await?;
        let tracks: Vec<Track> = parse_json(response, "track list").await?;

        debug!(tracks = tracks.len(), "Fetched catalog");
        Ok(tracks)
    }

    async fn request_upload_target(&self) -> Result<UploadTarget> {
        let response = self
            .send(self.request(Method::POST, "/api/uploads").await)
            .await?;
        Ok(parse_json(response, "upload target").await?)
    }

    async fn register_uploaded_track(
        &self,
        storage_id: StorageId,
        title: &str,
    ) -> Result<TrackId> {
        let request = self
            .request(Method::POST, "/api/tracks")
            .await
            .json(&RegisterTrackRequest {
                storage_id: &storage_id,
                title,
            });
        let response = self.send(request).await?;
        let body: RegisterTrackResponse = parse_json(response, "track registration").await?;
        Ok(body.track_id)
    }

    async fn attach_cover_image(&self, track_id: TrackId, image: StorageId) -> Result<()> {
        let path = format!("/api/tracks/{}/cover", track_id);
        let request = self
            .request(Method::PUT, &path)
            .await
            .json(&AttachCoverRequest { storage_id: &image });
        self.send(request).await?;
        Ok(())
    }

    async fn set_favorite(&self, track_id: TrackId, favorite: bool) -> Result<()> {
        let path = format!("/api/tracks/{}/favorite", track_id);
        let method = if favorite { Method::PUT } else { Method::DELETE };
        self.send(self.request(method, &path).await).await?;
        Ok(())
    }

    /// Polls the server's catalog version in a background task
    ///
    /// Must be called from within a Tokio runtime. The task stops once every
    /// receiver has been dropped.
    fn subscribe(&self) -> watch::Receiver<u64> {
        feed::spawn_version_poller(self.clone(), self.poll_interval())
    }
}
