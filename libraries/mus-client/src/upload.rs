//! Upload operations.

use crate::client::{parse_json, MusClient};
use crate::error::Result;
use mus_core::{CatalogProvider, StorageId, TrackId, UploadReceipt, UploadTarget};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::info;

impl MusClient {
    /// Send a payload to an upload target.
    ///
    /// The target is single-use: a second call with the same target fails
    /// even if the first one errored after reaching the server.
    pub async fn upload_blob(
        &self,
        target: &UploadTarget,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StorageId> {
        let size = bytes.len();
        let request = self
            .request_url(Method::POST, &target.url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes);

        let response = self.send(request).await?;
        let receipt: UploadReceipt = parse_json(response, "upload receipt").await?;

        info!(storage_id = %receipt.storage_id, size, "Uploaded blob");
        Ok(receipt.storage_id)
    }

    /// Upload an audio file and register it as a track owned by the caller.
    pub async fn upload_track(
        &self,
        title: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> mus_core::Result<TrackId> {
        let target = self.request_upload_target().await?;
        let song = self.upload_blob(&target, content_type, bytes).await?;
        self.register_uploaded_track(song, title).await
    }

    /// Upload an image and attach it as the cover of `track_id`.
    pub async fn upload_cover(
        &self,
        track_id: TrackId,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> mus_core::Result<()> {
        let target = self.request_upload_target().await?;
        let image = self.upload_blob(&target, content_type, bytes).await?;
        self.attach_cover_image(track_id, image).await
    }
}
