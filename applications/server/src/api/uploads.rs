/// Upload API
///
/// Two steps: an authenticated caller asks for a short-lived target, then
/// POSTs the raw bytes to it. The upload id in the target URL is the only
/// credential for the second step.
use crate::{
    error::{Result, ServerError},
    middleware::Caller,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use mus_core::{Blob, CatalogProvider, StorageId, UploadId, UploadReceipt, UploadTarget};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// POST /api/uploads
pub async fn request_upload_target(
    State(app_state): State<AppState>,
    caller: Caller,
) -> Result<(StatusCode, Json<UploadTarget>)> {
    let target = app_state
        .catalog_for(caller.into_inner())
        .request_upload_target()
        .await?;

    Ok((StatusCode::CREATED, Json(target)))
}

/// POST /api/uploads/:upload_id
/// Store the request body as a new blob, consuming the target
pub async fn receive_upload(
    State(app_state): State<AppState>,
    Path(upload_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadReceipt>> {
    // Rejected before the target is spent so the caller can retry
    if body.is_empty() {
        return Err(ServerError::BadRequest("Upload body is empty".to_string()));
    }

    let upload_id = UploadId::new(upload_id);
    let uploader = mus_storage::uploads::consume(app_state.pool(), &upload_id, Utc::now()).await?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let blob = Blob {
        id: StorageId::generate(),
        content_type,
        size: body.len() as i64,
        created_at: Utc::now(),
    };

    app_state.file_storage.store(&blob.id, &body).await?;
    if let Err(e) = mus_storage::blobs::insert(app_state.pool(), &blob).await {
        app_state.file_storage.delete(&blob.id).await?;
        return Err(e.into());
    }

    tracing::info!(
        storage_id = %blob.id,
        user_id = %uploader,
        size = blob.size,
        content_type = %blob.content_type,
        "Stored upload"
    );

    Ok(Json(UploadReceipt { storage_id: blob.id }))
}
