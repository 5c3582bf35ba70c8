/// Blob download API
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use mus_core::StorageId;
use std::io::SeekFrom;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

/// GET /api/storage/:storage_id
/// Stream a stored payload with range request support
///
/// Public: audio elements fetch these URLs without credentials.
pub async fn download(
    State(app_state): State<AppState>,
    Path(storage_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    let storage_id = StorageId::new(storage_id);

    let blob = mus_storage::blobs::get_by_id(app_state.pool(), &storage_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Stored file not found: {}", storage_id)))?;

    let (mut file, file_size) = app_state.file_storage.open(&storage_id).await?;

    if let Some(range) = headers.get(header::RANGE) {
        let range_str = range
            .to_str()
            .map_err(|_| ServerError::BadRequest("Invalid Range header".to_string()))?;

        if let Some((start, end)) = parse_range(range_str, file_size) {
            let content_length = end - start + 1;
            file.seek(SeekFrom::Start(start)).await?;
            let body = Body::from_stream(ReaderStream::new(file.take(content_length)));

            return Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, &blob.content_type)
                .header(header::CONTENT_LENGTH, content_length)
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end, file_size),
                )
                .header(header::ACCEPT_RANGES, "bytes")
                .body(body)
                .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)));
        }
    }

    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, &blob.content_type)
        .header(header::CONTENT_LENGTH, file_size)
        .header(header::ACCEPT_RANGES, "bytes")
        .body(body)
        .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)))
}

/// Parse HTTP Range header
/// Format: "bytes=start-end"
fn parse_range(range: &str, file_size: u64) -> Option<(u64, u64)> {
    let range = range.strip_prefix("bytes=")?;
    let (start_str, end_str) = range.split_once('-')?;

    let start: u64 = start_str.parse().ok()?;
    let end: u64 = if end_str.is_empty() {
        file_size.checked_sub(1)?
    } else {
        end_str.parse().ok()?
    };

    (start <= end && end < file_size).then_some((start, end))
}
