/// Track API routes
use crate::{error::Result, middleware::Caller, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mus_core::{CatalogProvider, StorageId, Track, TrackId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTrackRequest {
    pub storage_id: StorageId,
    pub title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTrackResponse {
    pub track_id: TrackId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachCoverRequest {
    pub storage_id: StorageId,
}

/// GET /api/tracks
/// Every track, with favorite flags for the caller
pub async fn list_tracks(
    State(app_state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<Track>>> {
    let tracks = app_state
        .catalog_for(caller.into_inner())
        .list_tracks()
        .await?;

    Ok(Json(tracks))
}

/// POST /api/tracks
/// Register an uploaded payload as a track owned by the caller
pub async fn register_track(
    State(app_state): State<AppState>,
    caller: Caller,
    Json(req): Json<RegisterTrackRequest>,
) -> Result<(StatusCode, Json<RegisterTrackResponse>)> {
    let track_id = app_state
        .catalog_for(caller.into_inner())
        .register_uploaded_track(req.storage_id, &req.title)
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterTrackResponse { track_id })))
}

/// PUT /api/tracks/:id/cover
pub async fn attach_cover(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    caller: Caller,
    Json(req): Json<AttachCoverRequest>,
) -> Result<StatusCode> {
    app_state
        .catalog_for(caller.into_inner())
        .attach_cover_image(TrackId::new(id), req.storage_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/tracks/:id/favorite
pub async fn add_favorite(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    caller: Caller,
) -> Result<StatusCode> {
    set_favorite(&app_state, caller, id, true).await
}

/// DELETE /api/tracks/:id/favorite
pub async fn remove_favorite(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    caller: Caller,
) -> Result<StatusCode> {
    set_favorite(&app_state, caller, id, false).await
}

async fn set_favorite(
    app_state: &AppState,
    caller: Caller,
    id: String,
    favorite: bool,
) -> Result<StatusCode> {
    app_state
        .catalog_for(caller.into_inner())
        .set_favorite(TrackId::new(id), favorite)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
