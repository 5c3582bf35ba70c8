/// Catalog change counter
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: u64,
}

/// GET /api/catalog/version
/// Public; clients poll it to learn when to re-list
pub async fn version(State(app_state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: app_state.feed().version(),
    })
}
