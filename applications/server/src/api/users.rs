/// Caller registration API
use crate::{error::Result, middleware::Caller, state::AppState};
use axum::{extract::State, Json};
use mus_core::{CatalogProvider, UserId};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreUserResponse {
    pub user_id: UserId,
}

/// POST /api/users/store
/// Register the authenticated caller; idempotent
pub async fn store_user(
    State(app_state): State<AppState>,
    caller: Caller,
) -> Result<Json<StoreUserResponse>> {
    let user_id = app_state
        .catalog_for(caller.into_inner())
        .register_caller()
        .await?;

    Ok(Json(StoreUserResponse { user_id }))
}
