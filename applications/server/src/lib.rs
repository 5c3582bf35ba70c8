//! Mus Server Library
//!
//! HTTP front for the Mus Player track catalog: caller registration, track
//! listing, uploads, cover images, favorites and blob downloads.
//!
//! This library exposes the router and its components for the binary and
//! for tests.

pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{auth::AuthService, file_storage::FileStorage};
pub use state::AppState;

/// Build the full application router
pub fn create_router(app_state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(app_state.max_upload_bytes);

    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/users/store", post(api::users::store_user))
        .route(
            "/tracks",
            get(api::tracks::list_tracks).post(api::tracks::register_track),
        )
        .route("/tracks/:id/cover", put(api::tracks::attach_cover))
        .route(
            "/tracks/:id/favorite",
            put(api::tracks::add_favorite).delete(api::tracks::remove_favorite),
        )
        .route("/catalog/version", get(api::catalog::version))
        .route("/uploads", post(api::uploads::request_upload_target))
        .route(
            "/uploads/:upload_id",
            post(api::uploads::receive_upload).layer(upload_limit),
        )
        .route("/storage/:storage_id", get(api::storage::download))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::default().include_headers(false)),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
