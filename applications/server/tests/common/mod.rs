//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use mus_core::ChangeFeed;
use mus_server::{create_router, AppState, AuthService, FileStorage};
use mus_storage::{LocalCatalog, UrlResolver};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";
pub const TEST_ISSUER: &str = "https://auth.test";
pub const PUBLIC_URL: &str = "http://localhost:8080";
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024;

/// Router over a real SQLite file and blob directory in a temp dir
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();

        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let pool = mus_storage::create_pool(&db_url).await.unwrap();
        mus_storage::run_migrations(&pool).await.unwrap();

        let file_storage = FileStorage::new(temp_dir.path().join("blobs"));
        file_storage.initialize().await.unwrap();

        let auth_service = AuthService::new(TEST_SECRET.to_string(), TEST_ISSUER.to_string(), 1);
        let catalog = LocalCatalog::new(pool, UrlResolver::new(PUBLIC_URL), ChangeFeed::new());

        let state = AppState::new(
            catalog,
            Arc::new(auth_service),
            Arc::new(file_storage),
            MAX_UPLOAD_BYTES,
        );

        Self {
            router: create_router(state.clone()),
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Identity token with a complete profile
    pub fn token(&self, name: &str) -> String {
        let subject = name.to_lowercase();
        self.state
            .auth_service
            .issue_identity_token(
                &subject,
                Some(&format!("{}@example.com", subject)),
                Some(name),
                None,
            )
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Register `name` and return their token
    pub async fn registered(&self, name: &str) -> String {
        let token = self.token(name);
        let response = self
            .send(authed("POST", "/api/users/store", &token).body(Body::empty()).unwrap())
            .await;
        assert!(response.status().is_success());
        token
    }

    /// Upload `bytes` through a fresh target and return the storage id
    pub async fn upload(&self, token: &str, content_type: &str, bytes: Vec<u8>) -> String {
        let response = self
            .send(authed("POST", "/api/uploads", token).body(Body::empty()).unwrap())
            .await;
        let target = body_json(response).await;
        let url = target["url"].as_str().unwrap();

        let response = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri(url.strip_prefix(PUBLIC_URL).unwrap())
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(bytes))
                    .unwrap(),
            )
            .await;
        let receipt = body_json(response).await;
        receipt["storageId"].as_str().unwrap().to_string()
    }

    /// Upload a song and register it as a track; returns the track id
    pub async fn create_track(&self, token: &str, title: &str) -> String {
        let storage_id = self.upload(token, "audio/mpeg", b"ID3 fake".to_vec()).await;

        let response = self
            .send(json_request(
                "POST",
                "/api/tracks",
                token,
                serde_json::json!({ "storageId": storage_id, "title": title }),
            ))
            .await;
        let body = body_json(response).await;
        body["trackId"].as_str().unwrap().to_string()
    }
}

pub fn authed(method: &str, uri: &str, token: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    authed(method, uri, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
