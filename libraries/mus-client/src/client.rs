//! Main Mus server client.

use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, ErrorBody, HealthResponse, VersionResponse};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Client for a Mus server.
///
/// Implements [`mus_core::CatalogProvider`], so a playlist session can run
/// against a remote catalog exactly as it does against a local one.
/// Clones share the HTTP connection pool and the access token.
///
/// # Example
///
/// ```ignore
/// use mus_client::{ClientConfig, MusClient};
/// use mus_core::CatalogProvider;
///
/// let client = MusClient::new(ClientConfig::with_token("https://mus.example.com", token))?;
/// client.register_caller().await?;
///
/// let tracks = client.list_tracks().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Clone)]
pub struct MusClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
    poll_interval: Duration,
}

impl MusClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("MusPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let poll_interval = config.poll_interval;
        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ClientConfig { url, ..config })),
            poll_interval,
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an identity token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Replace the identity token (e.g. after the identity provider renewed it).
    pub async fn set_access_token(&self, token: impl Into<String>) {
        self.config.write().await.access_token = Some(token.into());
    }

    /// Drop the identity token (sign out).
    pub async fn clear_access_token(&self) {
        self.config.write().await.access_token = None;
        info!("Cleared access token");
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Check that the server is up.
    ///
    /// This does not require authentication.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.send(self.request(Method::GET, "/api/health").await).await?;
        let health: HealthResponse = parse_json(response, "health response").await?;

        info!(status = %health.status, version = %health.version, "Connected to server");
        Ok(health)
    }

    /// Current catalog version; moves on every catalog write.
    pub async fn catalog_version(&self) -> Result<u64> {
        let response = self
            .send(self.request(Method::GET, "/api/catalog/version").await)
            .await?;
        let body: VersionResponse = parse_json(response, "catalog version").await?;
        Ok(body.version)
    }

    /// Request against `path` on the configured server, authenticated when a
    /// token is present.
    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let config = self.config.read().await;
        let url = format!("{}{}", config.url, path);
        debug!(method = %method, url = %url, "Sending request");

        let builder = self.http.request(method, url);
        match &config.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Unauthenticated request against an absolute URL.
    pub(crate) fn request_url(&self, method: Method, url: &str) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Send and turn non-success statuses into errors.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from(response).await)
        }
    }
}

pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

async fn error_from(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => ClientError::Api {
            status,
            code: body.code,
            message: body.error,
        },
        Err(_) => ClientError::ServerError {
            status,
            message: text,
        },
    }
}
