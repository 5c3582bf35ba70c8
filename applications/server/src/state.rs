/// Shared application state
use crate::{
    config::ServerConfig,
    error::Result,
    services::{AuthService, FileStorage},
};
use mus_core::{CallerIdentity, ChangeFeed};
use mus_storage::{LocalCatalog, UrlResolver};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: LocalCatalog,
    pub auth_service: Arc<AuthService>,
    pub file_storage: Arc<FileStorage>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        catalog: LocalCatalog,
        auth_service: Arc<AuthService>,
        file_storage: Arc<FileStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            catalog,
            auth_service,
            file_storage,
            max_upload_bytes,
        }
    }

    /// Open the database, apply migrations and prepare blob storage
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let pool = mus_storage::create_pool(&config.storage.database_url).await?;
        mus_storage::run_migrations(&pool).await?;
        tracing::info!("Database connected");

        let file_storage = FileStorage::new(config.storage.blob_storage_path.clone());
        file_storage.initialize().await?;
        tracing::info!(path = ?config.storage.blob_storage_path, "File storage initialized");

        let auth_service = AuthService::new(
            config.auth.jwt_secret.clone(),
            config.auth.issuer.clone(),
            config.auth.token_expiration_hours,
        );

        let catalog = LocalCatalog::new(
            pool,
            UrlResolver::new(&config.server.public_url),
            ChangeFeed::new(),
        )
        .with_upload_ttl(config.upload_target_ttl());

        Ok(Self::new(
            catalog,
            Arc::new(auth_service),
            Arc::new(file_storage),
            config.storage.max_upload_bytes,
        ))
    }

    /// Catalog acting for one request's caller
    pub fn catalog_for(&self, caller: Option<CallerIdentity>) -> LocalCatalog {
        self.catalog.for_caller(caller)
    }

    pub fn pool(&self) -> &SqlitePool {
        self.catalog.pool()
    }

    pub fn feed(&self) -> &ChangeFeed {
        self.catalog.feed()
    }
}
