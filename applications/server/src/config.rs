/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MAX_UPLOAD_TARGET_TTL_SECS: u64 = 7 * 24 * 3600;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally reachable base URL; storage and upload URLs are built on it
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_blob_storage_path")]
    pub blob_storage_path: PathBuf,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    /// Secret shared with the identity provider (HS256)
    pub jwt_secret: String,

    /// Issuer used when minting development tokens
    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_token_expiration_hours")]
    pub token_expiration_hours: u64,

    #[serde(default = "default_upload_target_ttl_secs")]
    pub upload_target_ttl_secs: u64,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `config.toml` in the working directory; a missing
    /// file is not an error. Environment variables prefixed with `MUS_`
    /// override the file, with `__` between section and key
    /// (`MUS_AUTH__JWT_SECRET`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("MUS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set MUS_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.storage.max_upload_bytes == 0 {
            return Err(ServerError::Config(
                "storage.max_upload_bytes must be greater than zero".to_string(),
            ));
        }

        if !(1..=MAX_UPLOAD_TARGET_TTL_SECS).contains(&self.auth.upload_target_ttl_secs) {
            return Err(ServerError::Config(format!(
                "auth.upload_target_ttl_secs must be between 1 and {}",
                MAX_UPLOAD_TARGET_TTL_SECS
            )));
        }

        let public_url = url::Url::parse(&self.server.public_url)
            .map_err(|e| ServerError::Config(format!("Invalid server.public_url: {}", e)))?;
        if !matches!(public_url.scheme(), "http" | "https") {
            return Err(ServerError::Config(
                "server.public_url must use http or https".to_string(),
            ));
        }

        Ok(())
    }

    pub fn upload_target_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.auth.upload_target_ttl_secs as i64)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        public_url: default_public_url(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        blob_storage_path: default_blob_storage_path(),
        max_upload_bytes: default_max_upload_bytes(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/mus.db".to_string()
}

fn default_blob_storage_path() -> PathBuf {
    PathBuf::from("./data/blobs")
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        issuer: default_issuer(),
        token_expiration_hours: default_token_expiration_hours(),
        upload_target_ttl_secs: default_upload_target_ttl_secs(),
    }
}

fn default_issuer() -> String {
    "mus-dev".to_string()
}

fn default_token_expiration_hours() -> u64 {
    24
}

fn default_upload_target_ttl_secs() -> u64 {
    mus_storage::DEFAULT_UPLOAD_TTL_SECS.unsigned_abs()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "secret".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.public_url, "http://localhost:8080");
        assert_eq!(config.storage.database_url, "sqlite://./data/mus.db");
        assert_eq!(config.storage.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(config.auth.issuer, "mus-dev");
        assert_eq!(config.upload_target_ttl(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_missing_secret_rejected() {
        assert!(ServerConfig::default().validate().is_err());
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_zero_upload_limit_rejected() {
        let mut config = valid();
        config.storage.max_upload_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_upload_ttl_bounds() {
        let mut config = valid();
        config.auth.upload_target_ttl_secs = 0;
        assert!(config.validate().is_err());

        config.auth.upload_target_ttl_secs = 30 * 24 * 3600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_public_url_scheme_checked() {
        let mut config = valid();
        config.server.public_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.server.public_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mus.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[auth]\njwt_secret = \"from-file\"\nissuer = \"https://auth.example.com\"\n",
        )
        .unwrap();

        let config = ServerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.auth.issuer, "https://auth.example.com");
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
