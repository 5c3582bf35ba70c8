/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mus_core::MusError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Bearer token present but not acceptable
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// Catalog operation failed; status follows the error's category
    #[error(transparent)]
    Catalog(#[from] MusError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl From<mus_storage::StorageError> for ServerError {
    fn from(err: mus_storage::StorageError) -> Self {
        ServerError::Catalog(err.into())
    }
}

impl ServerError {
    /// Status code and machine-readable code sent to clients
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::Auth(_) | ServerError::Jwt(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            ServerError::Catalog(e) => {
                let status = match e.code() {
                    "unauthorized" => StatusCode::UNAUTHORIZED,
                    "user_not_registered" => StatusCode::CONFLICT,
                    "not_found" => StatusCode::NOT_FOUND,
                    "upload_expired" => StatusCode::GONE,
                    "permission_denied" => StatusCode::FORBIDDEN,
                    "invalid_input" => StatusCode::BAD_REQUEST,
                    "network" => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.code())
            }
            ServerError::Internal(_)
            | ServerError::Storage(_)
            | ServerError::Config(_)
            | ServerError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
            "Internal server error".to_string()
        } else {
            match &self {
                ServerError::Jwt(e) => {
                    tracing::warn!(error = %e, "Rejected identity token");
                    "Invalid token".to_string()
                }
                ServerError::Catalog(MusError::UserNotRegistered { token_identifier }) => {
                    token_identifier.clone()
                }
                other => other.to_string(),
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mus_core::{TrackId, UploadId};

    #[test]
    fn test_catalog_errors_map_to_statuses() {
        let cases = [
            (MusError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (
                MusError::UserNotRegistered {
                    token_identifier: "iss|sub".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (MusError::TrackNotFound(TrackId::new("t")), StatusCode::NOT_FOUND),
            (MusError::UploadExpired(UploadId::new("u")), StatusCode::GONE),
            (MusError::permission_denied("x"), StatusCode::FORBIDDEN),
            (MusError::invalid_input("x"), StatusCode::BAD_REQUEST),
            (MusError::Database("x".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let (status, _) = ServerError::from(err).status_and_code();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let response = ServerError::Storage("disk on fire".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
