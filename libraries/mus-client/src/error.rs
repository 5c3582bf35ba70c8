//! Error types for the Mus server client.

use mus_core::MusError;
use thiserror::Error;

/// Errors that can occur when talking to a Mus server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server rejected the request with a structured error body
    #[error("Server error ({status}, {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Server returned an error without a structured body
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for MusError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { code, message, .. } => MusError::from_code(&code, message),
            ClientError::ServerError { status, message } => match status {
                401 => MusError::Unauthorized(message),
                403 => MusError::PermissionDenied(message),
                404 => MusError::not_found("Resource", message),
                _ => MusError::Other(format!("server returned {}: {}", status, message)),
            },
            ClientError::Request(e) => MusError::Network(e.to_string()),
            ClientError::ServerUnreachable(msg) => MusError::Network(msg),
            ClientError::InvalidUrl(msg) => MusError::InvalidInput(msg),
            ClientError::ParseError(msg) => MusError::Other(msg),
        }
    }
}
