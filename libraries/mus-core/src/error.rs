/// Core error types for Mus Player
use crate::types::{StorageId, TrackId, UploadId};
use thiserror::Error;

/// Result type alias using `MusError`
pub type Result<T> = std::result::Result<T, MusError>;

/// Core error type for Mus Player
#[derive(Error, Debug)]
pub enum MusError {
    /// No authenticated caller
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated caller has no registered user record
    #[error("User doesn't exist in the database: {token_identifier}")]
    UserNotRegistered { token_identifier: String },

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Stored payload not found
    #[error("Stored file not found: {0}")]
    BlobNotFound(StorageId),

    /// Upload target unknown or already used
    #[error("Upload target not found: {0}")]
    UploadNotFound(UploadId),

    /// Upload target used after its deadline
    #[error("Upload target expired: {0}")]
    UploadExpired(UploadId),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Permission denied with context
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl MusError {
    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// No authenticated caller; the UI should prompt for sign-in
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Caller was never registered; a contract violation, fatal to the session
    pub fn is_consistency(&self) -> bool {
        matches!(self, Self::UserNotRegistered { .. })
    }

    /// Stable machine-readable code, used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::UserNotRegistered { .. } => "user_not_registered",
            Self::TrackNotFound(_)
            | Self::BlobNotFound(_)
            | Self::UploadNotFound(_)
            | Self::NotFound { .. } => "not_found",
            Self::UploadExpired(_) => "upload_expired",
            Self::PermissionDenied(_) => "permission_denied",
            Self::InvalidInput(_) => "invalid_input",
            Self::Network(_) => "network",
            Self::Storage(_)
            | Self::Database(_)
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::Other(_) => "internal",
        }
    }

    /// Rebuild an error from its wire code and message
    ///
    /// Identifiers are not carried on the wire, so id-bearing variants come
    /// back as their generic counterparts.
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            "unauthorized" => Self::Unauthorized(message),
            "user_not_registered" => Self::UserNotRegistered {
                token_identifier: message,
            },
            "not_found" => Self::NotFound {
                entity: "Resource".to_string(),
                id: message,
            },
            "upload_expired" => Self::UploadExpired(UploadId::new(message)),
            "permission_denied" => Self::PermissionDenied(message),
            "invalid_input" => Self::InvalidInput(message),
            "network" => Self::Network(message),
            _ => Self::Other(message),
        }
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MusError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_helpers() {
        assert!(MusError::unauthorized("no identity").is_authorization());
        assert!(!MusError::unauthorized("no identity").is_consistency());

        let missing = MusError::UserNotRegistered {
            token_identifier: "iss|sub".to_string(),
        };
        assert!(missing.is_consistency());
        assert!(!missing.is_authorization());
    }

    #[test]
    fn codes_round_trip_their_category() {
        let errors = [
            MusError::unauthorized("x"),
            MusError::UserNotRegistered {
                token_identifier: "x".to_string(),
            },
            MusError::TrackNotFound(TrackId::new("t")),
            MusError::UploadExpired(UploadId::new("u")),
            MusError::permission_denied("x"),
            MusError::invalid_input("x"),
        ];

        for err in errors {
            let rebuilt = MusError::from_code(err.code(), "x");
            assert_eq!(rebuilt.code(), err.code());
        }
    }

    #[test]
    fn unknown_code_becomes_other() {
        assert!(matches!(
            MusError::from_code("teapot", "short and stout"),
            MusError::Other(_)
        ));
    }
}
