/// User domain types
use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered user account
///
/// One row exists per distinct token identifier. Rows are created by
/// caller registration and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,

    /// Stable identity issued by the external auth provider
    pub token_identifier: String,

    pub email: String,

    /// Display name
    pub full_name: String,

    /// Avatar URL
    pub image_url: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Authenticated caller as vouched for by the identity provider
///
/// Profile fields are optional because identity tokens are not required to
/// carry them; registration rejects identities that lack email or name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerIdentity {
    pub token_identifier: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture_url: Option<String>,
}

impl CallerIdentity {
    /// Identity with only a token identifier and no profile
    pub fn new(token_identifier: impl Into<String>) -> Self {
        Self {
            token_identifier: token_identifier.into(),
            email: None,
            name: None,
            picture_url: None,
        }
    }

    /// Identity with a full profile
    pub fn with_profile(
        token_identifier: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        picture_url: Option<String>,
    ) -> Self {
        Self {
            token_identifier: token_identifier.into(),
            email: Some(email.into()),
            name: Some(name.into()),
            picture_url,
        }
    }

    /// Build the token identifier the way identity providers scope subjects:
    /// `"{issuer}|{subject}"`
    pub fn token_identifier_for(issuer: &str, subject: &str) -> String {
        format!("{}|{}", issuer, subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_identifier_is_scoped_by_issuer() {
        assert_eq!(
            CallerIdentity::token_identifier_for("https://auth.example.com", "user_42"),
            "https://auth.example.com|user_42"
        );
    }

    #[test]
    fn bare_identity_has_no_profile() {
        let identity = CallerIdentity::new("issuer|abc");
        assert!(identity.email.is_none());
        assert!(identity.name.is_none());
    }
}
