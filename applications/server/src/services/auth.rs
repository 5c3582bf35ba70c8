/// Authentication service - identity token verification
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mus_core::CallerIdentity;
use serde::{Deserialize, Serialize};

/// Verifies identity tokens issued by the external identity provider
///
/// Tokens are HS256 JWTs signed with the shared secret. The server never
/// issues sessions of its own; [`AuthService::issue_identity_token`] exists
/// for development and tests.
#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    issuer: String,
    token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub iss: String, // Issuer
    pub sub: String, // Subject, unique per issuer
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl AuthService {
    pub fn new(secret: String, issuer: String, expiration_hours: u64) -> Self {
        Self {
            secret,
            issuer,
            token_expiration: Duration::hours(expiration_hours as i64),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<IdentityClaims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::default();
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data = decode::<IdentityClaims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify a token and turn it into the caller it vouches for
    pub fn verify_identity_token(&self, token: &str) -> Result<CallerIdentity> {
        let claims = self.verify_token(token)?;
        if claims.iss.is_empty() || claims.sub.is_empty() {
            return Err(ServerError::Auth("Token lacks issuer or subject".to_string()));
        }

        Ok(CallerIdentity {
            token_identifier: CallerIdentity::token_identifier_for(&claims.iss, &claims.sub),
            email: claims.email,
            name: claims.name,
            picture_url: claims.picture,
        })
    }

    /// Mint an identity token under the configured issuer
    pub fn issue_identity_token(
        &self,
        subject: &str,
        email: Option<&str>,
        name: Option<&str>,
        picture: Option<&str>,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.token_expiration;

        let claims = IdentityClaims {
            iss: self.issuer.clone(),
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            email: email.map(str::to_string),
            name: name.map(str::to_string),
            picture: picture.map(str::to_string),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }
}
