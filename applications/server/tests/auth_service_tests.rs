//! Authentication service tests
//! Tests identity token issuance, verification and rejection paths
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use mus_server::services::auth::{AuthService, IdentityClaims};

const SECRET: &str = "test-secret-key";
const ISSUER: &str = "https://auth.test";

fn create_test_auth_service() -> AuthService {
    AuthService::new(SECRET.to_string(), ISSUER.to_string(), 24)
}

fn sign(claims: &IdentityClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn claims(iss: &str, sub: &str, exp_offset: Duration) -> IdentityClaims {
    let now = Utc::now();
    IdentityClaims {
        iss: iss.to_string(),
        sub: sub.to_string(),
        exp: (now + exp_offset).timestamp(),
        iat: now.timestamp(),
        email: None,
        name: None,
        picture: None,
    }
}

/// Token identifier joins issuer and subject
#[test]
fn test_token_identifier_from_claims() {
    let auth_service = create_test_auth_service();

    let token = auth_service
        .issue_identity_token("user-42", None, None, None)
        .unwrap();
    let caller = auth_service.verify_identity_token(&token).unwrap();

    assert_eq!(caller.token_identifier, "https://auth.test|user-42");
    assert!(caller.email.is_none());
    assert!(caller.name.is_none());
}

/// Profile claims flow into the caller identity
#[test]
fn test_profile_claims_are_carried() {
    let auth_service = create_test_auth_service();

    let token = auth_service
        .issue_identity_token(
            "ada",
            Some("ada@example.com"),
            Some("Ada Lovelace"),
            Some("https://img.example.com/ada.png"),
        )
        .unwrap();
    let caller = auth_service.verify_identity_token(&token).unwrap();

    assert_eq!(caller.email.as_deref(), Some("ada@example.com"));
    assert_eq!(caller.name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(
        caller.picture_url.as_deref(),
        Some("https://img.example.com/ada.png")
    );
}

/// Tokens from another issuer keep that issuer in the identifier
#[test]
fn test_foreign_issuer_is_kept_distinct() {
    let auth_service = create_test_auth_service();

    let token = sign(&claims("https://other.test", "ada", Duration::hours(1)), SECRET);
    let caller = auth_service.verify_identity_token(&token).unwrap();

    assert_eq!(caller.token_identifier, "https://other.test|ada");
}

#[test]
fn test_expired_token_rejected() {
    let auth_service = create_test_auth_service();

    let token = sign(&claims(ISSUER, "ada", Duration::hours(-2)), SECRET);
    assert!(auth_service.verify_identity_token(&token).is_err());
}

#[test]
fn test_wrong_signature_rejected() {
    let auth_service = create_test_auth_service();

    let token = sign(&claims(ISSUER, "ada", Duration::hours(1)), "another-secret");
    assert!(auth_service.verify_identity_token(&token).is_err());
}

#[test]
fn test_empty_subject_rejected() {
    let auth_service = create_test_auth_service();

    let token = sign(&claims(ISSUER, "", Duration::hours(1)), SECRET);
    assert!(auth_service.verify_identity_token(&token).is_err());
}

#[test]
fn test_garbage_token_rejected() {
    let auth_service = create_test_auth_service();

    assert!(auth_service.verify_identity_token("").is_err());
    assert!(auth_service.verify_identity_token("not.a.jwt").is_err());
}

/// Raw claims are available to callers that need them
#[test]
fn test_verify_token_returns_claims() {
    let auth_service = create_test_auth_service();

    let token = auth_service
        .issue_identity_token("ada", Some("ada@example.com"), None, None)
        .unwrap();
    let decoded = auth_service.verify_token(&token).unwrap();

    assert_eq!(decoded.iss, ISSUER);
    assert_eq!(decoded.sub, "ada");
    assert!(decoded.exp > decoded.iat);
    assert_eq!(decoded.exp - decoded.iat, 24 * 3600);
}
