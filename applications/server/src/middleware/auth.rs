/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use mus_core::CallerIdentity;
use std::convert::Infallible;
use std::sync::Arc;

/// Caller vouched for by the request's identity token, if it carried one
///
/// Anonymous requests reach handlers with `None`; catalog operations then
/// fail with an authorization error of their own.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<CallerIdentity>);

impl Caller {
    pub fn identity(&self) -> Option<&CallerIdentity> {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Option<CallerIdentity> {
        self.0
    }
}

/// Middleware that validates the identity token in the Authorization header
///
/// A missing header is not an error. A header that is present but malformed
/// or carries an invalid token is rejected with 401.
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(auth_header) = request.headers().get(axum::http::header::AUTHORIZATION) else {
        return Ok(next.run(request).await);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| ServerError::Auth("Expected a Bearer token".to_string()))?;

    let caller = auth_service.verify_identity_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ServerError::Auth("Invalid token".to_string())
    })?;

    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so Caller can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(parts.extensions.get::<CallerIdentity>().cloned()))
    }
}
