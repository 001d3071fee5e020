//! Authentication Middleware
//! Mission: Protect API endpoints with JWT validation and admin checks

use crate::auth::{
    error::{AuthError, Rejection},
    gate::Authenticator,
    models::IdentityClaims,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Auth middleware that validates JWT tokens
pub async fn auth_middleware(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Rejection> {
    let claims = authenticator.verify_request(req.headers()).map_err(|e| {
        debug!(path = %req.uri().path(), reason = %e, "Request rejected by auth gate");
        e
    })?;

    // Add claims to request extensions so handlers can access them
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Admin-only middleware; must be layered inside `auth_middleware`
pub async fn admin_middleware(req: Request, next: Next) -> Result<Response, Rejection> {
    if let Err(rejection) = Authenticator::require_admin(extract_claims(&req)) {
        debug!(path = %req.uri().path(), reason = %rejection, "Request rejected by admin gate");
        return Err(rejection);
    }

    Ok(next.run(req).await)
}

/// Extract claims from request (use after auth middleware)
pub fn extract_claims(req: &Request) -> Option<&IdentityClaims> {
    req.extensions().get::<IdentityClaims>()
}

/// Verified identity of the caller, for handler signatures
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub IdentityClaims);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityClaims>()
            .copied()
            .map(CurrentUser)
            .ok_or(Rejection::Unauthorized(AuthError::Unauthenticated))
    }
}
