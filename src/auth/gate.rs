//! Authorization core shared by every HTTP adapter.
//!
//! Header parsing, token verification and the admin check live here with no
//! dependency on a router; `auth::middleware` only translates requests in and
//! rejections out.

use crate::auth::{
    error::{AuthError, Rejection},
    jwt::{SessionToken, TokenError, TokenService},
    models::IdentityClaims,
};
use axum::http::{header::AUTHORIZATION, HeaderMap};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Token verification plus role checks, built once at startup
pub struct Authenticator {
    tokens: TokenService,
}

impl Authenticator {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Mint a session token after a successful login.
    pub fn issue_session(&self, user_id: i64, is_admin: bool) -> Result<SessionToken, TokenError> {
        self.tokens.issue(user_id, is_admin)
    }

    /// Authenticate a request from its headers.
    pub fn verify_request(&self, headers: &HeaderMap) -> Result<IdentityClaims, AuthError> {
        let raw = match headers.get(AUTHORIZATION) {
            None => return Err(AuthError::MissingHeader),
            Some(value) => value.to_str().map_err(|_| AuthError::MalformedHeader)?,
        };
        let token = bearer_token(raw)?;
        self.tokens.verify(token)
    }

    /// Admin gate: needs a verified identity whose admin flag is set.
    pub fn require_admin(
        identity: Option<&IdentityClaims>,
    ) -> Result<&IdentityClaims, Rejection> {
        let identity = identity.ok_or(AuthError::Unauthenticated)?;
        if !identity.is_admin {
            return Err(Rejection::Forbidden);
        }
        Ok(identity)
    }
}

/// Strip the exact `Bearer ` prefix; anything else is malformed.
///
/// A bare prefix with nothing after it counts as an invalid token.
pub fn bearer_token(header_value: &str) -> Result<&str, AuthError> {
    if header_value.is_empty() {
        return Err(AuthError::MissingHeader);
    }
    match header_value.strip_prefix(BEARER_PREFIX) {
        Some("") => Err(AuthError::InvalidToken),
        Some(token) => Ok(token),
        None => Err(AuthError::MalformedHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::SigningKey;
    use axum::http::HeaderValue;

    fn authenticator() -> Authenticator {
        Authenticator::new(TokenService::new(&SigningKey::from_secret(
            "gate-test-secret-0123456789abcdef",
        )))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            authenticator().verify_request(&HeaderMap::new()),
            Err(AuthError::MissingHeader)
        );
    }

    #[test]
    fn test_bare_token_is_malformed() {
        let auth = authenticator();
        let session = auth.issue_session(1, false).unwrap();

        assert_eq!(
            auth.verify_request(&headers_with(&session.token)),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn test_prefix_must_match_exactly() {
        let auth = authenticator();
        let session = auth.issue_session(1, false).unwrap();

        for value in [
            format!("bearer {}", session.token),
            format!("Bearer  {}", session.token),
            format!("Token {}", session.token),
            "Bearer ".to_string(),
        ] {
            let result = auth.verify_request(&headers_with(&value));
            assert!(result.is_err(), "accepted {:?}", value);
        }
        assert_eq!(bearer_token("Basic"), Err(AuthError::MalformedHeader));
        assert_eq!(bearer_token("Basic abc"), Err(AuthError::MalformedHeader));
    }

    #[test]
    fn test_empty_bearer_token_is_invalid() {
        assert_eq!(bearer_token("Bearer "), Err(AuthError::InvalidToken));
        assert_eq!(
            authenticator().verify_request(&headers_with("Bearer ")),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_valid_bearer_yields_claims() {
        let auth = authenticator();
        let session = auth.issue_session(11, true).unwrap();

        let claims = auth
            .verify_request(&headers_with(&format!("Bearer {}", session.token)))
            .unwrap();
        assert_eq!(claims, session.claims);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert_eq!(
            authenticator().verify_request(&headers_with("Bearer not.a.jwt")),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_require_admin() {
        let admin = IdentityClaims {
            user_id: 1,
            is_admin: true,
            issued_at: 0,
            expires_at: i64::MAX,
        };
        let user = IdentityClaims {
            is_admin: false,
            ..admin
        };

        assert_eq!(Authenticator::require_admin(Some(&admin)), Ok(&admin));
        assert_eq!(
            Authenticator::require_admin(Some(&user)),
            Err(Rejection::Forbidden)
        );
        assert_eq!(
            Authenticator::require_admin(None),
            Err(Rejection::Unauthorized(AuthError::Unauthenticated))
        );
    }
}
