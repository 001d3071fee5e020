//! Authorization errors and their HTTP rejections

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Why a request failed to authenticate.
///
/// The variants are kept apart for logging; the response body merges
/// `InvalidToken` and `Expired` so clients cannot tell them apart.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,
    #[error("malformed authorization header")]
    MalformedHeader,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    Expired,
    /// No verified identity on the request (gate chained in the wrong order).
    #[error("no identity attached to request")]
    Unauthenticated,
}

/// Terminal outcome of a gate that refused the request
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),
    #[error("admin access required")]
    Forbidden,
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Rejection::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    /// Body sent to the client
    pub fn public_message(&self) -> &'static str {
        match self {
            Rejection::Unauthorized(AuthError::MissingHeader) => "Authorization header required",
            Rejection::Unauthorized(AuthError::MalformedHeader) => "Invalid authorization format",
            Rejection::Unauthorized(AuthError::InvalidToken | AuthError::Expired) => {
                "Invalid token"
            }
            Rejection::Unauthorized(AuthError::Unauthenticated) => "Unauthorized",
            Rejection::Forbidden => "Admin access required",
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status(), self.public_message()).into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        Rejection::from(self).into_response()
    }
}
