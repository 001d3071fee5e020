//! HTTP error mapping for route handlers

use crate::auth::{error::Rejection, jwt::TokenError, password::CredentialError};
use crate::db::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// API errors returned by handlers
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    InvalidCredentials,
    Auth(Rejection),
    NotFound(&'static str),
    EmailTaken,
    CannotDeleteSelf,
    InternalError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            ApiError::Auth(rejection) => return rejection.into_response(),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::EmailTaken => (StatusCode::CONFLICT, "Email already exists"),
            ApiError::CannotDeleteSelf => {
                (StatusCode::BAD_REQUEST, "Cannot delete your own account")
            }
            ApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        ApiError::Auth(rejection)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => ApiError::EmailTaken,
            StoreError::Sqlite(e) => {
                error!("Database error: {}", e);
                ApiError::InternalError
            }
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        error!("{}", err);
        ApiError::InternalError
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        error!("{}", err);
        ApiError::InternalError
    }
}
