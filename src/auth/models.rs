//! Authentication Models
//! Mission: Define user records, token claims and auth request/response bodies

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// User account as stored by the data-access layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Identity carried inside a signed token.
///
/// Once verified, the same value is attached to the request and read by
/// handlers and the admin gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub user_id: i64,
    pub is_admin: bool,
    #[serde(rename = "iat")]
    pub issued_at: i64, // unix seconds
    #[serde(rename = "exp")]
    pub expires_at: i64, // unix seconds
}

impl IdentityClaims {
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }

    /// Expired once the clock reaches `expires_at` (inclusive boundary).
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64, // seconds until expiration
    pub user: UserResponse,
}

/// User response (sanitized)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub is_admin: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at.clone(),
            updated_at: user.updated_at.clone(),
        }
    }
}
