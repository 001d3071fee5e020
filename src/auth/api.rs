//! Authentication API Endpoints
//! Mission: Provide registration, login and current-user endpoints

use crate::auth::{
    middleware::CurrentUser,
    models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse},
    user_store::UserRepository,
};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, warn};

/// Register endpoint - POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required"));
    }

    let password_hash = state.hasher.hash(&payload.password)?;
    let user_id = state
        .users
        .insert_user(email, &password_hash, false)
        .map_err(|e| {
            warn!("Registration failed for {}: {}", email, e);
            ApiError::from(e)
        })?;

    info!("✅ Registered user {} ({})", user_id, email);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id,
        }),
    ))
}

/// Login endpoint - POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    info!("🔐 Login attempt: {}", payload.email);

    let user = state.users.find_by_email(payload.email.trim())?;

    // Unknown email and wrong password cost the same and answer the same
    let verified = match &user {
        Some(user) => state.hasher.verify(&payload.password, &user.password_hash),
        None => state.hasher.verify_unknown(&payload.password),
    };
    let user = match user {
        Some(user) if verified => user,
        _ => {
            warn!("❌ Failed login attempt: {}", payload.email);
            return Err(ApiError::InvalidCredentials);
        }
    };

    let session = state.authenticator.issue_session(user.id, user.is_admin)?;

    info!("✅ Login successful: {} (admin: {})", user.email, user.is_admin);

    Ok(Json(LoginResponse {
        expires_in: session.expires_in(),
        token: session.token,
        user: UserResponse::from_user(&user),
    }))
}

/// Get current user info - GET /api/me
pub async fn get_current_user(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(claims.user_id)?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(UserResponse::from_user(&user)))
}
