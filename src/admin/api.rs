//! Admin API Endpoints
//! Mission: User management for admins. Every route here sits behind
//! `auth_middleware` and `admin_middleware`.

use crate::auth::{middleware::CurrentUser, models::UserResponse, user_store::UserRepository};
use crate::error::ApiError;
use crate::state::AppState;
use crate::todos::models::{MessageResponse, Todo};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

const USER_NOT_FOUND: ApiError = ApiError::NotFound("User not found");

/// Role update request
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub is_admin: bool,
}

/// List all users - GET /api/admin/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list_users()?;
    Ok(Json(users.iter().map(UserResponse::from_user).collect()))
}

/// Get one user - GET /api/admin/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.find_by_id(user_id)?.ok_or(USER_NOT_FOUND)?;
    Ok(Json(UserResponse::from_user(&user)))
}

/// Delete user - DELETE /api/admin/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    // Don't allow deleting yourself
    if user_id == claims.user_id {
        return Err(ApiError::CannotDeleteSelf);
    }

    if !state.users.delete_user(user_id)? {
        return Err(USER_NOT_FOUND);
    }

    info!("🗑️  User {} deleted by admin {}", user_id, claims.user_id);
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// Grant or revoke admin - PUT /api/admin/users/:id/role
pub async fn update_user_role(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .set_admin(user_id, payload.is_admin)?
        .ok_or(USER_NOT_FOUND)?;

    info!(
        "Admin {} set is_admin={} on user {}",
        claims.user_id, payload.is_admin, user_id
    );
    Ok(Json(UserResponse::from_user(&user)))
}

/// List a user's todos - GET /api/admin/users/:id/todos
pub async fn get_user_todos(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.todos.list_for_user(user_id)?))
}
