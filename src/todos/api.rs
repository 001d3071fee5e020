//! Todo API Endpoints
//! Mission: CRUD over the caller's own todos

use crate::auth::middleware::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::todos::models::{MessageResponse, Todo, TodoRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

const TODO_NOT_FOUND: ApiError = ApiError::NotFound("Todo not found");

/// List todos - GET /api/todos
pub async fn list_todos(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.todos.list_for_user(claims.user_id)?))
}

/// Get todo - GET /api/todos/:id
pub async fn get_todo(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(todo_id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    state
        .todos
        .get(claims.user_id, todo_id)?
        .map(Json)
        .ok_or(TODO_NOT_FOUND)
}

/// Create todo - POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Json(payload): Json<TodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required"));
    }

    let todo = state.todos.create(claims.user_id, &payload)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Update todo - PUT /api/todos/:id
pub async fn update_todo(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(todo_id): Path<i64>,
    Json(payload): Json<TodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    state
        .todos
        .update(claims.user_id, todo_id, &payload)?
        .map(Json)
        .ok_or(TODO_NOT_FOUND)
}

/// Delete todo - DELETE /api/todos/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(todo_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.todos.delete(claims.user_id, todo_id)? {
        return Err(TODO_NOT_FOUND);
    }

    Ok(Json(MessageResponse::new("Todo deleted successfully")))
}
