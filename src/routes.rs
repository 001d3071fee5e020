//! Router composition
//!
//! Three groups share one state: public auth routes, routes behind the auth
//! gate, and admin routes behind both gates.

use crate::admin::api as admin_api;
use crate::auth::{admin_middleware, api as auth_api, auth_middleware};
use crate::middleware::request_logging;
use crate::state::AppState;
use crate::todos::api as todos_api;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub fn build_router(state: AppState) -> Router {
    let authenticator = state.authenticator.clone();

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/register", post(auth_api::register))
        .route("/api/login", post(auth_api::login));

    let protected_routes = Router::new()
        .route("/api/me", get(auth_api::get_current_user))
        .route(
            "/api/todos",
            get(todos_api::list_todos).post(todos_api::create_todo),
        )
        .route(
            "/api/todos/:id",
            get(todos_api::get_todo)
                .put(todos_api::update_todo)
                .delete(todos_api::delete_todo),
        )
        .route_layer(middleware::from_fn_with_state(
            authenticator.clone(),
            auth_middleware,
        ));

    // Layers run outside-in: the auth gate wraps the admin gate.
    let admin_routes = Router::new()
        .route("/api/admin/users", get(admin_api::list_users))
        .route(
            "/api/admin/users/:id",
            get(admin_api::get_user).delete(admin_api::delete_user),
        )
        .route("/api/admin/users/:id/role", put(admin_api::update_user_role))
        .route("/api/admin/users/:id/todos", get(admin_api::get_user_todos))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(
            authenticator,
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_logging)),
        )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
