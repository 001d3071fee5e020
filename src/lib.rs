//! Todo Backend Library
//!
//! Multi-user todo list API with JWT sessions and an admin role.
//! The binary in `main.rs` only wires configuration, logging and the server.

pub mod admin;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod todos;

pub use config::Config;
pub use routes::build_router;
pub use state::AppState;
