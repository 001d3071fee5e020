//! Admin-only user management

pub mod api;
