//! Authentication Module
//! Mission: Secure API access with hashed credentials, JWT sessions and an admin gate

pub mod api;
pub mod bootstrap;
pub mod error;
pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod user_store;

pub use error::{AuthError, Rejection};
pub use gate::Authenticator;
pub use jwt::{SigningKey, TokenService};
pub use middleware::{admin_middleware, auth_middleware, CurrentUser};
pub use password::CredentialHasher;
pub use user_store::{UserRepository, UserStore};
