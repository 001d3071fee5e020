//! Identity Bootstrap
//! Mission: Make sure an admin account exists before the server accepts requests

use crate::auth::{
    password::{CredentialError, CredentialHasher},
    user_store::UserRepository,
};
use crate::db::StoreError;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// At least one admin already existed; nothing was written.
    AlreadyPresent,
    Created { user_id: i64 },
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error("failed to query or insert admin user: {0}")]
    Store(#[from] StoreError),
}

/// Create the default admin user if no admin exists yet
pub fn ensure_default_admin<R>(
    users: &R,
    hasher: &CredentialHasher,
) -> Result<BootstrapOutcome, BootstrapError>
where
    R: UserRepository + ?Sized,
{
    if users.has_admin()? {
        info!("Admin account present, skipping bootstrap");
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    let password_hash = hasher.hash(DEFAULT_ADMIN_PASSWORD)?;
    let user_id = users.insert_user(DEFAULT_ADMIN_EMAIL, &password_hash, true)?;

    info!(
        "🔐 Default admin user created (email: {}, password: {})",
        DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD
    );
    warn!("⚠️  CHANGE DEFAULT ADMIN PASSWORD IN PRODUCTION!");

    Ok(BootstrapOutcome::Created { user_id })
}
