//! Server configuration
//!
//! Every flag falls back to an environment variable, so `.env` files work
//! the same as command-line arguments.

use crate::auth::{jwt::SigningKey, password::MIN_COST};
use clap::Parser;
use thiserror::Error;
use tracing::warn;

/// Shortest HMAC secret accepted from configuration
pub const MIN_SECRET_LEN: usize = 32;

/// Literals that have shipped as defaults somewhere and must never sign tokens
const PLACEHOLDER_SECRETS: &[&str] = &[
    "your-secret-key-change-in-production",
    "dev-secret-change-in-production-minimum-32-characters",
    "changeme",
    "secret",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET is a known placeholder value; set a real secret")]
    PlaceholderSecret,
    #[error("JWT_SECRET is {len} bytes; at least {min} are required")]
    SecretTooShort { len: usize, min: usize },
}

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-api", about = "Multi-user todo list REST API", version)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// SQLite database file
    #[arg(long, env = "DB_PATH", default_value = "todo.db")]
    pub db_path: String,

    /// HMAC secret for session tokens; a random one is generated when unset
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// bcrypt work factor for stored passwords
    #[arg(
        long,
        env = "BCRYPT_COST",
        default_value_t = bcrypt::DEFAULT_COST,
        value_parser = clap::value_parser!(u32).range(MIN_COST as i64..=31)
    )]
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn signing_key(&self) -> Result<SigningKey, ConfigError> {
        resolve_signing_key(self.jwt_secret.as_deref())
    }
}

/// Turn the configured secret into a signing key.
///
/// Placeholder and short secrets are refused. No secret at all yields an
/// ephemeral key: tokens stop verifying when the process restarts.
pub fn resolve_signing_key(secret: Option<&str>) -> Result<SigningKey, ConfigError> {
    let secret = secret.map(str::trim).filter(|s| !s.is_empty());

    let Some(secret) = secret else {
        warn!("⚠️  JWT_SECRET not set, using an ephemeral signing key; sessions will not survive a restart");
        return Ok(SigningKey::ephemeral());
    };

    if PLACEHOLDER_SECRETS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(secret))
    {
        return Err(ConfigError::PlaceholderSecret);
    }

    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::SecretTooShort {
            len: secret.len(),
            min: MIN_SECRET_LEN,
        });
    }

    Ok(SigningKey::from_secret(secret))
}
