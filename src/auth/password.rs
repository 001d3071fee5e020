//! Credential Hasher
//! Mission: One-way password hashing and verification with bcrypt

use bcrypt::{hash, verify, BcryptError};
use thiserror::Error;
use tracing::warn;

/// Lowest work factor bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Hashing failed inside bcrypt (treated as a server fault)
#[derive(Debug, Error)]
#[error("failed to hash credential: {0}")]
pub struct CredentialError(#[from] BcryptError);

/// Salted bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password; every call draws a fresh salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        Ok(hash(plaintext, self.cost)?)
    }

    /// Compare a plaintext password against a stored hash.
    ///
    /// Returns `false` on mismatch and on a malformed stored hash.
    pub fn verify(&self, plaintext: &str, credential: &str) -> bool {
        match verify(plaintext, credential) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Stored credential could not be verified: {}", e);
                false
            }
        }
    }

    /// Stand-in for `verify` when no account matched.
    ///
    /// Pays the same bcrypt work as a real comparison and always fails, so
    /// unknown emails and wrong passwords take the same time.
    pub fn verify_unknown(&self, plaintext: &str) -> bool {
        if let Err(e) = hash(plaintext, self.cost) {
            warn!("Decoy credential hash failed: {}", e);
        }
        false
    }
}
