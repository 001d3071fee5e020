//! JWT Token Service
//! Mission: Issue and verify signed, expiring identity tokens

use crate::auth::{error::AuthError, models::IdentityClaims};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::RngCore;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Fixed session lifetime
pub const TOKEN_TTL_HOURS: i64 = 24;

const ALGORITHM: Algorithm = Algorithm::HS256;
const EPHEMERAL_KEY_LEN: usize = 32;

/// Signing failed while issuing a token
#[derive(Debug, Error)]
#[error("failed to sign token: {0}")]
pub struct TokenError(#[from] jsonwebtoken::errors::Error);

/// Process-wide HMAC secret
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
    ephemeral: bool,
}

impl SigningKey {
    pub fn from_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: secret.into(),
            ephemeral: false,
        }
    }

    /// Random key that lives only as long as the process.
    pub fn ephemeral() -> Self {
        let mut bytes = vec![0u8; EPHEMERAL_KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            bytes,
            ephemeral: true,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Key length in bytes
    pub fn key_len(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("bytes", &"[redacted]")
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

/// A freshly issued session token
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub claims: IdentityClaims,
}

impl SessionToken {
    pub fn expires_in(&self) -> i64 {
        self.claims.expires_at - self.claims.issued_at
    }
}

/// Stateless token issuer/verifier bound to one signing key
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(key: &SigningKey) -> Self {
        // Expiry is checked by hand after the signature so the boundary is ours.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(&key.bytes),
            decoding_key: DecodingKey::from_secret(&key.bytes),
            validation,
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Issue a token for a user, valid for 24 hours from now
    pub fn issue(&self, user_id: i64, is_admin: bool) -> Result<SessionToken, TokenError> {
        self.issue_at(user_id, is_admin, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: i64,
        is_admin: bool,
        now: DateTime<Utc>,
    ) -> Result<SessionToken, TokenError> {
        let issued_at = now.timestamp();
        let claims = IdentityClaims {
            user_id,
            is_admin,
            issued_at,
            expires_at: issued_at + self.ttl.num_seconds(),
        };

        debug!(
            "Issuing token for user {} (admin: {}), expires in {}h",
            user_id, is_admin, TOKEN_TTL_HOURS
        );

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)?;
        Ok(SessionToken { token, claims })
    }

    /// Verify signature, then expiry, and return the embedded claims
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims, AuthError> {
        let claims = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => debug!("Token signature mismatch"),
                    other => debug!("Token rejected: {:?}", other),
                }
                AuthError::InvalidToken
            })?;

        if claims.is_expired_at(now) {
            debug!("Token for user {} expired", claims.user_id);
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service() -> TokenService {
        TokenService::new(&SigningKey::from_secret("test-secret-key-12345"))
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();

        let session = service.issue(42, false).unwrap();
        assert!(!session.token.is_empty());
        assert_eq!(session.token.split('.').count(), 3);
        assert_eq!(session.expires_in(), 24 * 3600);

        let claims = service.verify(&session.token).unwrap();
        assert_eq!(claims, session.claims);
        assert_eq!(claims.user_id, 42);
        assert!(!claims.is_admin);
    }

    #[test]
    fn test_claims_timestamps() {
        let session = service().issue_at(1, true, fixed_now()).unwrap();

        assert_eq!(session.claims.issued_at, 1_700_000_000);
        assert_eq!(session.claims.expires_at, 1_700_000_000 + 24 * 3600);
        assert!(session.claims.is_admin);
    }

    #[test]
    fn test_expired_at_exact_boundary() {
        let service = service();
        let session = service.issue_at(5, false, fixed_now()).unwrap();
        let expires = session.claims.expires_at_utc().unwrap();

        let just_before = expires - Duration::seconds(1);
        assert_eq!(
            service.verify_at(&session.token, just_before).unwrap(),
            session.claims
        );
        assert_eq!(
            service.verify_at(&session.token, expires),
            Err(AuthError::Expired)
        );
        assert_eq!(
            service.verify_at(&session.token, expires + Duration::hours(1)),
            Err(AuthError::Expired)
        );
    }

    #[test]
    fn test_invalid_token_rejected() {
        assert_eq!(
            service().verify("invalid.token.here"),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(service().verify(""), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_different_secrets_reject() {
        let issuer = TokenService::new(&SigningKey::from_secret("secret1"));
        let verifier = TokenService::new(&SigningKey::from_secret("secret2"));

        let session = issuer.issue(1, false).unwrap();
        assert_eq!(
            verifier.verify(&session.token),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_altered_signature_rejected() {
        let service = service();
        let session = service.issue(1, false).unwrap();

        let sig_start = session.token.rfind('.').unwrap() + 1;
        let mut bytes = session.token.into_bytes();
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(service.verify(&tampered), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_escalated_payload_rejected() {
        let service = service();
        let user = service.issue(9, false).unwrap();
        let forged = service.issue(9, true).unwrap();

        // Admin payload glued to the non-admin signature
        let user_parts: Vec<&str> = user.token.split('.').collect();
        let forged_parts: Vec<&str> = forged.token.split('.').collect();
        let spliced = format!("{}.{}.{}", user_parts[0], forged_parts[1], user_parts[2]);

        assert_eq!(service.verify(&spliced), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let service = service();
        let session = service.issue(3, true).unwrap();
        let payload = session.token.split('.').nth(1).unwrap();

        // {"alg":"none","typ":"JWT"}
        let unsigned = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{}.", payload);
        assert_eq!(service.verify(&unsigned), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_ephemeral_keys_are_random() {
        let a = SigningKey::ephemeral();
        let b = SigningKey::ephemeral();
        assert!(a.is_ephemeral());
        assert_eq!(a.key_len(), 32);

        let token = TokenService::new(&a).issue(1, false).unwrap().token;
        assert!(TokenService::new(&b).verify(&token).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let key = SigningKey::from_secret("super-secret-value");
        assert!(!format!("{:?}", key).contains("super-secret-value"));
    }
}
