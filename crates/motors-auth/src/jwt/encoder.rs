//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use motors_core::config::AuthConfig;
use motors_core::error::AppError;
use motors_entity::account::AccountProfile;

use super::claims::AccountClaims;

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in seconds.
    ttl_seconds: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_seconds: i64::try_from(config.token_ttl_seconds).unwrap_or(i64::MAX),
        }
    }

    /// Token lifetime in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issues a token for `profile`, valid from now.
    pub fn issue(&self, profile: &AccountProfile) -> Result<String, AppError> {
        self.issue_at(profile, Utc::now().timestamp())
    }

    /// Issues a token for `profile` as if the clock read `now`.
    pub fn issue_at(&self, profile: &AccountProfile, now: i64) -> Result<String, AppError> {
        let claims = AccountClaims::from_profile(profile, now, self.ttl_seconds);
        self.sign(&claims)
    }

    /// Signs an already-built claims set.
    pub fn sign(&self, claims: &AccountClaims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }
}
