//! JWT token verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use motors_core::config::AuthConfig;

use super::claims::AccountClaims;
use super::error::TokenError;

/// Verifies session tokens: signature first, then expiry.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies `token` against the current time.
    pub fn verify(&self, token: &str) -> Result<AccountClaims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies `token` as if the clock read `now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<AccountClaims, TokenError> {
        let token_data = decode::<AccountClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ if is_token_shaped(token) => {
                    debug!(error = %e, "Rejected altered session token");
                    TokenError::BadSignature
                }
                _ => {
                    debug!(error = %e, "Rejected malformed session token");
                    TokenError::Malformed
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

/// Three non-empty base64url segments. A token of this shape that fails
/// to decode was altered after signing, whichever segment was hit.
fn is_token_shaped(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        })
}
