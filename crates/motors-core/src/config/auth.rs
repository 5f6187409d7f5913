//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Placeholder secret shipped in the defaults; never fit for production.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Authentication, token and session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime in seconds; also the session cookie's Max-Age.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
    /// Name of the cookie carrying the signed token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie carries the `Secure` attribute.
    ///
    /// Defaults to `true`; local development turns it off explicitly.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
    /// Name of the one-shot notice cookie.
    #[serde(default = "default_flash_cookie_name")]
    pub flash_cookie_name: String,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub password_hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub password_hash_iterations: u32,
    /// Argon2 lanes.
    #[serde(default = "default_hash_parallelism")]
    pub password_hash_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_seconds: default_token_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: true,
            flash_cookie_name: default_flash_cookie_name(),
            password_hash_memory_kib: default_hash_memory(),
            password_hash_iterations: default_hash_iterations(),
            password_hash_parallelism: default_hash_parallelism(),
        }
    }
}

impl AuthConfig {
    /// Whether the signing secret is still the shipped placeholder.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_cookie_name() -> String {
    "jwt".to_string()
}

fn default_flash_cookie_name() -> String {
    "flash".to_string()
}

fn default_hash_memory() -> u32 {
    19 * 1024
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}

fn default_true() -> bool {
    true
}
