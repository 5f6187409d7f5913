//! Argon2id password hashing and verification.

use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use async_trait::async_trait;

use motors_core::config::AuthConfig;
use motors_core::error::{AppError, ErrorKind};
use motors_core::result::AppResult;

/// Credential hashing as the login, registration and password-change
/// handlers use it. Implementations must not block the async runtime.
#[async_trait]
pub trait CredentialHasher: Send + Sync + 'static {
    /// Digest for a new password.
    async fn hash(&self, password: String) -> AppResult<String>;

    /// Whether `password` matches `digest`.
    async fn verify(&self, password: String, digest: String) -> AppResult<bool>;

    /// Runs one verification against a fixed digest and discards the
    /// outcome. Login calls this when the email matches no account.
    async fn verify_decoy(&self, password: String) -> AppResult<()>;
}

/// Handles password hashing and verification using Argon2id.
///
/// The work factor comes from [`AuthConfig`]; digests carry their own
/// parameters, so verification keeps working after the factor changes.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Argon2 memory, iteration and lane parameters.
    params: Params,
    /// Digest of a throwaway password under `params`.
    decoy: Arc<str>,
}

impl PasswordHasher {
    /// Creates a hasher with the configured work factor.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.password_hash_memory_kib,
            config.password_hash_iterations,
            config.password_hash_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        let mut hasher = Self {
            params,
            decoy: Arc::from(""),
        };
        hasher.decoy = Arc::from(hasher.hash_password("decoy-password-never-issued")?);
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2 digest.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not. A
    /// digest that cannot be parsed is an internal error.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[async_trait]
impl CredentialHasher for PasswordHasher {
    async fn hash(&self, password: String) -> AppResult<String> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Hashing task failed", e))?
    }

    async fn verify(&self, password: String, digest: String) -> AppResult<bool> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &digest))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Verification task failed", e))?
    }

    async fn verify_decoy(&self, password: String) -> AppResult<()> {
        self.verify(password, self.decoy.to_string()).await.map(|_| ())
    }
}
