//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "MOTORS";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication and session cookie settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config/default.toml`, the optional
    /// `config/{env}.toml` overlay and `MOTORS__SECTION__KEY` variables.
    ///
    /// With `env` unset no overlay is read, so `auth.cookie_secure` keeps
    /// its `true` default unless a file or variable turns it off.
    pub fn load(env: Option<&str>) -> Result<Self, AppError> {
        Self::load_from(Path::new("config"), env)
    }

    /// [`load`](Self::load) with the TOML files read from `dir`.
    pub fn load_from(dir: &Path, env: Option<&str>) -> Result<Self, AppError> {
        let file = |name: &str| config::File::with_name(&dir.join(name).to_string_lossy());
        let mut builder = config::Config::builder().add_source(file("default").required(false));
        if let Some(env) = env {
            builder = builder.add_source(file(env).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_seconds must be greater than zero",
            ));
        }
        if self.auth.cookie_name.is_empty() || self.auth.flash_cookie_name.is_empty() {
            return Err(AppError::configuration("cookie names must not be empty"));
        }
        if self.auth.cookie_name == self.auth.flash_cookie_name {
            return Err(AppError::configuration(
                "auth.cookie_name and auth.flash_cookie_name must differ",
            ));
        }
        if self.auth.uses_placeholder_secret() {
            tracing::warn!("auth.jwt_secret is the built-in placeholder; set MOTORS__AUTH__JWT_SECRET");
        }
        if !self.auth.cookie_secure {
            tracing::warn!("Session cookie is issued without the Secure flag");
        }
        Ok(())
    }
}
