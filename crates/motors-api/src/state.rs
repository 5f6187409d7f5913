//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use motors_auth::{CredentialHasher, PasswordHasher, SessionCookies, TokenIssuer, TokenVerifier};
use motors_core::config::AppConfig;
use motors_core::result::AppResult;
use motors_database::{AccountStore, InventoryStore, Stores};

use crate::views::{HtmlRenderer, Renderer};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Credential store
    pub accounts: Arc<dyn AccountStore>,
    /// Classification and inventory store
    pub inventory: Arc<dyn InventoryStore>,
    /// Password hasher (Argon2id unless replaced)
    pub hasher: Arc<dyn CredentialHasher>,
    /// Session token issuer
    pub issuer: Arc<TokenIssuer>,
    /// Session token verifier
    pub verifier: Arc<TokenVerifier>,
    /// Token and notice cookie carrier
    pub cookies: Arc<SessionCookies>,
    /// Page renderer
    pub renderer: Arc<dyn Renderer>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("issuer", &self.issuer)
            .field("cookies", &self.cookies)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Builds the state with the HTML renderer.
    pub fn new(config: AppConfig, stores: Stores) -> AppResult<Self> {
        Self::with_renderer(config, stores, Arc::new(HtmlRenderer::new()))
    }

    /// Builds the state with a custom renderer.
    pub fn with_renderer(
        config: AppConfig,
        stores: Stores,
        renderer: Arc<dyn Renderer>,
    ) -> AppResult<Self> {
        let hasher = PasswordHasher::new(&config.auth)?;
        Ok(Self {
            accounts: stores.accounts,
            inventory: stores.inventory,
            hasher: Arc::new(hasher),
            issuer: Arc::new(TokenIssuer::new(&config.auth)),
            verifier: Arc::new(TokenVerifier::new(&config.auth)),
            cookies: Arc::new(SessionCookies::new(&config.auth)),
            renderer,
            config: Arc::new(config),
        })
    }

    /// Replaces the password hasher.
    pub fn with_hasher(mut self, hasher: Arc<dyn CredentialHasher>) -> Self {
        self.hasher = hasher;
        self
    }
}
