//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the full router against fresh in-memory stores with
//! a deliberately light Argon2 work factor.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;

use motors_api::AppState;
use motors_auth::{CredentialHasher, PasswordHasher};
use motors_core::config::AppConfig;
use motors_core::error::AppError;
use motors_core::result::AppResult;
use motors_database::memory::{MemoryAccountStore, MemoryInventoryStore};
use motors_database::{AccountStore, Stores};
use motors_entity::account::{Account, AccountProfile, AccountType, NewAccount, UpdateAccount};

/// Password that satisfies the strength rules.
pub const STRONG_PASSWORD: &str = "Abcdefgh123!";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching the stores and token issuer directly
    pub state: AppState,
    /// The in-memory account rows behind `state.accounts`
    pub accounts: Arc<MemoryAccountStore>,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::assemble(None, None)
    }

    /// An application whose account store fails in the given way.
    pub fn with_account_fault(fault: AccountFault) -> Self {
        Self::assemble(Some(fault), None)
    }

    /// An application using `hasher` instead of Argon2id.
    pub fn with_hasher(hasher: Arc<dyn CredentialHasher>) -> Self {
        Self::assemble(None, Some(hasher))
    }

    fn assemble(fault: Option<AccountFault>, hasher: Option<Arc<dyn CredentialHasher>>) -> Self {
        let accounts = Arc::new(MemoryAccountStore::new());
        let account_store: Arc<dyn AccountStore> = match fault {
            Some(fault) => Arc::new(FaultyAccounts {
                inner: accounts.clone(),
                fault,
            }),
            None => accounts.clone(),
        };
        let stores = Stores {
            accounts: account_store,
            inventory: Arc::new(MemoryInventoryStore::new()),
        };

        let mut state = AppState::new(test_config(), stores).expect("Failed to build state");
        if let Some(hasher) = hasher {
            state = state.with_hasher(hasher);
        }
        let router = motors_api::build_app(state.clone());

        Self {
            router,
            state,
            accounts,
        }
    }

    /// Insert an account directly and return its profile.
    pub async fn create_account(
        &self,
        first_name: &str,
        email: &str,
        password: &str,
        account_type: AccountType,
    ) -> AccountProfile {
        let password_hash = self
            .state
            .hasher
            .hash(password.to_string())
            .await
            .expect("Failed to hash password");

        let account = self
            .accounts
            .register(&NewAccount {
                first_name: first_name.to_string(),
                last_name: "Tester".to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .expect("Failed to create account");

        assert!(self.accounts.set_account_type(account.id, account_type));

        AccountProfile {
            account_type,
            ..account.into_profile()
        }
    }

    /// Log in through the form and return the `jwt=<token>` cookie pair.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/account/login",
                &[("account_email", email), ("account_password", password)],
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::SEE_OTHER,
            "Login failed: {}",
            response.body
        );

        response
            .cookie_pair("jwt")
            .expect("No jwt cookie in login response")
    }

    /// Create an account of the given type and log it in.
    pub async fn logged_in(
        &self,
        first_name: &str,
        email: &str,
        account_type: AccountType,
    ) -> (AccountProfile, String) {
        let profile = self
            .create_account(first_name, email, STRONG_PASSWORD, account_type)
            .await;
        let cookie = self.login(email, STRONG_PASSWORD).await;
        (profile, cookie)
    }

    /// GET `path`, optionally sending a `Cookie` header.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        let req = req.body(Body::empty()).expect("Failed to build request");
        self.send(req).await
    }

    /// POST an urlencoded form.
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        let req = req
            .body(Body::from(encode_form(fields)))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Rendered body
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The raw `Set-Cookie` header for `name`, if one was sent.
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(str::to_string)
    }

    /// `name=value` for a cookie that was set to a non-empty value.
    pub fn cookie_pair(&self, name: &str) -> Option<String> {
        let raw = self.set_cookie(name)?;
        let pair = raw.split(';').next()?.trim().to_string();
        if pair.len() > name.len() + 1 {
            Some(pair)
        } else {
            None
        }
    }

    /// Whether the response removes cookie `name`.
    pub fn clears_cookie(&self, name: &str) -> bool {
        self.set_cookie(name).is_some_and(|raw| {
            raw.starts_with(&format!("{name}=;")) && raw.contains("Max-Age=0")
        })
    }
}

/// Joins cookie pairs into one `Cookie` header value.
pub fn cookies(pairs: &[&str]) -> String {
    pairs.join("; ")
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Configuration with a fixed secret and the lightest Argon2 work factor.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.password_hash_memory_kib = 8;
    config.auth.password_hash_iterations = 1;
    config.auth.password_hash_parallelism = 1;
    config
}

/// How [`FaultyAccounts`] misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountFault {
    /// `register` fails with a database error.
    RegisterFails,
    /// `update_password` fails with a database error.
    PasswordUpdateFails,
    /// `update_password` reports that no row matched.
    PasswordUpdateMissesRow,
}

/// Memory-backed account store with one failing operation.
pub struct FaultyAccounts {
    inner: Arc<MemoryAccountStore>,
    fault: AccountFault,
}

#[async_trait]
impl AccountStore for FaultyAccounts {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>> {
        self.inner.find_by_id(id).await
    }

    async fn register(&self, data: &NewAccount) -> AppResult<Account> {
        if self.fault == AccountFault::RegisterFails {
            return Err(AppError::database("connection reset while inserting account"));
        }
        self.inner.register(data).await
    }

    async fn update_profile(&self, data: &UpdateAccount) -> AppResult<bool> {
        self.inner.update_profile(data).await
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<bool> {
        match self.fault {
            AccountFault::PasswordUpdateFails => {
                Err(AppError::database("connection reset while updating password"))
            }
            AccountFault::PasswordUpdateMissesRow => Ok(false),
            AccountFault::RegisterFails => self.inner.update_password(id, password_hash).await,
        }
    }
}

/// A hasher whose `hash` always fails.
pub struct BrokenHasher;

#[async_trait]
impl CredentialHasher for BrokenHasher {
    async fn hash(&self, _password: String) -> AppResult<String> {
        Err(AppError::internal("Password hashing failed: out of memory"))
    }

    async fn verify(&self, _password: String, _digest: String) -> AppResult<bool> {
        Ok(false)
    }

    async fn verify_decoy(&self, _password: String) -> AppResult<()> {
        Ok(())
    }
}

/// Argon2id hasher that counts every verification it performs.
pub struct CountingHasher {
    inner: PasswordHasher,
    verifications: AtomicUsize,
}

impl CountingHasher {
    pub fn new() -> Self {
        Self {
            inner: PasswordHasher::new(&test_config().auth).expect("Failed to build hasher"),
            verifications: AtomicUsize::new(0),
        }
    }

    /// Verifications performed so far, decoy runs included.
    pub fn verifications(&self) -> usize {
        self.verifications.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialHasher for CountingHasher {
    async fn hash(&self, password: String) -> AppResult<String> {
        self.inner.hash(password).await
    }

    async fn verify(&self, password: String, digest: String) -> AppResult<bool> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(password, digest).await
    }

    async fn verify_decoy(&self, password: String) -> AppResult<()> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        self.inner.verify_decoy(password).await
    }
}
