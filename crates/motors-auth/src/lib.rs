//! # motors-auth
//!
//! Authentication and authorization for CSE Motors.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and strength rules for new passwords
//! - `jwt`: HS256 session token issuance and verification
//! - `session`: token and notice cookies, per-request identity
//! - `rbac`: login, ownership and role checks

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use jwt::{AccountClaims, TokenError, TokenIssuer, TokenVerifier};
pub use password::{CredentialHasher, PasswordHasher};
pub use rbac::RoleRequirement;
pub use session::{RequestIdentity, SessionCookies};
