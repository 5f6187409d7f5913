//! Password hashing and policy enforcement.

pub mod hasher;
pub mod policy;

pub use hasher::{CredentialHasher, PasswordHasher};
pub use policy::meets_requirements;
