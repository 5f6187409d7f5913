//! Account entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::AccountType;

/// A registered account, as stored.
///
/// Carries the password digest; only the credential store and the login
/// flow ever see this type. Everything rendered or signed uses
/// [`AccountProfile`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    #[sqlx(rename = "account_id")]
    pub id: i32,
    /// Given name.
    #[sqlx(rename = "account_firstname")]
    pub first_name: String,
    /// Family name.
    #[sqlx(rename = "account_lastname")]
    pub last_name: String,
    /// Login email (unique, case-insensitive).
    #[sqlx(rename = "account_email")]
    pub email: String,
    /// Argon2 password digest.
    #[sqlx(rename = "account_password")]
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Permission tier.
    pub account_type: AccountType,
}

impl Account {
    /// Consume the row and drop the password digest.
    pub fn into_profile(self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            account_type: self.account_type,
        }
    }
}

/// An account without its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Unique account identifier.
    pub id: i32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Permission tier.
    pub account_type: AccountType,
}

/// Data required to register a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Pre-computed password digest.
    pub password_hash: String,
}

/// Data for updating an existing account's profile.
#[derive(Debug, Clone)]
pub struct UpdateAccount {
    /// The account to update.
    pub id: i32,
    /// New given name.
    pub first_name: String,
    /// New family name.
    pub last_name: String,
    /// New login email.
    pub email: String,
}
