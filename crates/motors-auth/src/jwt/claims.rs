//! JWT claims structure carried in the session cookie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use motors_entity::account::{AccountProfile, AccountType};

/// JWT claims payload identifying a logged-in account.
///
/// Field names are part of the cookie's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountClaims {
    /// Account primary key.
    pub account_id: i32,
    /// Given name, used in greetings.
    pub account_firstname: String,
    /// Login email.
    pub account_email: String,
    /// Role at the time of issuance.
    pub account_type: AccountType,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl AccountClaims {
    /// Builds claims for `profile` valid from `issued_at` for `ttl_seconds`.
    pub fn from_profile(profile: &AccountProfile, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            account_id: profile.id,
            account_firstname: profile.first_name.clone(),
            account_email: profile.email.clone(),
            account_type: profile.account_type,
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_seconds),
        }
    }

    /// Whether the token has expired at `now`. There is no leeway.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Whether the account may reach the inventory management pages.
    pub fn is_staff(&self) -> bool {
        self.account_type.is_staff()
    }
}
