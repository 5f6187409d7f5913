//! Account type (role) enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission tier of an account.
///
/// Stored in the `account_type` PostgreSQL enum with capitalized labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_type")]
pub enum AccountType {
    /// A customer; the tier every registration starts with.
    #[default]
    Client,
    /// Staff allowed to manage classifications and inventory.
    Employee,
    /// Full administrator.
    Admin,
}

impl AccountType {
    /// Staff roles may reach the inventory management pages.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Employee | Self::Admin)
    }

    /// Return the role label as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Employee => "Employee",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = motors_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "employee" => Ok(Self::Employee),
            "admin" => Ok(Self::Admin),
            _ => Err(motors_core::AppError::validation(format!(
                "Invalid account type: '{s}'. Expected one of: Client, Employee, Admin"
            ))),
        }
    }
}
