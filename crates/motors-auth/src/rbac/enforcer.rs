//! Checks a request identity against a login or role requirement.

use motors_core::error::AppError;
use motors_entity::account::AccountType;

use crate::jwt::AccountClaims;
use crate::session::RequestIdentity;

/// A set of roles permitted to use a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRequirement {
    /// Roles that pass the check.
    permitted: Vec<AccountType>,
}

impl RoleRequirement {
    /// Requires one of `permitted`.
    pub fn any_of(permitted: impl Into<Vec<AccountType>>) -> Self {
        Self {
            permitted: permitted.into(),
        }
    }

    /// Inventory management: `Employee` or `Admin`.
    pub fn staff() -> Self {
        Self::any_of([AccountType::Employee, AccountType::Admin])
    }

    /// Whether `role` passes.
    pub fn permits(&self, role: AccountType) -> bool {
        self.permitted.contains(&role)
    }

    /// Returns the claims if the identity is logged in with a permitted role.
    ///
    /// Anonymous is an authentication error; a logged-in account with
    /// another role is an authorization error.
    pub fn check<'a>(&self, identity: &'a RequestIdentity) -> Result<&'a AccountClaims, AppError> {
        let claims = require_login(identity)?;
        if self.permits(claims.account_type) {
            Ok(claims)
        } else {
            Err(AppError::authorization(format!(
                "Role '{}' may not access this resource",
                claims.account_type
            )))
        }
    }
}

/// Returns the claims if the identity is logged in.
pub fn require_login(identity: &RequestIdentity) -> Result<&AccountClaims, AppError> {
    identity
        .claims()
        .ok_or_else(|| AppError::authentication("Login required"))
}

/// Passes only when the logged-in account is the target account.
pub fn require_owner(claims: &AccountClaims, account_id: i32) -> Result<(), AppError> {
    if claims.account_id == account_id {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "Account {} may not modify account {account_id}",
            claims.account_id
        )))
    }
}
