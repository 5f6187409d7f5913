//! Token verification failures.

use thiserror::Error;

use motors_core::error::AppError;

/// Why a presented token was rejected.
///
/// Only logged. The end user sees the same "Please log in." notice for
/// every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not three base64url segments.
    #[error("token is malformed")]
    Malformed,
    /// Signed with a different secret, or any segment altered after signing.
    #[error("token signature does not match")]
    BadSignature,
    /// The current time is at or past `exp`.
    #[error("token has expired")]
    Expired,
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::authentication(err.to_string())
    }
}
