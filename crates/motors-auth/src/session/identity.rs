//! The identity attached to each request.

use crate::jwt::{AccountClaims, TokenError, TokenVerifier};

/// Who is making the request, derived from the token cookie.
///
/// Resolved once per request and placed in the request extensions; never
/// stored anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestIdentity {
    /// No token cookie was presented.
    #[default]
    Anonymous,
    /// A valid token was presented.
    Authenticated(AccountClaims),
}

impl RequestIdentity {
    /// Resolves the identity from an optional presented token.
    ///
    /// No token is `Anonymous`. A token that fails verification is an
    /// error, which the caller turns into a cleared cookie and a redirect.
    pub fn resolve(
        verifier: &TokenVerifier,
        token: Option<&str>,
        now: i64,
    ) -> Result<Self, TokenError> {
        match token {
            None => Ok(Self::Anonymous),
            Some(token) => verifier.verify_at(token, now).map(Self::Authenticated),
        }
    }

    /// The verified claims, if authenticated.
    pub fn claims(&self) -> Option<&AccountClaims> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(claims) => Some(claims),
        }
    }

    /// Whether a valid token was presented.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}
