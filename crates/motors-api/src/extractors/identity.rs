//! Extractors over the identity resolved by the identity middleware.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use motors_auth::{AccountClaims, RequestIdentity};

use crate::middleware::identity::{LOGIN_NOTICE, login_redirect};
use crate::state::AppState;

/// The request's identity; `Anonymous` when no token was presented.
#[derive(Debug, Clone)]
pub struct Identity(pub RequestIdentity);

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<RequestIdentity>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}

/// Claims of the logged-in account.
///
/// Anonymous requests are redirected to the login page with a notice.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub AccountClaims);

impl std::ops::Deref for CurrentAccount {
    type Target = AccountClaims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<RequestIdentity>()
            .and_then(|identity| identity.claims())
            .cloned();

        match claims {
            Some(claims) => Ok(Self(claims)),
            None => Err(login_redirect(
                state,
                CookieJar::from_headers(&parts.headers),
                LOGIN_NOTICE,
            )),
        }
    }
}
