//! Per-request identity resolution and route gates.
//!
//! `resolve_identity` runs on every request and stores a
//! [`RequestIdentity`] in the request extensions. `require_login` and
//! `require_staff` are route layers that read it back.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use tracing::{debug, info};

use motors_auth::{RequestIdentity, RoleRequirement};
use motors_core::error::ErrorKind;

use crate::state::AppState;

/// Where anonymous and rejected requests are sent.
pub const LOGIN_PATH: &str = "/account/login";

/// Notice for anonymous or expired sessions.
pub const LOGIN_NOTICE: &str = "Please log in.";

/// Notice for logged-in accounts lacking the required role.
pub const PERMISSION_NOTICE: &str =
    "You do not have permission to access that page. Please log in with an authorized account.";

/// Redirects to the login page with `notice` queued.
pub fn login_redirect(state: &AppState, jar: CookieJar, notice: &str) -> Response {
    let jar = state.cookies.set_flash(jar, notice);
    (jar, Redirect::to(LOGIN_PATH)).into_response()
}

fn identity_of(request: &Request) -> RequestIdentity {
    request
        .extensions()
        .get::<RequestIdentity>()
        .cloned()
        .unwrap_or_default()
}

/// Verifies the token cookie, if any, and attaches the identity.
///
/// A token that fails verification is removed and the client is sent to
/// the login page; the failure kind is only logged.
pub async fn resolve_identity(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let resolved = RequestIdentity::resolve(
        &state.verifier,
        state.cookies.token(&jar),
        Utc::now().timestamp(),
    );

    match resolved {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(reason) => {
            debug!(reason = %reason, path = %request.uri().path(), "Rejected session token");
            let jar = state.cookies.clear_token(jar);
            login_redirect(&state, jar, LOGIN_NOTICE)
        }
    }
}

/// Lets only logged-in requests through.
pub async fn require_login(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if identity_of(&request).is_authenticated() {
        next.run(request).await
    } else {
        login_redirect(&state, jar, LOGIN_NOTICE)
    }
}

/// Lets only `Employee` and `Admin` accounts through.
pub async fn require_staff(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let identity = identity_of(&request);
    match RoleRequirement::staff().check(&identity) {
        Ok(_) => next.run(request).await,
        Err(err) if err.kind == ErrorKind::Authorization => {
            info!(path = %request.uri().path(), reason = %err.message, "Role check denied");
            login_redirect(&state, jar, PERMISSION_NOTICE)
        }
        Err(_) => login_redirect(&state, jar, LOGIN_NOTICE),
    }
}
