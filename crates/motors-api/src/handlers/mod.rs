//! Route handlers organized by domain.

pub mod account;
pub mod error;
pub mod home;
pub mod inventory;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use motors_auth::RequestIdentity;
use motors_core::result::AppResult;

use crate::state::AppState;
use crate::views::{Page, PageContext};

/// Loads the navigation and consumes the pending notice.
pub(crate) async fn page_context(
    state: &AppState,
    identity: RequestIdentity,
    jar: CookieJar,
    title: impl Into<String>,
) -> AppResult<(CookieJar, PageContext)> {
    let nav = state.inventory.classifications().await?;
    let (jar, notice) = state.cookies.take_flash(jar);
    Ok((
        jar,
        PageContext {
            title: title.into(),
            nav,
            notice,
            errors: Vec::new(),
            identity,
        },
    ))
}

/// Renders `page` with `status`, sending any cookie changes along.
pub(crate) fn render(
    state: &AppState,
    status: StatusCode,
    jar: CookieJar,
    page: &Page,
    ctx: &PageContext,
) -> Response {
    (status, jar, Html(state.renderer.render(page, ctx))).into_response()
}
