//! Home page handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::error::ApiResult;
use crate::extractors::Identity;
use crate::state::AppState;
use crate::views::Page;

use super::{page_context, render};

/// GET /
pub async fn index(
    State(state): State<AppState>,
    Identity(identity): Identity,
    jar: CookieJar,
) -> ApiResult<Response> {
    let (jar, ctx) = page_context(&state, identity, jar, "Home").await?;
    Ok(render(&state, StatusCode::OK, jar, &Page::Home, &ctx))
}
