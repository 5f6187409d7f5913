//! Renders [`ErrorPage`] responses inside the full layout.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use tracing::warn;

use motors_auth::RequestIdentity;

use crate::error::ErrorPage;
use crate::state::AppState;
use crate::views::{Page, PageContext};

/// Replaces the empty body of an error response with the error page.
pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let identity = request
        .extensions()
        .get::<RequestIdentity>()
        .cloned()
        .unwrap_or_default();

    let response = next.run(request).await;
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    // The nav is best effort here; the store may be what failed.
    let nav = match state.inventory.classifications().await {
        Ok(nav) => nav,
        Err(err) => {
            warn!(error = %err, "Could not load navigation for error page");
            Vec::new()
        }
    };

    let title = if page.status.is_server_error() {
        "Server Error".to_string()
    } else {
        page.status
            .canonical_reason()
            .unwrap_or("Error")
            .to_string()
    };
    let ctx = PageContext {
        title,
        nav,
        identity,
        ..PageContext::default()
    };
    let body = state.renderer.render(
        &Page::Error {
            status: page.status.as_u16(),
            message: page.message,
        },
        &ctx,
    );

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    let mut rendered = (parts.status, Html(body)).into_response();
    for (name, value) in parts.headers.iter() {
        if name != axum::http::header::CONTENT_TYPE {
            rendered.headers_mut().append(name.clone(), value.clone());
        }
    }
    rendered
}
