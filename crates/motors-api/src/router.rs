//! Route definitions for the CSE Motors site.
//!
//! Routes are grouped by who may reach them. Gated groups carry their gate
//! as a `route_layer`, so unmatched paths still fall through to the 404
//! page instead of a login redirect.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Every request first has its identity resolved from the token cookie;
/// handler errors are then turned into full error pages on the way out.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .route("/", get(handlers::home::index))
        .merge(account_routes())
        .merge(account_member_routes(state.clone()))
        .merge(inventory_routes())
        .merge(inventory_staff_routes(state.clone()))
        .merge(error_routes())
        .fallback(handlers::error::not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::error_page::render_error_pages,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::identity::resolve_identity,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Login, registration and logout
fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/account/login",
            get(handlers::account::login_view).post(handlers::account::login),
        )
        .route(
            "/account/register",
            get(handlers::account::register_view).post(handlers::account::register),
        )
        .route("/account/logout", get(handlers::account::logout))
}

/// Account pages for logged-in users
fn account_member_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/account/", get(handlers::account::account_home))
        .route("/account", get(handlers::account::account_home))
        .route(
            "/account/update/{account_id}",
            get(handlers::account::update_view),
        )
        .route(
            "/account/update-info",
            post(handlers::account::update_info),
        )
        .route(
            "/account/change-password",
            post(handlers::account::change_password),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::identity::require_login,
        ))
}

/// Public inventory browsing
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/inv/type/{classification_id}",
            get(handlers::inventory::by_classification),
        )
        .route("/inv/detail/{inv_id}", get(handlers::inventory::detail))
}

/// Inventory management (Employee and Admin)
fn inventory_staff_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/inv/", get(handlers::inventory::management))
        .route("/inv", get(handlers::inventory::management))
        .route(
            "/inv/add-classification",
            get(handlers::inventory::add_classification_view)
                .post(handlers::inventory::add_classification),
        )
        .route(
            "/inv/add-inventory",
            get(handlers::inventory::add_inventory_view)
                .post(handlers::inventory::add_inventory),
        )
        .route("/inv/edit/{inv_id}", get(handlers::inventory::edit_view))
        .route("/inv/update", post(handlers::inventory::update))
        .route(
            "/inv/delete/{inv_id}",
            get(handlers::inventory::delete_view),
        )
        .route("/inv/delete", post(handlers::inventory::delete))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::identity::require_staff,
        ))
}

/// Deliberate failure for exercising the error page
fn error_routes() -> Router<AppState> {
    Router::new().route("/error/trigger500", get(handlers::error::trigger_500))
}
