//! # motors-api
//!
//! HTTP layer for CSE Motors built on Axum.
//!
//! Provides the server-rendered pages, form handling, identity and role
//! middleware, cookie-backed notices and error page mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod views;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
