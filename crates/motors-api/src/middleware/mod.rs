//! Axum middleware stack.

pub mod error_page;
pub mod identity;
pub mod logging;
