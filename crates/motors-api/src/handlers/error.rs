//! Error routes.

use motors_core::error::AppError;

use crate::error::{ApiError, NOT_FOUND_MESSAGE};

/// GET /error/trigger500
///
/// Fails on purpose so the error page can be exercised.
pub async fn trigger_500() -> Result<(), ApiError> {
    Err(AppError::internal("Intentional error triggered").into())
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    AppError::not_found(NOT_FOUND_MESSAGE).into()
}
