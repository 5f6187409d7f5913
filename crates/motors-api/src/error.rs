//! Maps domain `AppError` to HTTP responses.
//!
//! A handler error becomes an empty response carrying an [`ErrorPage`]
//! extension; the error page middleware renders it inside the full layout.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use motors_core::error::{AppError, ErrorKind};

/// Shown for any 404.
pub const NOT_FOUND_MESSAGE: &str = "Sorry, we appear to have lost that page.";

/// Shown for any 5xx.
pub const CRASH_MESSAGE: &str = "Oh no! There was a crash. Maybe try a different route?";

/// Handler error type; wraps [`AppError`] so it can be a response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<motors_auth::TokenError> for ApiError {
    fn from(err: motors_auth::TokenError) -> Self {
        Self(err.into())
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Instruction for the error page middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    /// Response status.
    pub status: StatusCode,
    /// User-facing message.
    pub message: String,
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        let message = if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.message, source = ?err.source, "Request failed");
            CRASH_MESSAGE.to_string()
        } else {
            tracing::debug!(kind = %err.kind, error = %err.message, "Request rejected");
            match err.kind {
                ErrorKind::NotFound if err.message.is_empty() => NOT_FOUND_MESSAGE.to_string(),
                _ => err.message,
            }
        };

        let mut response = status.into_response();
        response.extensions_mut().insert(ErrorPage { status, message });
        response
    }
}
