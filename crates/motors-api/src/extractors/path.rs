//! Typed path parameter helpers.

use motors_core::error::AppError;

use crate::error::NOT_FOUND_MESSAGE;

/// Parses a numeric id from a path segment.
///
/// A segment that is not a positive integer cannot name a row, so it is a
/// 404 rather than a 400.
pub fn parse_id(s: &str) -> Result<i32, AppError> {
    match s.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::not_found(NOT_FOUND_MESSAGE)),
    }
}
