//! Shared response envelope for API handlers.
//!
//! Success responses use a `{ "message": ..., "data": ... }` envelope;
//! failures are rendered by [`crate::error::AppError`] as
//! `{ "error": ..., "code": ... }`. Exactly one of the two shapes appears
//! in any response.

use serde::Serialize;

/// Standard success envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiSuccess { message: "Request successful", data: profile }))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T: Serialize> {
    pub message: &'static str,
    pub data: T,
}
