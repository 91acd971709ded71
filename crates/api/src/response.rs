//! Shared response envelope types for API handlers.
//!
//! Successful JSON responses use a `{ "success": true, "data": ... }`
//! envelope; failures are rendered by [`crate::error::AppError`] as
//! `{ "success": false, "message": ..., "code": ... }`.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::ok(metadata)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
