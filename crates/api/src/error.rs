use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use interviews_core::byte_range::unsatisfiable_content_range;
use interviews_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `interviews_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A stream token that does not resolve to a servable file.
    #[error("Media file not found")]
    MediaNotFound,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl AppError {
    /// Classify this error into an HTTP status, error code, and client-safe
    /// message. Internal causes are logged here and never returned.
    pub fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::RangeNotSatisfiable { size } => (
                    StatusCode::RANGE_NOT_SATISFIABLE,
                    "RANGE_NOT_SATISFIABLE",
                    format!("Requested range not satisfiable for {size} bytes"),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::MediaNotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Media file not found".to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }

    /// `Content-Range` value required alongside a 416 response.
    fn content_range(&self) -> Option<String> {
        match self {
            AppError::Core(CoreError::RangeNotSatisfiable { size }) => {
                Some(unsatisfiable_content_range(*size))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "success": false,
            "message": message,
            "code": code,
        });

        let mut response = (status, axum::Json(body)).into_response();
        attach_content_range(&self, &mut response);
        response
    }
}

/// Error wrapper for raw media endpoints.
///
/// Carries the same classification as [`AppError`] but renders a
/// `text/plain` body, since the client of these endpoints is a media
/// element rather than the JSON API client.
#[derive(Debug)]
pub struct PlainTextError(pub AppError);

impl From<AppError> for PlainTextError {
    fn from(err: AppError) -> Self {
        PlainTextError(err)
    }
}

impl From<CoreError> for PlainTextError {
    fn from(err: CoreError) -> Self {
        PlainTextError(AppError::Core(err))
    }
}

impl From<sqlx::Error> for PlainTextError {
    fn from(err: sqlx::Error) -> Self {
        PlainTextError(AppError::Database(err))
    }
}

impl From<std::io::Error> for PlainTextError {
    fn from(err: std::io::Error) -> Self {
        PlainTextError(AppError::from(err))
    }
}

impl IntoResponse for PlainTextError {
    fn into_response(self) -> Response {
        let (status, _code, message) = self.0.classify();
        // A 416 carries only its Content-Range header.
        if self.0.content_range().is_some() {
            let mut response = status.into_response();
            attach_content_range(&self.0, &mut response);
            return response;
        }
        (status, message).into_response()
    }
}

fn attach_content_range(err: &AppError, response: &mut Response) {
    if let Some(value) = err
        .content_range()
        .and_then(|v| HeaderValue::from_str(&v).ok())
    {
        response.headers_mut().insert(header::CONTENT_RANGE, value);
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
