//! HTTP error mapping. Every error body is `{"error": "<message>"}`.

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deptdocs_core::error::DeptDocsError;

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// For mutating endpoints: store failures become a 500 carrying the
    /// endpoint's fixed message; the cause is logged, never returned.
    pub fn mutation_failed(err: DeptDocsError, message: &'static str) -> Self {
        if err.is_unavailable() {
            tracing::error!(error = %err, "{message}");
            return Self::new(StatusCode::INTERNAL_SERVER_ERROR, message);
        }
        err.into()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<DeptDocsError> for AppError {
    fn from(err: DeptDocsError) -> Self {
        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if err.is_unavailable() {
            tracing::error!(error = %err, "store call failed");
        }
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::unprocessable(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self::unprocessable(rejection.body_text())
    }
}

/// Path segments name stored records, so an unparsable one names nothing.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "unparsable path");
        Self::new(StatusCode::NOT_FOUND, "not found")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}
