//! Mapping of directory errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use namedex_common::error::{Error, ErrorKind};

use crate::models::ErrorResponse;

/// An error response: status, machine-readable code and message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub error: String,
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, error: impl Into<String>) -> ApiError {
        ApiError {
            status,
            code,
            error: error.into(),
            message: None,
        }
    }

    pub fn bad_request(code: &'static str, error: impl Into<String>) -> ApiError {
        ApiError::new(StatusCode::BAD_REQUEST, code, error)
    }

    pub fn not_found(code: &'static str, error: impl Into<String>) -> ApiError {
        ApiError::new(StatusCode::NOT_FOUND, code, error)
    }

    pub fn internal(message: impl Into<String>, expose: bool) -> ApiError {
        let mut err = ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "internal server error",
        );
        if expose {
            err.message = Some(message.into());
        }
        err
    }

    /// Converts a directory error. Messages of server-side failures are only
    /// attached when `expose_internal` is set.
    pub fn from_directory(err: Error, expose_internal: bool) -> ApiError {
        let text = err.to_string();
        let mut api_error = match err.kind() {
            ErrorKind::InvalidArgument { name, .. } => {
                let code = match name.as_str() {
                    "letter" => "INVALID_LETTER",
                    "offset" => "INVALID_OFFSET",
                    "limit" => "INVALID_LIMIT",
                    _ => "INVALID_ARGUMENT",
                };
                return ApiError::bad_request(code, text);
            }
            ErrorKind::IndexNotReady => {
                return ApiError::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "INDEX_NOT_BUILT",
                    "index not built yet",
                );
            }
            ErrorKind::FileNotFound { .. } => {
                ApiError::not_found("FILE_NOT_FOUND", "source file not found")
            }
            ErrorKind::Indexing { .. } => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INDEXING_ERROR",
                "failed to build the index",
            ),
            ErrorKind::Read { .. } => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "READ_ERROR",
                "failed to read records",
            ),
            ErrorKind::Cancelled { .. } => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "CANCELLED",
                "request was cancelled",
            ),
            ErrorKind::Io { .. } => ApiError::internal(text.clone(), false),
        };
        if expose_internal {
            api_error.message = Some(text);
        }
        api_error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, code = self.code, message = ?self.message, "{}", self.error);
        } else {
            tracing::warn!(status = %self.status, code = self.code, "{}", self.error);
        }
        let body = ErrorResponse {
            error: self.error,
            code: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
