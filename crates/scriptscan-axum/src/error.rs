//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` and multipart failures to HTTP status codes with a JSON
//! body of the form `{"error": "...", "status": 422}`.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scriptscan_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (malformed form, missing field).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The upload exceeds the configured body limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The document could not be read.
    #[error("Unprocessable document: {0}")]
    Unprocessable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg)
            | Self::PayloadTooLarge(msg)
            | Self::Unprocessable(msg)
            | Self::Internal(msg) => msg,
        };

        if status.is_server_error() {
            tracing::error!(target: "scriptscan.http", error = %message, "Request failed");
        }

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Extraction(e) => Self::Unprocessable(e.to_string()),
            CoreError::Configuration(msg) => Self::Internal(format!("Config: {msg}")),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<MultipartError> for HttpError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(err.body_text())
        } else {
            Self::BadRequest(err.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptscan_core::ExtractError;

    #[test]
    fn extraction_errors_are_unprocessable() {
        let err = HttpError::from(CoreError::Extraction(ExtractError::MissingDocumentPart));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn configuration_errors_are_internal() {
        let err = HttpError::from(CoreError::Configuration("bad lexicon".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
