//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use forkful_core::error::ForkfulError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
    upstream_status: Option<u16>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
            upstream_status: None,
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, "NOT_FOUND")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    /// Upstream answered with a failure status.
    pub fn bad_gateway(message: impl Into<String>, upstream_status: u16) -> Self {
        Self {
            upstream_status: Some(upstream_status),
            ..Self::new(StatusCode::BAD_GATEWAY, message, "UPSTREAM_ERROR")
        }
    }

    /// Upstream answered with something unusable.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message, "UPSTREAM_ERROR")
    }

    /// Upstream could not be reached.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message, "NETWORK_ERROR")
    }

    /// HTTP status this error responds with.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                status_code: self.upstream_status,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<ForkfulError> for ApiError {
    fn from(err: ForkfulError) -> Self {
        match &err {
            ForkfulError::UpstreamStatus { status, .. } => {
                tracing::warn!(error = %err, "Upstream failure");
                ApiError::bad_gateway(err.message(), *status)
            }
            ForkfulError::NetworkFailure(_) => {
                tracing::warn!(error = %err, "Upstream unreachable");
                ApiError::unavailable(err.message())
            }
            ForkfulError::Unknown(_) => {
                tracing::warn!(error = %err, "Unreadable upstream response");
                ApiError::upstream(err.message())
            }
            ForkfulError::NotFound(_) => ApiError::not_found(err.message()),
            ForkfulError::ValidationError(_) => ApiError::bad_request(err.message()),
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}
