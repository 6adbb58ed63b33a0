//! Error types for the proxy.
//!
//! Defines a unified error type that maps cleanly to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Message returned when the provider rejects our credential.
pub const UPSTREAM_AUTH_MESSAGE: &str =
    "Failed to authenticate with Highway API. Please check the upstream API token.";

/// Unified error type for request handling.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Upstream authentication failed")]
    UpstreamAuth,

    /// `message` is the provider's raw text; `status` its HTTP status, if any.
    #[error("Upstream error: {message}")]
    Upstream { message: String, status: Option<u16> },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Unauthorized { .. } => ProxyError::UpstreamAuth,
            UpstreamError::Status { status, body } => ProxyError::Upstream {
                message: body,
                status: Some(status.as_u16()),
            },
            UpstreamError::InvalidUrl(url) => ProxyError::Internal(format!("invalid URL {url}")),
            other => ProxyError::Upstream {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

/// Error response body for API clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ProxyError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            ProxyError::UpstreamAuth => {
                tracing::error!("Vetting provider rejected the configured API token");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_AUTH_ERROR",
                    UPSTREAM_AUTH_MESSAGE.to_string(),
                    None,
                )
            }
            // The raw upstream text is surfaced verbatim.
            ProxyError::Upstream { message, status } => {
                tracing::error!(error = %message, upstream_status = ?status, "Error processing request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    message.clone(),
                    status.map(|s| format!("vetting provider returned HTTP {s}")),
                )
            }
            ProxyError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;
