//! Authentication middleware for axum.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::ApiKeyValidator;

/// Error response for authentication failures.
#[derive(Debug, Serialize)]
pub struct AuthError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

/// Require `Authorization: Bearer <key>` matching the configured key.
pub async fn require_api_key(
    State(validator): State<ApiKeyValidator>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let api_key = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AuthError {
            error: "Invalid authorization header. Must use Bearer token".to_string(),
            code: "MISSING_TOKEN".to_string(),
        })?;

    if !validator.validate(api_key) {
        let prefix: String = api_key.chars().take(4).collect();
        tracing::warn!(key_prefix = %prefix, "Invalid API key attempted");
        return Err(AuthError {
            error: "Invalid token".to_string(),
            code: "INVALID_TOKEN".to_string(),
        });
    }

    Ok(next.run(request).await)
}
