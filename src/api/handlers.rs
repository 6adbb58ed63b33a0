//! HTTP request handlers.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::api::types::*;
use crate::engine::Identifier;
use crate::error::{ProxyError, ProxyResult};
use crate::AppState;

/// Check a carrier by phone, MC or DOT number.
///
/// GET /carrier/check
#[utoipa::path(
    get,
    path = "/carrier/check",
    params(CarrierCheckQuery),
    responses(
        (status = 200, description = "Verdict for the carrier", body = CarrierCheck),
        (status = 400, description = "No identifier supplied"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Vetting provider error")
    ),
    security(("bearer_auth" = [])),
    tag = "carrier"
)]
pub async fn check_carrier(
    State(state): State<AppState>,
    Query(query): Query<CarrierCheckQuery>,
) -> ProxyResult<Json<CarrierCheck>> {
    let identifier = Identifier::select(
        query.phone_number.as_deref(),
        query.mc_number.as_deref(),
        query.dot_number.as_deref(),
    )
    .ok_or_else(|| {
        ProxyError::BadRequest(
            "Must provide either mc_number, dot_number, or phone_number".to_string(),
        )
    })?;

    tracing::info!(kind = identifier.kind(), "Checking carrier");

    let check = state.dispatcher.check(&identifier).await?;

    Ok(Json(check))
}

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let conditions = state.dispatcher.assessor().conditions();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: state.upstream_environment.to_string(),
        phone_conditions: conditions.phone_len(),
        carrier_conditions: conditions.carrier_len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
