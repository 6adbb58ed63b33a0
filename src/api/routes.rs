//! Route definitions for the API.

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::auth::{require_api_key, ApiKeyValidator};
use crate::AppState;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::check_carrier, handlers::health_check),
    components(schemas(
        crate::api::types::CarrierCheck,
        crate::api::types::HealthResponse,
        crate::domain::AuthorityAssessment,
        crate::domain::RulesAssessment,
        crate::domain::VerdictResult,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "carrier", description = "Carrier vetting"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Carrier Vetting Proxy API",
        version = "0.1.0",
        description = "Carrier lookups by MC, DOT or phone number, returned as PASS/FAIL verdicts",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the API router.
///
/// `/carrier/check` requires the configured bearer key; `/health` and the
/// OpenAPI docs are public.
pub fn build_router(state: AppState, api_key_validator: ApiKeyValidator) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected_routes = Router::new()
        .route("/carrier/check", get(handlers::check_carrier))
        .route_layer(middleware::from_fn_with_state(
            api_key_validator,
            require_api_key,
        ))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state);

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::domain::{AuthorityAssessment, CarrierRecord, PhoneSearchCategory, PhoneStatus};
    use crate::engine::test_support::{sample_carrier, sample_conditions, FakeProvider};
    use crate::engine::{CheckDispatcher, ConditionAssessor};
    use crate::error::UPSTREAM_AUTH_MESSAGE;

    const KEY: &str = "proxy-test-key";

    fn make_router(provider: Arc<FakeProvider>) -> Router {
        crate::logging::init_test();
        let dispatcher = CheckDispatcher::new(provider, ConditionAssessor::new(sample_conditions()));
        let state = AppState {
            dispatcher: Arc::new(dispatcher),
            upstream_environment: "staging",
        };
        build_router(state, ApiKeyValidator::new(KEY))
    }

    fn passing_carrier() -> CarrierRecord {
        let mut carrier = sample_carrier();
        carrier.authority_assessment = Some(AuthorityAssessment::default());
        carrier
    }

    fn get_request(uri: &str, key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(key) = key {
            builder = builder.header(AUTHORIZATION, format!("Bearer {key}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_missing_identifier_rejected_before_lookup() {
        let provider = Arc::new(FakeProvider::default());
        let router = make_router(provider.clone());

        let (status, body) = send(router, get_request("/carrier/check", Some(KEY))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_rejected() {
        let provider = Arc::new(FakeProvider::default());
        let router = make_router(provider.clone());

        let (status, body) = send(router, get_request("/carrier/check?mc_number=1", None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "MISSING_TOKEN");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_wrong_credential_rejected() {
        let provider = Arc::new(FakeProvider::default());
        let router = make_router(provider.clone());

        let (status, body) = send(
            router,
            get_request("/carrier/check?mc_number=1", Some("not-the-key")),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_TOKEN");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mc_check_fails_on_insurance() {
        let provider = Arc::new(FakeProvider {
            carrier: Some(sample_carrier()),
            ..Default::default()
        });
        let router = make_router(provider);

        let (status, body) = send(
            router,
            get_request("/carrier/check?mc_number=012345", Some(KEY)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "FAIL");
        assert_eq!(body["reason"], "Failed condition: is_active_insurance");
        assert_eq!(body["carrier_id"], "mc_12345");
        assert_eq!(body["mc_number"], "12345");
        assert_eq!(body["authority_assessment"]["is_active_insurance"], false);
        assert_eq!(body["rules_assessment"]["overall_result"], "pass");
        assert!(body["phone_search_result_category"].is_null());
    }

    #[tokio::test]
    async fn test_mc_not_found_has_no_carrier_id() {
        let provider = Arc::new(FakeProvider::default());
        let router = make_router(provider);

        let (status, body) = send(
            router,
            get_request("/carrier/check?mc_number=12345", Some(KEY)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "FAIL");
        assert_eq!(body["reason"], "Carrier not found");
        assert!(body["carrier_id"].is_null());
    }

    #[tokio::test]
    async fn test_phone_takes_precedence() {
        let provider = Arc::new(FakeProvider {
            phone: Some(PhoneStatus {
                phone_search_result_category: Some(
                    PhoneSearchCategory::OneCarrierPassingRuleAssessment,
                ),
            }),
            carrier: Some(passing_carrier()),
            ..Default::default()
        });
        let router = make_router(provider.clone());

        let (status, body) = send(
            router,
            get_request(
                "/carrier/check?mc_number=1&dot_number=2&phone_number=%2B15551112222",
                Some(KEY),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "PASS");
        assert!(body["reason"].is_null());
        assert_eq!(
            body["phone_search_result_category"],
            "found_phone_associated_with_one_carrier_and_passing_rule_assessment"
        );
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.last_call().as_deref(), Some("phone:+15551112222"));
    }

    #[tokio::test]
    async fn test_upstream_unauthorized_maps_to_credential_error() {
        let provider = Arc::new(FakeProvider {
            unauthorized: true,
            ..Default::default()
        });
        let router = make_router(provider);

        let (status, body) = send(
            router,
            get_request("/carrier/check?dot_number=1234567", Some(KEY)),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "UPSTREAM_AUTH_ERROR");
        assert_eq!(body["error"], UPSTREAM_AUTH_MESSAGE);
    }

    #[tokio::test]
    async fn test_upstream_error_surfaces_raw_text() {
        let provider = Arc::new(FakeProvider::default());
        let router = make_router(provider);

        let (status, body) = send(
            router,
            get_request("/carrier/check?dot_number=502", Some(KEY)),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "UPSTREAM_ERROR");
        assert_eq!(body["error"], "provider unavailable");
        assert_eq!(body["details"], "vetting provider returned HTTP 502");
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let router = make_router(Arc::new(FakeProvider::default()));

        let (status, body) = send(router, get_request("/health", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["upstream"], "staging");
        assert_eq!(body["phone_conditions"], 1);
        assert_eq!(body["carrier_conditions"], 1);
    }
}
