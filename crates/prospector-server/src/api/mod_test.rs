use super::*;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use prospector_core::{AggregatedData, CompanyProfile, CompanyType};
use prospector_synth::{PromptPair, SignalProvider, TextModel};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

struct StaticSignals;

#[async_trait]
impl SignalProvider for StaticSignals {
    async fn collect(&self, company_name: &str) -> AggregatedData {
        AggregatedData::empty(company_name)
    }
}

struct StaticModel(Result<&'static str, fn() -> ModelError>);

#[async_trait]
impl TextModel for StaticModel {
    async fn invoke(&self, _prompt: &PromptPair, _max_tokens: u32) -> Result<String, ModelError> {
        match &self.0 {
            Ok(text) => Ok((*text).to_string()),
            Err(make) => Err(make()),
        }
    }
}

const ANALYSIS_REPLY: &str = r#"{"profile": "Omaha truckload carrier.", "painPoints": ["Driver communication gaps", "Dispatch coordination"], "techStack": "Legacy TMS", "outreachAngle": "Automate check calls."}"#;

fn rate_limited() -> ModelError {
    ModelError::RateLimited {
        backend: "test",
        retry_after_secs: None,
    }
}

fn catalog() -> CompanyCatalog {
    CompanyCatalog {
        companies: vec![CompanyProfile {
            id: 3,
            name: "Werner Enterprises".to_string(),
            fleet_size: 8_000,
            company_type: CompanyType::RegionalCarrier,
            headquarters: Some("Omaha, NE".to_string()),
            notes: None,
        }],
    }
}

/// A pool that never connects; routes that touch the database fail fast.
fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy("postgres://prospector@127.0.0.1:1/prospector")
        .expect("lazy pool")
}

fn app_with(analyst: StaticModel, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let synth = Synthesizer::new(
        Arc::new(StaticSignals),
        Arc::new(analyst),
        Arc::new(StaticModel(Err(rate_limited))),
    );
    build_app(
        AppState {
            pool: lazy_pool(),
            synth: Arc::new(synth),
            catalog: Arc::new(catalog()),
        },
        auth,
        rate_limit,
    )
}

fn app() -> Router {
    app_with(
        StaticModel(Ok(ANALYSIS_REPLY)),
        AuthState::disabled(),
        default_rate_limit_state(),
    )
}

fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

#[test]
fn api_error_codes_map_to_statuses() {
    let cases = [
        ("validation_error", StatusCode::BAD_REQUEST),
        ("bad_request", StatusCode::BAD_REQUEST),
        ("not_found", StatusCode::NOT_FOUND),
        ("unauthorized", StatusCode::UNAUTHORIZED),
        ("rate_limited", StatusCode::TOO_MANY_REQUESTS),
        ("upstream_auth", StatusCode::BAD_GATEWAY),
        ("upstream_rate_limited", StatusCode::SERVICE_UNAVAILABLE),
        ("upstream_error", StatusCode::BAD_GATEWAY),
        ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (code, status) in cases {
        let response = ApiError::new("req-1", code, "message").into_response();
        assert_eq!(response.status(), status, "code {code}");
    }
}

#[test]
fn synth_errors_map_to_upstream_codes() {
    let auth = SynthError::Model(ModelError::Auth {
        backend: "openai",
        message: "HTTP 401".to_string(),
    });
    assert_eq!(map_synth_error("r".into(), &auth).error.code, "upstream_auth");

    let limited = SynthError::Model(rate_limited());
    assert_eq!(
        map_synth_error("r".into(), &limited).error.code,
        "upstream_rate_limited"
    );

    let envelope = SynthError::Model(ModelError::Envelope {
        backend: "openai",
        message: "missing content".to_string(),
    });
    assert_eq!(
        map_synth_error("r".into(), &envelope).error.code,
        "upstream_error"
    );

    let invalid = SynthError::Validation {
        invalid: 1,
        total: 3,
    };
    assert_eq!(
        map_synth_error("r".into(), &invalid).error.code,
        "validation_error"
    );
}

#[test]
fn db_not_found_maps_to_not_found() {
    let err = map_db_error("r".into(), &prospector_db::DbError::NotFound);
    assert_eq!(err.error.code, "not_found");
}

#[tokio::test]
async fn companies_list_returns_catalog() {
    let response = app().oneshot(get("/api/v1/companies")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Werner Enterprises");
    assert_eq!(data[0]["fleetSize"], 8000);
    assert_eq!(data[0]["companyType"], "regional_carrier");
}

#[tokio::test]
async fn unknown_company_is_404_with_envelope() {
    let response = app()
        .oneshot(get("/api/v1/companies/99"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "not_found");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn analyze_requires_company_name() {
    let response = app()
        .oneshot(json_post("/api/v1/analyze", &serde_json::json!({ "companyName": "  " })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn analyze_catalogued_company_includes_score_card() {
    let response = app()
        .oneshot(json_post(
            "/api/v1/analyze",
            &serde_json::json!({ "companyName": "Werner Enterprises" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["analysis"]["profile"], "Omaha truckload carrier.");
    assert_eq!(data["analysis"]["decisionMakers"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["company"]["id"], 3);
    assert_eq!(data["scoreCard"]["fit"]["score"], 4);
    assert_eq!(data["scoreCard"]["alignment"]["score"], 4);
    assert_eq!(data["scoreCard"]["timeline"]["score"], 4);
    assert_eq!(data["scoreCard"]["overall"], 4.0);
    assert_eq!(data["roi"]["inputs"]["fleetSize"], 8000);
    assert_eq!(data["roi"]["implementationCost"], 400_000);
    assert_eq!(data["roi"]["totalSavings"], 38_734_000);
}

#[tokio::test]
async fn analyze_reply_without_profile_still_scores_pain_points() {
    let app = app_with(
        StaticModel(Ok(r#"{"painPoints": ["Driver communication gaps", "Dispatch coordination"], "techStack": "McLeod", "outreachAngle": "Automate check calls."}"#)),
        AuthState::disabled(),
        default_rate_limit_state(),
    );
    let response = app
        .oneshot(json_post(
            "/api/v1/analyze",
            &serde_json::json!({ "companyName": "Werner Enterprises" }),
        ))
        .await
        .expect("response");

    let json = body_json(response).await;
    assert_eq!(
        json["data"]["analysis"]["profile"],
        prospector_core::DEGRADED_PROFILE
    );
    assert_eq!(json["data"]["scoreCard"]["alignment"]["score"], 4);
}

#[tokio::test]
async fn analyze_unknown_company_has_no_score_card() {
    let response = app()
        .oneshot(json_post(
            "/api/v1/analyze",
            &serde_json::json!({ "companyName": "Tiny Hauling LLC" }),
        ))
        .await
        .expect("response");
    let json = body_json(response).await;
    assert!(json["data"]["company"].is_null());
    assert!(json["data"]["scoreCard"].is_null());
    assert!(json["data"]["roi"].is_null());
}

#[tokio::test]
async fn analyze_degrades_when_model_is_rate_limited() {
    let app = app_with(
        StaticModel(Err(rate_limited)),
        AuthState::disabled(),
        default_rate_limit_state(),
    );
    let response = app
        .oneshot(json_post(
            "/api/v1/analyze",
            &serde_json::json!({ "companyName": "Werner Enterprises" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"]["analysis"]["profile"],
        prospector_core::DEGRADED_PROFILE
    );
    assert_eq!(json["data"]["scoreCard"]["alignment"]["score"], 3);
}

#[tokio::test]
async fn batch_emails_require_ids() {
    let response = app()
        .oneshot(json_post(
            "/api/v1/emails/batch",
            &serde_json::json!({ "analysisIds": [] }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn save_analysis_validates_before_touching_database() {
    let response = app()
        .oneshot(json_post(
            "/api/v1/analyses",
            &serde_json::json!({ "companyName": "Werner", "analysisData": { "profile": 1 } }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_unavailable_database() {
    let response = app().oneshot(get("/api/v1/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "degraded");
}

#[tokio::test]
async fn protected_routes_require_bearer_token_when_enabled() {
    let auth = AuthState::from_keys("secret", false).expect("auth");
    let app = app_with(
        StaticModel(Ok(ANALYSIS_REPLY)),
        auth,
        default_rate_limit_state(),
    );

    let denied = app
        .clone()
        .oneshot(get("/api/v1/companies"))
        .await
        .expect("response");
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let allowed = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/companies")
                .header("authorization", "Bearer secret")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(allowed.status(), StatusCode::OK);
}

#[tokio::test]
async fn rate_limit_rejects_requests_over_the_window() {
    let app = app_with(
        StaticModel(Ok(ANALYSIS_REPLY)),
        AuthState::disabled(),
        RateLimitState::new(1, Duration::from_secs(60)),
    );

    let first = app
        .clone()
        .oneshot(get("/api/v1/companies"))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(get("/api/v1/companies"))
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}
