//! End-to-end tests against the full router, with the rate store absent so
//! every table resolves from the built-in fallbacks.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use saniquote_backend::app::{create_app, AppState};
use saniquote_backend::config::{Environment, Settings};
use saniquote_backend::services::RatesClient;

// Port 1 is never listening; fetches fail fast and fall back.
const DEAD_STORE: &str = "http://127.0.0.1:1";

fn test_app() -> Router {
    let settings = Settings {
        env: Environment::Dev,
        server_addr: "127.0.0.1:0".to_string(),
        cors_allow_origins: vec!["http://localhost:3000".to_string()],
        rates_store_url: DEAD_STORE.to_string(),
        rates_store_timeout_seconds: 1,
        rates_cache_ttl_seconds: 3600,
    };
    let rates = RatesClient::preloaded(DEAD_STORE, 3600).expect("client");
    create_app(AppState::new(settings, rates))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_degraded_when_rate_store_is_down() {
    let (status, body) = get(test_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["rate_store"], "error");
}

#[tokio::test]
async fn responses_carry_a_request_id_header() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn rates_endpoint_serves_fallback_tables() {
    let (status, body) = get(test_app(), "/rates/sani_clean").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "sani_clean");
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["table"]["minimum_per_visit"], "50.00");
}

#[tokio::test]
async fn unknown_service_rates_return_404() {
    let (status, body) = get(test_app(), "/rates/window_tinting").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn pricing_a_weekly_sani_clean_agreement() {
    let (status, body) = post_json(
        test_app(),
        "/quotes/price",
        json!({
            "agreement": {
                "contract_months": 12,
                "sani_clean": { "fixtures": "20", "frequency": "weekly" }
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let service = &body["quote"]["services"][0];
    assert_eq!(service["service"], "sani_clean");
    assert_eq!(service["is_active"], true);
    assert_eq!(service["per_visit"], "100.00"); // 20 x $5.00 inside rate
    assert_eq!(service["monthly_recurring"], "433.00"); // 100 x 4.33

    let aggregate = &body["quote"]["aggregate"];
    assert_eq!(aggregate["total_agreement_amount"], "5196.00");
    assert_eq!(aggregate["classification"], "green"); // 100 vs 50 x 1.30
    assert!(body["session"].is_string());
}

#[tokio::test]
async fn explicit_override_is_recorded_and_flagged() {
    let (status, body) = post_json(
        test_app(),
        "/quotes/price",
        json!({
            "agreement": {
                "contract_months": 12,
                "sani_clean": {
                    "fixtures": 20,
                    "frequency": "weekly",
                    "custom_per_visit": 120
                }
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let service = &body["quote"]["services"][0];
    assert_eq!(service["per_visit"], "120.00");
    assert_eq!(service["fields"]["per_visit"]["is_custom"], true);

    let changes = body["changes"].as_array().unwrap();
    assert!(changes
        .iter()
        .any(|c| c["service"] == "sani_clean" && c["field"] == "per_visit"));
}

#[tokio::test]
async fn profitability_gate_flags_a_floor_price_red() {
    // Five fixtures raw to $25, floored to the $50 minimum; charged == floor.
    let (status, body) = post_json(
        test_app(),
        "/quotes/price",
        json!({
            "agreement": {
                "contract_months": 12,
                "sani_clean": { "fixtures": 5, "frequency": "weekly" }
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["aggregate"]["classification"], "red");
}

#[tokio::test]
async fn legacy_document_loads_into_the_canonical_form() {
    let (status, body) = post_json(
        test_app(),
        "/quotes/load",
        json!({
            "contractMonths": 24,
            "tripCharge": { "amount": "15", "frequency": "weekly" },
            "services": {
                "sani_clean": { "fixtures": "3|5.50", "allInclusive": true },
                "janitorial": { "hours": { "value": "2.5" }, "workers": { "value": 2 } }
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let form = &body["data"];
    assert_eq!(form["contract_months"], 24);
    assert_eq!(form["trip_charge"]["amount"], "15");
    assert_eq!(form["trip_charge"]["frequency"], "weekly");
    assert_eq!(form["sani_clean"]["fixtures"], "3");
    assert_eq!(form["sani_clean"]["fixture_rate"], "5.50");
    assert_eq!(form["sani_clean"]["all_inclusive"], true);
    assert_eq!(form["janitorial"]["hours"], "2.5");
}

#[tokio::test]
async fn loaded_document_round_trips_through_pricing() {
    let legacy = json!({
        "contractMonths": 12,
        "services": {
            "sani_clean": { "fixtures": { "value": "20" }, "frequency": "1x per week" }
        }
    });
    let (status, loaded) = post_json(test_app(), "/quotes/load", legacy).await;
    assert_eq!(status, StatusCode::OK);

    let (status, priced) = post_json(
        test_app(),
        "/quotes/price",
        json!({ "agreement": loaded["data"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(priced["quote"]["services"][0]["per_visit"], "100.00");
}

#[tokio::test]
async fn non_object_document_is_rejected() {
    let (status, body) = post_json(test_app(), "/quotes/load", json!([1, 2, 3])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn refresh_pricing_still_prices_when_the_store_is_down() {
    let (status, body) = post_json(
        test_app(),
        "/quotes/refresh-pricing",
        json!({
            "agreement": {
                "contract_months": 12,
                "sani_clean": { "fixtures": 20, "frequency": "weekly" }
            }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["services"][0]["per_visit"], "100.00");
    assert_eq!(body["rate_sources"]["sani_clean"], "fallback");
}
