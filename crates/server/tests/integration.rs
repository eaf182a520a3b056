//! Integration tests for the medical card server.
//!
//! The store is in memory, so each test builds a fresh router and drives it
//! through `tower::ServiceExt::oneshot` without binding a port.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

use medcard_core::{CardError, MedicalRecord, RecordId, generate_record};
use medcard_server::config::Config;
use medcard_server::store::{InMemoryStore, RecordStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const CLIENT_URL: &str = "http://cards.test";

/// Build the app router with test configuration.
fn test_app() -> Router {
    test_app_with_rps(1000)
}

fn test_app_with_rps(rate_limit_rps: u32) -> Router {
    let config = Config {
        client_url: CLIENT_URL.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        rate_limit_rps,
    };
    medcard_server::build_app(Arc::new(InMemoryStore::new()), &config)
}

/// Send a request to the app and return (status, body as JSON).
async fn request(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let response = app.clone().oneshot(req).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };

    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper: issue a card and return (qrUrl, qrCode).
async fn issue(app: &Router) -> (String, String) {
    let (status, body) = request(app, post("/api/generate-medical-card")).await;
    assert_eq!(status, StatusCode::OK);

    (
        body["qrUrl"].as_str().expect("missing qrUrl").to_string(),
        body["qrCode"].as_str().expect("missing qrCode").to_string(),
    )
}

fn id_from_url(url: &str) -> String {
    url.rsplit('/').next().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let app = test_app();

    let (status, body) = request(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["records"], 0);

    issue(&app).await;
    let (_, body) = request(&app, get("/health")).await;
    assert_eq!(body["records"], 1);
}

#[tokio::test]
async fn test_issue_then_retrieve() {
    let app = test_app();

    let (qr_url, qr_code) = issue(&app).await;
    assert!(qr_url.starts_with(&format!("{}/medical/", CLIENT_URL)));
    assert!(qr_code.starts_with("data:image/png;base64,"));

    let id = id_from_url(&qr_url);
    let (status, body) = request(&app, get(&format!("/api/medical-card/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patientName"], "Sarah Elizabeth Anderson");

    let record: MedicalRecord = serde_json::from_value(body).unwrap();
    assert_eq!(record, generate_record());
}

#[tokio::test]
async fn test_not_found() {
    let app = test_app();

    let (status, body) = request(&app, get("/api/medical-card/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        serde_json::json!({ "error": "Medical record not found" })
    );

    // Well-formed but never issued
    let (status, _) = request(
        &app,
        get("/api/medical-card/6f1c2b1e-3a4d-4f5e-8a9b-0c1d2e3f4a5b"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_issued_ids_are_unique() {
    let app = test_app();
    let mut ids = HashSet::new();

    for _ in 0..20 {
        let (qr_url, _) = issue(&app).await;
        assert!(ids.insert(id_from_url(&qr_url)));
    }

    let (_, body) = request(&app, get("/health")).await;
    assert_eq!(body["records"], 20);
}

#[tokio::test]
async fn test_records_not_shared_between_apps() {
    let first = test_app();
    let second = test_app();

    let (qr_url, _) = issue(&first).await;
    let (status, _) = request(
        &second,
        get(&format!("/api/medical-card/{}", id_from_url(&qr_url))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let app = test_app();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .header("X-Request-ID", "trace-me")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.headers()["X-Request-ID"], "trace-me");

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert!(response.headers().contains_key("X-Request-ID"));
}

#[tokio::test]
async fn test_rate_limit() {
    let app = test_app_with_rps(1);

    let (status, _) = request(&app, post("/api/generate-medical-card")).await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post("/api/generate-medical-card"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().contains("Rate limit"));

    // Public routes are not limited
    let (status, _) = request(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = test_app();
    issue(&app).await;

    let response = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("medical_cards_issued_total"), "{}", text);
    assert!(text.contains("medical_records_stored"), "{}", text);
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

/// Store whose every operation fails
struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    async fn put(&self, _id: RecordId, _record: MedicalRecord) -> Result<(), CardError> {
        Err(CardError::Storage("disk".to_string()))
    }

    async fn get(&self, _id: &RecordId) -> Result<Option<MedicalRecord>, CardError> {
        Err(CardError::Storage("disk".to_string()))
    }

    async fn len(&self) -> Result<usize, CardError> {
        Err(CardError::Storage("disk".to_string()))
    }
}

fn failing_app() -> Router {
    let config = Config {
        client_url: CLIENT_URL.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        rate_limit_rps: 1000,
    };
    medcard_server::build_app(Arc::new(FailingStore), &config)
}

#[tokio::test]
async fn test_issue_store_failure() {
    let app = failing_app();

    let (status, body) = request(&app, post("/api/generate-medical-card")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({ "error": "Failed to generate medical card" })
    );
}

#[tokio::test]
async fn test_retrieve_store_failure() {
    let app = failing_app();

    let (status, body) = request(
        &app,
        get(&format!("/api/medical-card/{}", RecordId::new())),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({ "error": "Failed to retrieve medical card" })
    );

    // Unparsable ids never reach the store
    let (status, _) = request(&app, get("/api/medical-card/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_store_failure() {
    let app = failing_app();

    let (status, body) = request(&app, get("/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        serde_json::json!({
            "status": "unhealthy",
            "reason": "Record store unavailable: Storage error: disk"
        })
    );
}

#[tokio::test]
async fn test_request_id_on_issuance() {
    let app = test_app();

    let req = Request::builder()
        .method("POST")
        .uri("/api/generate-medical-card")
        .header("X-Request-ID", "issue-1")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["X-Request-ID"], "issue-1");

    // Unknown routes still fall through every layer
    let (status, _) = request(&app, post("/api/no-such-route")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
