//! Health check endpoint

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::issuance::CardService;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// GET /health - Check the record store and return server health status
pub async fn check(State(service): State<CardService>) -> impl IntoResponse {
    match service.store().len().await {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                records: Some(count),
                reason: None,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check store error");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    records: None,
                    reason: Some(format!("Record store unavailable: {}", e)),
                }),
            )
        }
    }
}
