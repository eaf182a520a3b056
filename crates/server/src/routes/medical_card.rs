//! Medical card HTTP handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;

use crate::error::{AppError, ISSUE_FAILED_MESSAGE, RETRIEVE_FAILED_MESSAGE};
use crate::issuance::CardService;

/// Response body for card issuance
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    qr_url: String,
    qr_code: String,
}

/// POST /api/generate-medical-card - Issue a new card and its QR code
pub async fn generate(State(service): State<CardService>) -> Result<impl IntoResponse, AppError> {
    let card = service
        .issue()
        .await
        .map_err(|e| AppError::from_card(e, ISSUE_FAILED_MESSAGE))?;

    metrics::counter!("medical_cards_issued_total").increment(1);

    Ok(Json(GenerateResponse {
        qr_url: card.qr_url,
        qr_code: card.qr_code,
    }))
}

/// GET /api/medical-card/{id} - Read an issued record
pub async fn read(
    State(service): State<CardService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = service
        .retrieve(&id)
        .await
        .map_err(|e| AppError::from_card(e, RETRIEVE_FAILED_MESSAGE))?;

    tracing::debug!(record_id = %id, "Medical record served");
    Ok(Json(record))
}
