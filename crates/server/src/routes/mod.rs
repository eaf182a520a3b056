pub mod health;
mod medical_card;
pub mod metrics;

use axum::{
    Router,
    routing::{get, post},
};

use crate::issuance::CardService;

/// Build the medical card API routes
pub fn api_routes() -> Router<CardService> {
    Router::new()
        .route("/generate-medical-card", post(medical_card::generate))
        .route("/medical-card/{id}", get(medical_card::read))
}
