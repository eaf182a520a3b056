//! Prometheus metrics endpoint

use axum::{Extension, extract::State, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::issuance::CardService;

/// GET /metrics - Refresh the stored-records gauge, then render all
/// collected metrics in Prometheus text format
pub async fn render(
    State(service): State<CardService>,
    Extension(handle): Extension<PrometheusHandle>,
) -> impl IntoResponse {
    match service.store().len().await {
        Ok(count) => metrics::gauge!("medical_records_stored").set(count as f64),
        Err(e) => tracing::warn!(error = %e, "Could not count stored records"),
    }

    handle.render()
}
