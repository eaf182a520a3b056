//! Audit trail for mutations
//!
//! Card issuance is the only mutation the API exposes; every POST is logged
//! under the `audit` target together with its outcome.

use axum::{body::Body, extract::Request, http::Method, middleware::Next, response::Response};

use super::request_id::RequestId;

pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    if request.method() != Method::POST {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let response = next.run(request).await;
    let status = response.status();

    if status.is_success() {
        tracing::info!(
            target: "audit",
            request_id = %request_id,
            path = %path,
            status = status.as_u16(),
            "Mutation accepted"
        );
    } else {
        tracing::warn!(
            target: "audit",
            request_id = %request_id,
            path = %path,
            status = status.as_u16(),
            "Mutation rejected"
        );
    }

    response
}
