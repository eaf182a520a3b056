//! Application error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use medcard_core::{CardError, ErrorBody};

pub const NOT_FOUND_MESSAGE: &str = "Medical record not found";
pub const ISSUE_FAILED_MESSAGE: &str = "Failed to generate medical card";
pub const RETRIEVE_FAILED_MESSAGE: &str = "Failed to retrieve medical card";

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Identifier absent from the store
    NotFound,
    /// Anything else; the message is the public body, the detail is only logged
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl AppError {
    /// Map a store or issuance error, using `message` as the public body for
    /// everything that is not a missing record.
    pub fn from_card(err: CardError, message: &'static str) -> Self {
        match err {
            CardError::NotFound(_) => AppError::NotFound,
            other => AppError::Internal {
                message,
                detail: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, ErrorBody::new(NOT_FOUND_MESSAGE)),
            AppError::Internal { message, detail } => {
                tracing::error!(error = %detail, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(message))
            }
        };

        (status, Json(body)).into_response()
    }
}
