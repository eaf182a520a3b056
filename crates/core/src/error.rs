use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record store and issuance errors
#[derive(Debug, Error)]
pub enum CardError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record already exists: {0}")]
    Duplicate(String),

    #[error("Code image rendering failed: {0}")]
    Render(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// JSON error body, `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
