//! HTTP client for the medical card API

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use medcard_core::{ErrorBody, MedicalRecord};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::ViewerError;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Response of `POST /api/generate-medical-card`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    /// Shareable viewer link encoded in the code image
    pub qr_url: String,
    /// PNG data URL of the code image
    pub qr_code: String,
}

impl IssueResponse {
    pub fn record_id(&self) -> &str {
        record_id_from_link(&self.qr_url)
    }
}

/// Client for the issuance and retrieval endpoints
#[derive(Clone)]
pub struct CardClient {
    http: reqwest::Client,
    base_url: String,
}

impl CardClient {
    /// Create a client for the API rooted at `base_url`, e.g. `http://localhost:3000`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a new card
    pub async fn issue(&self) -> Result<IssueResponse, ViewerError> {
        let url = format!("{}/api/generate-medical-card", self.base_url);
        tracing::debug!(url = %url, "Issuing medical card");

        let response = self.http.post(&url).send().await?;
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response.json::<IssueResponse>().await?)
    }

    /// Fetch the record behind `id`
    pub async fn fetch(&self, id: &str) -> Result<MedicalRecord, ViewerError> {
        let url = format!("{}/api/medical-card/{}", self.base_url, id);
        tracing::debug!(url = %url, "Fetching medical record");

        let response = self.http.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(ViewerError::NotFound(id.to_string())),
            status if status.is_success() => Ok(response.json::<MedicalRecord>().await?),
            _ => Err(error_from_response(response).await),
        }
    }
}

async fn error_from_response(response: reqwest::Response) -> ViewerError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(err) => err.error,
        Err(_) => body,
    };
    ViewerError::Server {
        status: status.as_u16(),
        message,
    }
}

/// Record id from a shared viewer link (`.../medical/<id>`).
///
/// Query string, fragment and trailing slashes are ignored; input without
/// any `/` is taken to be the id itself.
pub fn record_id_from_link(link: &str) -> &str {
    let link = link.trim();
    let end = link.find(['?', '#']).unwrap_or(link.len());
    let path = link[..end].trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}

/// Decode a `data:image/png;base64,` URL into PNG bytes
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, ViewerError> {
    let payload = data_url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| ViewerError::InvalidDataUrl("expected a base64 PNG data URL".into()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| ViewerError::InvalidDataUrl(e.to_string()))
}
