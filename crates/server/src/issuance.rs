//! Medical card issuance and retrieval

use medcard_core::{CardError, MedicalRecord, RecordId, generate_record};
use std::sync::Arc;

use crate::qr;
use crate::store::RecordStore;

/// Result of issuing a card
#[derive(Debug, Clone)]
pub struct IssuedCard {
    pub id: RecordId,
    pub qr_url: String,
    /// PNG data URL of the code encoding `qr_url`
    pub qr_code: String,
}

/// Issues cards into a record store and reads them back
#[derive(Clone)]
pub struct CardService {
    store: Arc<dyn RecordStore>,
    client_url: String,
}

impl CardService {
    pub fn new(store: Arc<dyn RecordStore>, client_url: impl Into<String>) -> Self {
        Self {
            store,
            client_url: client_url.into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Share URL for `id`: `{client_url}/medical/{id}`
    pub fn share_url(&self, id: &RecordId) -> String {
        format!("{}/medical/{}", self.client_url.trim_end_matches('/'), id)
    }

    /// Create a record under a fresh identifier and render its code.
    ///
    /// The code is rendered before the record is stored, so a failed render
    /// leaves the store untouched.
    pub async fn issue(&self) -> Result<IssuedCard, CardError> {
        let id = RecordId::new();
        let qr_url = self.share_url(&id);
        let qr_code = qr::to_data_url(&qr_url)?;

        self.store.put(id, generate_record()).await?;
        tracing::info!(record_id = %id, qr_url = %qr_url, "Medical card issued");

        Ok(IssuedCard {
            id,
            qr_url,
            qr_code,
        })
    }

    /// Look up a record. Identifiers that do not parse are simply not found.
    pub async fn retrieve(&self, raw_id: &str) -> Result<MedicalRecord, CardError> {
        let id: RecordId = raw_id
            .parse()
            .map_err(|_| CardError::NotFound(raw_id.to_string()))?;

        self.store
            .get(&id)
            .await?
            .ok_or_else(|| CardError::NotFound(raw_id.to_string()))
    }
}
