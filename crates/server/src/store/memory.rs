use async_trait::async_trait;
use medcard_core::{CardError, MedicalRecord, RecordId};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::RecordStore;

/// Process-memory store. Records live until the process exits.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<RecordId, MedicalRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn put(&self, id: RecordId, record: MedicalRecord) -> Result<(), CardError> {
        let mut records = self.records.write().await;
        if records.contains_key(&id) {
            return Err(CardError::Duplicate(id.to_string()));
        }
        records.insert(id, record);
        Ok(())
    }

    async fn get(&self, id: &RecordId) -> Result<Option<MedicalRecord>, CardError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn len(&self) -> Result<usize, CardError> {
        Ok(self.records.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcard_core::generate_record;

    #[tokio::test]
    async fn put_then_get() {
        let store = InMemoryStore::new();
        let id = RecordId::new();

        store.put(id, generate_record()).await.unwrap();

        assert_eq!(store.get(&id).await.unwrap(), Some(generate_record()));
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_id_is_none() {
        let store = InMemoryStore::new();
        store.put(RecordId::new(), generate_record()).await.unwrap();

        assert_eq!(store.get(&RecordId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn records_are_write_once() {
        let store = InMemoryStore::new();
        let id = RecordId::new();
        store.put(id, generate_record()).await.unwrap();

        let mut changed = generate_record();
        changed.patient_name = "Someone Else".into();
        let err = store.put(id, changed).await.unwrap_err();

        assert!(matches!(err, CardError::Duplicate(_)));
        let stored = store.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.patient_name, "Sarah Elizabeth Anderson");
    }
}
