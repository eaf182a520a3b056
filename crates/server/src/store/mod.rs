//! Record storage

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use medcard_core::{CardError, MedicalRecord, RecordId};

/// Storage for issued records, keyed by identifier.
///
/// Records are write-once: `put` on an existing identifier fails with
/// `CardError::Duplicate` and nothing removes a record once stored.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Store a new record
    async fn put(&self, id: RecordId, record: MedicalRecord) -> Result<(), CardError>;

    /// Get a record by identifier
    async fn get(&self, id: &RecordId) -> Result<Option<MedicalRecord>, CardError>;

    /// Number of stored records
    async fn len(&self) -> Result<usize, CardError>;
}
