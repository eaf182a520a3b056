//! medcard-core: Shared medical card types
//!
//! This crate provides the types used by both the server and the viewer:
//! the medical record document, record identifiers, the sample record
//! generator and the error types.

pub mod error;
pub mod id;
pub mod record;
pub mod sample;

pub use error::{CardError, ErrorBody};
pub use id::RecordId;
pub use record::{
    Allergy, Appointment, Condition, EmergencyContact, HistoryEvent, HistoryEventKind,
    Immunization, Insurance, LabResult, LabStatus, MedicalRecord, Medication, Severity,
    VitalReading,
};
pub use sample::generate_record;
