//! Medical record document model.
//!
//! The record is a fixed-shape nested document. Field names follow the JSON
//! wire format (camelCase) so a record round-trips through the API unchanged.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format of `VitalReading::date` joined with `VitalReading::time`
pub const READING_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Declares a string-backed enum that keeps unknown values in `Other`.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(s) => s,
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $($text => Self::$variant,)+
                    _ => Self::Other(s),
                }
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                match v {
                    $name::Other(s) => s,
                    other => other.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Kind of a medical history event
    HistoryEventKind {
        Surgery => "surgery",
        Diagnosis => "diagnosis",
        Treatment => "treatment",
        Vaccination => "vaccination",
    }
}

string_enum! {
    /// Lab result status
    LabStatus {
        Normal => "normal",
        Abnormal => "abnormal",
    }
}

string_enum! {
    /// Severity shared by conditions and allergies
    Severity {
        Mild => "mild",
        Moderate => "moderate",
        Severe => "severe",
    }
}

/// Full medical record returned to a viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub patient_name: String,
    pub date_of_birth: String,
    pub blood_type: String,
    pub contact: ContactInfo,
    pub conditions: Vec<Condition>,
    pub medications: Vec<Medication>,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub medical_history: Vec<HistoryEvent>,
    pub vital_readings: Vec<VitalReading>,
    pub appointments: Vec<Appointment>,
    pub prescriptions: Vec<Prescription>,
    pub insurance: Insurance,
    pub allergies: Vec<Allergy>,
    pub immunizations: Vec<Immunization>,
    pub lab_results: Vec<LabResult>,
    pub family_history: Vec<FamilyHistoryEntry>,
    pub lifestyle: Lifestyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Address {
    /// Single-line postal form, e.g. "742 Maple Avenue, Springfield, IL 62701"
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.zip_code
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub name: String,
    pub diagnosed_date: String,
    pub severity: Severity,
    pub status: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub purpose: String,
    pub start_date: String,
    pub end_date: String,
    pub side_effects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub is_primary_contact: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: HistoryEventKind,
    pub title: String,
    pub description: String,
    pub doctor: String,
    pub facility: String,
    pub outcome: String,
    pub follow_up: String,
}

/// Whole-valued measurements go on the wire as integers (`68`, not `68.0`)
mod measurement {
    use serde::Serializer;

    // Largest magnitude below which every integer is exact in an f64
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() < EXACT_INT_LIMIT {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }
}

/// One vitals measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalReading {
    pub date: String,
    pub time: String,
    pub blood_pressure: BloodPressure,
    pub heart_rate: u32,
    #[serde(serialize_with = "measurement::serialize")]
    pub temperature: f64,
    pub respiratory_rate: u32,
    pub blood_sugar: BloodSugar,
    #[serde(serialize_with = "measurement::serialize")]
    pub weight: f64,
    #[serde(serialize_with = "measurement::serialize")]
    pub height: f64,
    #[serde(serialize_with = "measurement::serialize")]
    pub bmi: f64,
    pub oxygen_saturation: u32,
}

impl VitalReading {
    /// Local timestamp of the reading, `None` if date or time is malformed
    pub fn taken_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(
            &format!("{} {}", self.date, self.time),
            READING_TIME_FORMAT,
        )
        .ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodSugar {
    pub value: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub date: String,
    pub time: String,
    pub doctor: String,
    pub specialty: String,
    pub department: String,
    pub location: String,
    pub purpose: String,
    pub notes: String,
    pub preparation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub medication: String,
    pub generic_name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: String,
    pub end_date: String,
    pub prescribed_by: String,
    pub pharmacy: Pharmacy,
    pub refills_remaining: u32,
    pub instructions: String,
    pub side_effects: Vec<String>,
    pub interactions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    pub name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub provider: String,
    pub policy_number: String,
    pub group_number: String,
    #[serde(rename = "type")]
    pub plan_type: String,
    pub coverage_start: String,
    pub coverage_end: String,
    pub primary_holder: String,
    pub relationship: String,
    pub copay: Copay,
    pub deductible: Deductible,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Copay {
    pub primary_care: u32,
    pub specialist: u32,
    pub emergency: u32,
    pub prescription: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deductible {
    pub individual: u32,
    pub family: u32,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allergy {
    pub allergen: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub reaction: String,
    pub diagnosed_date: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Immunization {
    pub name: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub dose_number: u32,
    pub total_doses: u32,
    pub manufacturer: String,
    pub lot_number: String,
    pub administered_by: String,
    pub location: String,
    pub next_due_date: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    pub date: String,
    pub time: String,
    pub category: String,
    #[serde(rename = "type")]
    pub test: String,
    pub result: String,
    pub unit: String,
    pub normal_range: String,
    pub status: LabStatus,
    pub ordered_by: String,
    pub performed_by: String,
    pub facility: String,
    pub notes: String,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyHistoryEntry {
    pub relationship: String,
    pub condition: String,
    pub diagnosed_age: u32,
    pub status: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifestyle {
    pub smoking: Smoking,
    pub alcohol: Alcohol,
    pub exercise: Exercise,
    pub diet: Diet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Smoking {
    pub status: String,
    pub frequency: String,
    pub quit_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alcohol {
    pub status: String,
    pub frequency: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub frequency: String,
    #[serde(rename = "type")]
    pub kinds: Vec<String>,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diet {
    #[serde(rename = "type")]
    pub kind: String,
    pub restrictions: Vec<String>,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_event_kind_round_trips() {
        let kind: HistoryEventKind = serde_json::from_str("\"consultation\"").unwrap();
        assert_eq!(kind, HistoryEventKind::Other("consultation".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"consultation\"");

        let known: HistoryEventKind = serde_json::from_str("\"surgery\"").unwrap();
        assert_eq!(known, HistoryEventKind::Surgery);
    }

    #[test]
    fn reading_timestamp() {
        let mut reading = crate::sample::generate_record().vital_readings[0].clone();
        let at = reading.taken_at().expect("sample reading should parse");
        assert_eq!(at.format("%Y-%m-%d %H:%M").to_string(), "2024-03-15 09:30");

        reading.time = "half past nine".to_string();
        assert!(reading.taken_at().is_none());
    }

    #[test]
    fn whole_measurements_serialize_as_integers() {
        let mut reading = crate::sample::generate_record().vital_readings[0].clone();
        let text = serde_json::to_string(&reading).unwrap();
        assert!(text.contains("\"weight\":68,"), "{}", text);
        assert!(text.contains("\"height\":165,"), "{}", text);
        assert!(text.contains("\"bmi\":25,"), "{}", text);
        assert!(text.contains("\"temperature\":36.8,"), "{}", text);

        reading.weight = 68.5;
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["weight"], 68.5);

        let back: VitalReading = serde_json::from_str(&text).unwrap();
        assert_eq!(back.weight, 68.0);
    }

    #[test]
    fn nullable_quit_date_serializes_as_null() {
        let record = crate::sample::generate_record();
        let json = serde_json::to_value(&record.lifestyle).unwrap();
        assert!(json["smoking"]["quitDate"].is_null());
        assert_eq!(json["exercise"]["type"][0], "Walking");
    }
}
