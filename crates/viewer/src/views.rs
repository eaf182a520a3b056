//! View models for the non-vitals tabs.
//!
//! Each builder is a pure function of its slice of the record and borrows
//! from it; `render` turns the results into text.

use chrono::NaiveDate;
use medcard_core::{
    Appointment, HistoryEventKind, Insurance, LabStatus, MedicalRecord, Severity,
};

pub const NO_LAB_RESULTS: &str = "No lab results available";
pub const NO_ALLERGIES: &str = "No known allergies";
pub const NO_IMMUNIZATIONS: &str = "No immunization records found";
pub const NO_CONTACTS: &str = "No emergency contacts on file";

/// US-style short date ("3/15/2024"); unparsable input is returned as is
pub fn display_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub struct Overview<'a> {
    pub patient_name: &'a str,
    pub date_of_birth: String,
    pub blood_type: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub address: String,
    pub conditions: Vec<ConditionCard<'a>>,
    pub medications: Vec<MedicationCard<'a>>,
    /// Chronological
    pub appointments: Vec<&'a Appointment>,
    pub insurance: &'a Insurance,
}

pub struct ConditionCard<'a> {
    pub name: &'a str,
    pub diagnosed: String,
    pub severity: &'a Severity,
    pub status: &'a str,
    pub notes: &'a str,
}

pub struct MedicationCard<'a> {
    pub name: &'a str,
    pub dosage: &'a str,
    pub frequency: &'a str,
    pub purpose: &'a str,
    pub side_effects: String,
}

pub fn overview(record: &MedicalRecord) -> Overview<'_> {
    let mut appointments: Vec<&Appointment> = record.appointments.iter().collect();
    appointments.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));

    Overview {
        patient_name: &record.patient_name,
        date_of_birth: display_date(&record.date_of_birth),
        blood_type: &record.blood_type,
        phone: &record.contact.phone,
        email: &record.contact.email,
        address: record.contact.address.one_line(),
        conditions: record
            .conditions
            .iter()
            .map(|c| ConditionCard {
                name: &c.name,
                diagnosed: display_date(&c.diagnosed_date),
                severity: &c.severity,
                status: &c.status,
                notes: &c.notes,
            })
            .collect(),
        medications: record
            .medications
            .iter()
            .map(|m| MedicationCard {
                name: &m.name,
                dosage: &m.dosage,
                frequency: &m.frequency,
                purpose: &m.purpose,
                side_effects: m.side_effects.join(", "),
            })
            .collect(),
        appointments,
        insurance: &record.insurance,
    }
}

// ---------------------------------------------------------------------------
// Lab results
// ---------------------------------------------------------------------------

pub struct LabCard<'a> {
    pub test: &'a str,
    pub date: String,
    /// Result value with its unit
    pub result: String,
    pub normal_range: &'a str,
    pub status: &'a LabStatus,
    pub notes: Option<&'a str>,
}

impl LabCard<'_> {
    pub fn is_normal(&self) -> bool {
        *self.status == LabStatus::Normal
    }
}

pub fn labs(record: &MedicalRecord) -> Vec<LabCard<'_>> {
    record
        .lab_results
        .iter()
        .map(|lab| LabCard {
            test: &lab.test,
            date: display_date(&lab.date),
            result: if lab.unit.is_empty() {
                lab.result.clone()
            } else {
                format!("{} {}", lab.result, lab.unit)
            },
            normal_range: &lab.normal_range,
            status: &lab.status,
            notes: non_empty(&lab.notes),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// History timeline
// ---------------------------------------------------------------------------

pub struct TimelineEntry<'a> {
    pub date: &'a str,
    pub kind: HistoryEventKind,
    pub title: &'a str,
    pub description: &'a str,
    pub doctor: Option<&'a str>,
    pub facility: Option<&'a str>,
    pub outcome: Option<&'a str>,
    pub follow_up: Option<&'a str>,
}

impl TimelineEntry<'_> {
    pub fn marker(&self) -> &'static str {
        match self.kind {
            HistoryEventKind::Surgery => "🏥",
            HistoryEventKind::Diagnosis => "🔍",
            HistoryEventKind::Treatment => "💊",
            HistoryEventKind::Vaccination => "💉",
            HistoryEventKind::Other(_) => "📋",
        }
    }
}

/// History events plus one diagnosis entry per condition, newest first
pub fn timeline(record: &MedicalRecord) -> Vec<TimelineEntry<'_>> {
    let events = record.medical_history.iter().map(|e| TimelineEntry {
        date: &e.date,
        kind: e.kind.clone(),
        title: &e.title,
        description: &e.description,
        doctor: non_empty(&e.doctor),
        facility: non_empty(&e.facility),
        outcome: non_empty(&e.outcome),
        follow_up: non_empty(&e.follow_up),
    });
    let diagnoses = record.conditions.iter().map(|c| TimelineEntry {
        date: &c.diagnosed_date,
        kind: HistoryEventKind::Diagnosis,
        title: &c.name,
        description: &c.notes,
        doctor: None,
        facility: None,
        outcome: None,
        follow_up: None,
    });

    let mut entries: Vec<TimelineEntry<'_>> = events.chain(diagnoses).collect();
    // ISO dates order lexically
    entries.sort_by(|a, b| b.date.cmp(a.date));
    entries
}

// ---------------------------------------------------------------------------
// Allergies
// ---------------------------------------------------------------------------

pub struct AllergyChip<'a> {
    pub allergen: &'a str,
    pub kind: &'a str,
    pub severity: &'a Severity,
    pub reaction: &'a str,
}

fn severity_rank(severity: &Severity) -> u8 {
    match severity {
        Severity::Severe => 0,
        Severity::Moderate => 1,
        Severity::Mild => 2,
        Severity::Other(_) => 3,
    }
}

/// Allergies, most severe first
pub fn allergies(record: &MedicalRecord) -> Vec<AllergyChip<'_>> {
    let mut chips: Vec<AllergyChip<'_>> = record
        .allergies
        .iter()
        .map(|a| AllergyChip {
            allergen: &a.allergen,
            kind: &a.kind,
            severity: &a.severity,
            reaction: &a.reaction,
        })
        .collect();
    chips.sort_by_key(|c| severity_rank(c.severity));
    chips
}

// ---------------------------------------------------------------------------
// Immunizations
// ---------------------------------------------------------------------------

pub struct ImmunizationCard<'a> {
    pub name: &'a str,
    pub date_received: String,
    pub next_due: String,
    pub provider: &'a str,
    /// "dose of total"
    pub dose: String,
}

pub fn immunizations(record: &MedicalRecord) -> Vec<ImmunizationCard<'_>> {
    record
        .immunizations
        .iter()
        .map(|i| ImmunizationCard {
            name: &i.name,
            date_received: display_date(&i.date),
            next_due: display_date(&i.next_due_date),
            provider: &i.administered_by,
            dose: format!("{} of {}", i.dose_number, i.total_doses),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Emergency contacts
// ---------------------------------------------------------------------------

pub struct ContactCard<'a> {
    pub name: &'a str,
    pub relationship: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub primary: bool,
}

impl ContactCard<'_> {
    pub fn tel_link(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{}", digits)
    }

    pub fn mailto_link(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

/// Emergency contacts, primary contact first
pub fn contacts(record: &MedicalRecord) -> Vec<ContactCard<'_>> {
    let mut cards: Vec<ContactCard<'_>> = record
        .emergency_contacts
        .iter()
        .map(|c| ContactCard {
            name: &c.name,
            relationship: &c.relationship,
            phone: &c.phone,
            email: &c.email,
            primary: c.is_primary_contact,
        })
        .collect();
    cards.sort_by_key(|c| !c.primary);
    cards
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}
