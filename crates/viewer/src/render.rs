//! Plain-text rendering of viewer tabs

use chrono::NaiveDateTime;
use medcard_core::MedicalRecord;
use std::fmt::{self, Write};

use crate::tab::Tab;
use crate::views::{self, NO_ALLERGIES, NO_CONTACTS, NO_IMMUNIZATIONS, NO_LAB_RESULTS};
use crate::vitals::{Flagged, SortField, TimeRange, VitalsQuery, VitalsView};

/// One rendered screen: record header, tab bar and the active tab
pub struct Page<'a> {
    pub record: &'a MedicalRecord,
    pub tab: Tab,
    pub vitals: VitalsQuery,
    /// Reference time for the vitals window
    pub now: NaiveDateTime,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;
        writeln!(f, "{}", record.patient_name)?;
        writeln!(
            f,
            "DOB: {}  Blood Type: {}  {}  {}",
            views::display_date(&record.date_of_birth),
            record.blood_type,
            record.contact.phone,
            record.contact.email
        )?;
        writeln!(f)?;
        write_tab_bar(f, self.tab)?;
        writeln!(f)?;

        match self.tab {
            Tab::Overview => write_overview(f, record),
            Tab::Vitals => write_vitals(f, &self.vitals.apply(&record.vital_readings, self.now)),
            Tab::Labs => write_labs(f, record),
            Tab::History => write_history(f, record),
            Tab::Allergies => write_allergies(f, record),
            Tab::Immunizations => write_immunizations(f, record),
            Tab::Contacts => write_contacts(f, record),
        }
    }
}

/// Render `tab` of `record` to a string
pub fn render_tab(record: &MedicalRecord, tab: Tab, vitals: VitalsQuery, now: NaiveDateTime) -> String {
    Page {
        record,
        tab,
        vitals,
        now,
    }
    .to_string()
}

fn write_tab_bar(out: &mut impl Write, active: Tab) -> fmt::Result {
    let labels: Vec<String> = Tab::ALL
        .iter()
        .map(|&tab| {
            if tab == active {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect();
    writeln!(out, "{}", labels.join(" | "))
}

fn heading(out: &mut impl Write, title: &str) -> fmt::Result {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

fn write_overview(out: &mut impl Write, record: &MedicalRecord) -> fmt::Result {
    let view = views::overview(record);

    writeln!(out, "Address: {}", view.address)?;
    writeln!(out)?;

    heading(out, "Current Conditions")?;
    for c in &view.conditions {
        writeln!(out, "* {}", c.name)?;
        writeln!(out, "    Diagnosed: {}", c.diagnosed)?;
        writeln!(out, "    Severity:  {}", c.severity)?;
        writeln!(out, "    Status:    {}", c.status)?;
        writeln!(out, "    {}", c.notes)?;
    }
    writeln!(out)?;

    heading(out, "Current Medications")?;
    for m in &view.medications {
        writeln!(out, "* {} ({})", m.name, m.dosage)?;
        writeln!(out, "    Frequency:    {}", m.frequency)?;
        writeln!(out, "    Purpose:      {}", m.purpose)?;
        writeln!(out, "    Side Effects: {}", m.side_effects)?;
    }
    writeln!(out)?;

    heading(out, "Appointments")?;
    for a in &view.appointments {
        writeln!(
            out,
            "* {} {}  {} ({})",
            views::display_date(&a.date),
            a.time,
            a.doctor,
            a.specialty
        )?;
        writeln!(out, "    {} at {}", a.purpose, a.location)?;
        writeln!(out, "    Preparation: {}", a.preparation)?;
    }
    writeln!(out)?;

    let ins = view.insurance;
    heading(out, "Insurance")?;
    writeln!(out, "{} {} policy {}", ins.provider, ins.plan_type, ins.policy_number)?;
    writeln!(
        out,
        "Coverage: {} to {}",
        views::display_date(&ins.coverage_start),
        views::display_date(&ins.coverage_end)
    )?;
    writeln!(
        out,
        "Copay: primary ${}, specialist ${}, emergency ${}, prescription ${}",
        ins.copay.primary_care, ins.copay.specialist, ins.copay.emergency, ins.copay.prescription
    )?;
    writeln!(
        out,
        "Deductible: ${} remaining of ${}",
        ins.deductible.remaining, ins.deductible.individual
    )
}

fn flagged<T: fmt::Display>(cell: &Flagged<T>) -> String {
    if cell.abnormal {
        format!("{}!", cell.value)
    } else {
        cell.value.to_string()
    }
}

fn write_vitals(out: &mut impl Write, view: &VitalsView) -> fmt::Result {
    heading(out, "Vital Statistics")?;
    let ranges: Vec<String> = TimeRange::ALL
        .iter()
        .map(|&r| {
            if r == view.query.range {
                format!("[{}]", r)
            } else {
                r.to_string()
            }
        })
        .collect();
    writeln!(out, "Range: {}", ranges.join(" "))?;
    writeln!(out)?;

    for series in &view.series {
        match (series.min(), series.max()) {
            (Some(min), Some(max)) => writeln!(
                out,
                "{:<12} {} to {} {}  ({} readings)",
                series.metric.label(),
                min,
                max,
                series.metric.unit(),
                series.points.len()
            )?,
            _ => writeln!(out, "{:<12} no readings", series.metric.label())?,
        }
    }
    writeln!(out)?;

    let headings: Vec<String> = SortField::ALL
        .iter()
        .map(|&field| {
            if field == view.query.field {
                format!("{} ({})", field.heading(), view.query.order)
            } else {
                field.heading().to_string()
            }
        })
        .collect();
    writeln!(out, "{}", headings.join(" | "))?;
    for row in &view.rows {
        writeln!(
            out,
            "{} | {}/{} | {} | {} | {} ({}) | {}",
            row.taken_at,
            flagged(&row.systolic),
            flagged(&row.diastolic),
            flagged(&row.heart_rate),
            flagged(&row.temperature),
            flagged(&row.blood_sugar),
            row.sugar_kind,
            row.weight
        )?;
    }
    writeln!(
        out,
        "Page {} / {}, {} readings in range",
        view.query.page, view.total_pages, view.total_readings
    )
}

fn write_labs(out: &mut impl Write, record: &MedicalRecord) -> fmt::Result {
    let cards = views::labs(record);
    if cards.is_empty() {
        return writeln!(out, "{}", NO_LAB_RESULTS);
    }

    heading(out, "Lab Results")?;
    for card in &cards {
        let flag = if card.is_normal() { "" } else { " !" };
        writeln!(out, "* {} [{}]{}", card.test, card.status, flag)?;
        writeln!(out, "    Date:         {}", card.date)?;
        writeln!(out, "    Result:       {}", card.result)?;
        writeln!(out, "    Normal Range: {}", card.normal_range)?;
        if let Some(notes) = card.notes {
            writeln!(out, "    Notes:        {}", notes)?;
        }
    }
    Ok(())
}

fn write_history(out: &mut impl Write, record: &MedicalRecord) -> fmt::Result {
    heading(out, "Medical History Timeline")?;
    for entry in views::timeline(record) {
        writeln!(
            out,
            "{} {}  {}",
            entry.marker(),
            views::display_date(entry.date),
            entry.title
        )?;
        writeln!(out, "    {}", entry.description)?;
        if let Some(doctor) = entry.doctor {
            writeln!(out, "    Doctor: {}", doctor)?;
        }
        if let Some(facility) = entry.facility {
            writeln!(out, "    Facility: {}", facility)?;
        }
        if let Some(outcome) = entry.outcome {
            writeln!(out, "    Outcome: {}", outcome)?;
        }
        if let Some(follow_up) = entry.follow_up {
            writeln!(out, "    Follow-up: {}", follow_up)?;
        }
    }
    Ok(())
}

fn write_allergies(out: &mut impl Write, record: &MedicalRecord) -> fmt::Result {
    let chips = views::allergies(record);
    if chips.is_empty() {
        return writeln!(out, "{}", NO_ALLERGIES);
    }

    heading(out, "Known Allergies")?;
    for chip in &chips {
        writeln!(
            out,
            "* {} ({}, {}): {}",
            chip.allergen, chip.kind, chip.severity, chip.reaction
        )?;
    }
    Ok(())
}

fn write_immunizations(out: &mut impl Write, record: &MedicalRecord) -> fmt::Result {
    let cards = views::immunizations(record);
    if cards.is_empty() {
        return writeln!(out, "{}", NO_IMMUNIZATIONS);
    }

    heading(out, "Immunizations")?;
    for card in &cards {
        writeln!(out, "* {} (dose {})", card.name, card.dose)?;
        writeln!(out, "    Date Received: {}", card.date_received)?;
        writeln!(out, "    Next Due Date: {}", card.next_due)?;
        writeln!(out, "    Provider:      {}", card.provider)?;
    }
    Ok(())
}

fn write_contacts(out: &mut impl Write, record: &MedicalRecord) -> fmt::Result {
    let cards = views::contacts(record);
    if cards.is_empty() {
        return writeln!(out, "{}", NO_CONTACTS);
    }

    heading(out, "Emergency Contacts")?;
    for card in &cards {
        let primary = if card.primary { " (primary)" } else { "" };
        writeln!(out, "* {}{}, {}", card.name, primary, card.relationship)?;
        writeln!(out, "    {}  <{}>", card.phone, card.tel_link())?;
        writeln!(out, "    {}  <{}>", card.email, card.mailto_link())?;
    }
    Ok(())
}
