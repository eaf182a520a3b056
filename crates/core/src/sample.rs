//! Server-side sample record
//!
//! Every issued card carries the same synthesized record. Nothing here is
//! supplied by the client.

use crate::record::*;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn springfield_pharmacy() -> Pharmacy {
    Pharmacy {
        name: "Springfield Pharmacy".into(),
        phone: "+1 (555) 234-5678".into(),
        address: "100 Main Street, Springfield, IL 62701".into(),
    }
}

/// Build the sample medical record for Sarah Elizabeth Anderson
pub fn generate_record() -> MedicalRecord {
    MedicalRecord {
        patient_name: "Sarah Elizabeth Anderson".into(),
        date_of_birth: "1985-06-15".into(),
        blood_type: "A+".into(),
        contact: ContactInfo {
            phone: "+1 (555) 123-4567".into(),
            email: "sarah.anderson@email.com".into(),
            address: Address {
                street: "742 Maple Avenue".into(),
                city: "Springfield".into(),
                state: "IL".into(),
                zip_code: "62701".into(),
                country: "United States".into(),
            },
        },
        conditions: conditions(),
        medications: medications(),
        emergency_contacts: emergency_contacts(),
        medical_history: medical_history(),
        vital_readings: vital_readings(),
        appointments: appointments(),
        prescriptions: prescriptions(),
        insurance: insurance(),
        allergies: allergies(),
        immunizations: immunizations(),
        lab_results: lab_results(),
        family_history: family_history(),
        lifestyle: lifestyle(),
    }
}

fn conditions() -> Vec<Condition> {
    vec![
        Condition {
            name: "Type 2 Diabetes".into(),
            diagnosed_date: "2020-03-15".into(),
            severity: Severity::Moderate,
            status: "managed".into(),
            notes: "Well controlled with medication and lifestyle changes".into(),
        },
        Condition {
            name: "Hypertension".into(),
            diagnosed_date: "2019-11-22".into(),
            severity: Severity::Mild,
            status: "managed".into(),
            notes: "Responding well to current treatment plan".into(),
        },
        Condition {
            name: "Asthma".into(),
            diagnosed_date: "2015-08-10".into(),
            severity: Severity::Moderate,
            status: "managed".into(),
            notes: "Triggered by seasonal allergies and exercise".into(),
        },
    ]
}

fn medications() -> Vec<Medication> {
    vec![
        Medication {
            name: "Metformin".into(),
            dosage: "1000mg".into(),
            frequency: "Twice daily with meals".into(),
            purpose: "Diabetes management".into(),
            start_date: "2020-03-20".into(),
            end_date: "ongoing".into(),
            side_effects: strings(&["Nausea", "Decreased appetite"]),
        },
        Medication {
            name: "Lisinopril".into(),
            dosage: "10mg".into(),
            frequency: "Once daily".into(),
            purpose: "Blood pressure control".into(),
            start_date: "2019-12-01".into(),
            end_date: "ongoing".into(),
            side_effects: strings(&["Dry cough", "Dizziness"]),
        },
        Medication {
            name: "Albuterol Inhaler".into(),
            dosage: "2 puffs".into(),
            frequency: "As needed".into(),
            purpose: "Asthma relief".into(),
            start_date: "2015-08-15".into(),
            end_date: "ongoing".into(),
            side_effects: strings(&["Tremors", "Rapid heartbeat"]),
        },
    ]
}

fn emergency_contacts() -> Vec<EmergencyContact> {
    vec![
        EmergencyContact {
            name: "Michael Anderson".into(),
            relationship: "Spouse".into(),
            phone: "+1 (555) 987-6543".into(),
            email: "michael.anderson@email.com".into(),
            address: "742 Maple Avenue, Springfield, IL 62701".into(),
            is_primary_contact: true,
        },
        EmergencyContact {
            name: "Jennifer Wilson".into(),
            relationship: "Sister".into(),
            phone: "+1 (555) 456-7890".into(),
            email: "jennifer.wilson@email.com".into(),
            address: "123 Oak Street, Springfield, IL 62701".into(),
            is_primary_contact: false,
        },
        EmergencyContact {
            name: "Robert Anderson".into(),
            relationship: "Father".into(),
            phone: "+1 (555) 234-5678".into(),
            email: "robert.anderson@email.com".into(),
            address: "456 Pine Road, Springfield, IL 62701".into(),
            is_primary_contact: false,
        },
    ]
}

fn medical_history() -> Vec<HistoryEvent> {
    vec![
        HistoryEvent {
            date: "2023-09-15".into(),
            kind: HistoryEventKind::Surgery,
            title: "Laparoscopic Appendectomy".into(),
            description: "Emergency appendectomy performed due to acute appendicitis".into(),
            doctor: "Dr. James Mitchell".into(),
            facility: "Springfield General Hospital".into(),
            outcome: "Successful with no complications".into(),
            follow_up: "Follow-up appointment scheduled for wound check in 2 weeks".into(),
        },
        HistoryEvent {
            date: "2022-07-20".into(),
            kind: HistoryEventKind::Diagnosis,
            title: "Initial Diabetes Diagnosis".into(),
            description: "Diagnosed following elevated A1C levels".into(),
            doctor: "Dr. Sarah Smith".into(),
            facility: "Springfield Medical Center".into(),
            outcome: "Treatment plan initiated".into(),
            follow_up: "Regular monitoring of blood sugar levels".into(),
        },
        HistoryEvent {
            date: "2021-03-10".into(),
            kind: HistoryEventKind::Surgery,
            title: "Knee Arthroscopy".into(),
            description: "Minimally invasive procedure to repair meniscus tear".into(),
            doctor: "Dr. David Jones".into(),
            facility: "Springfield Orthopedic Center".into(),
            outcome: "Successful repair".into(),
            follow_up: "Physical therapy for 8 weeks".into(),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn reading(
    date: &str,
    time: &str,
    (systolic, diastolic): (u32, u32),
    heart_rate: u32,
    temperature: f64,
    respiratory_rate: u32,
    blood_sugar: u32,
    weight: f64,
    bmi: f64,
    oxygen_saturation: u32,
) -> VitalReading {
    VitalReading {
        date: date.into(),
        time: time.into(),
        blood_pressure: BloodPressure {
            systolic,
            diastolic,
            position: "sitting".into(),
        },
        heart_rate,
        temperature,
        respiratory_rate,
        blood_sugar: BloodSugar {
            value: blood_sugar,
            kind: "fasting".into(),
        },
        weight,
        height: 165.0,
        bmi,
        oxygen_saturation,
    }
}

fn vital_readings() -> Vec<VitalReading> {
    vec![
        reading("2024-03-15", "09:30", (128, 82), 72, 36.8, 16, 110, 68.0, 25.0, 98),
        reading("2024-02-15", "10:00", (130, 84), 75, 36.7, 16, 115, 69.0, 25.3, 97),
        reading("2024-01-15", "08:45", (132, 86), 78, 36.9, 18, 118, 70.0, 25.7, 98),
    ]
}

fn appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            date: "2024-04-15".into(),
            time: "14:30".into(),
            doctor: "Dr. Sarah Smith".into(),
            specialty: "Endocrinology".into(),
            department: "Diabetes Care".into(),
            location: "Springfield Medical Center, Suite 300".into(),
            purpose: "Quarterly diabetes check-up".into(),
            notes: "Bring blood sugar logs".into(),
            preparation: "Fasting blood work required".into(),
        },
        Appointment {
            date: "2024-05-01".into(),
            time: "10:00".into(),
            doctor: "Dr. Michael Brown".into(),
            specialty: "Cardiology".into(),
            department: "Cardiovascular Health".into(),
            location: "Heart Care Center, Building B".into(),
            purpose: "Blood pressure follow-up".into(),
            notes: "Bring blood pressure logs".into(),
            preparation: "No special preparation needed".into(),
        },
        Appointment {
            date: "2024-05-15".into(),
            time: "11:30".into(),
            doctor: "Dr. Lisa Chen".into(),
            specialty: "Pulmonology".into(),
            department: "Respiratory Care".into(),
            location: "Springfield Medical Center, Suite 400".into(),
            purpose: "Annual asthma review".into(),
            notes: "Bring inhaler for technique check".into(),
            preparation: "Complete peak flow diary".into(),
        },
    ]
}

fn prescriptions() -> Vec<Prescription> {
    vec![
        Prescription {
            medication: "Metformin".into(),
            generic_name: "Metformin Hydrochloride".into(),
            dosage: "1000mg tablets".into(),
            frequency: "Twice daily with meals".into(),
            start_date: "2024-01-15".into(),
            end_date: "2024-07-15".into(),
            prescribed_by: "Dr. Sarah Smith".into(),
            pharmacy: springfield_pharmacy(),
            refills_remaining: 3,
            instructions: "Take with food to minimize stomach upset".into(),
            side_effects: strings(&["Nausea", "Diarrhea", "Loss of appetite"]),
            interactions: strings(&["Alcohol", "Iodinated contrast materials"]),
        },
        Prescription {
            medication: "Lisinopril".into(),
            generic_name: "Lisinopril".into(),
            dosage: "10mg tablets".into(),
            frequency: "Once daily".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-12-31".into(),
            prescribed_by: "Dr. Michael Brown".into(),
            pharmacy: springfield_pharmacy(),
            refills_remaining: 5,
            instructions: "Take in the morning".into(),
            side_effects: strings(&["Dry cough", "Dizziness", "Headache"]),
            interactions: strings(&["NSAIDs", "Potassium supplements"]),
        },
    ]
}

fn insurance() -> Insurance {
    Insurance {
        provider: "HealthCare Plus".into(),
        policy_number: "HCP123456789".into(),
        group_number: "GRP987654".into(),
        plan_type: "PPO".into(),
        coverage_start: "2024-01-01".into(),
        coverage_end: "2024-12-31".into(),
        primary_holder: "Sarah Anderson".into(),
        relationship: "Self".into(),
        copay: Copay {
            primary_care: 25,
            specialist: 40,
            emergency: 150,
            prescription: 10,
        },
        deductible: Deductible {
            individual: 1500,
            family: 3000,
            remaining: 750,
        },
    }
}

fn allergies() -> Vec<Allergy> {
    vec![
        Allergy {
            allergen: "Penicillin".into(),
            kind: "medication".into(),
            severity: Severity::Severe,
            reaction: "Anaphylaxis".into(),
            diagnosed_date: "2010-05-15".into(),
            notes: "Requires immediate medical attention if exposed".into(),
        },
        Allergy {
            allergen: "Tree Nuts".into(),
            kind: "food".into(),
            severity: Severity::Moderate,
            reaction: "Hives and difficulty breathing".into(),
            diagnosed_date: "2015-08-22".into(),
            notes: "Carries EpiPen".into(),
        },
        Allergy {
            allergen: "Pollen".into(),
            kind: "environmental".into(),
            severity: Severity::Mild,
            reaction: "Sneezing, watery eyes".into(),
            diagnosed_date: "2012-03-10".into(),
            notes: "Seasonal - worst in spring".into(),
        },
    ]
}

fn immunizations() -> Vec<Immunization> {
    vec![
        Immunization {
            name: "Influenza Vaccine".into(),
            date: "2023-10-15".into(),
            kind: "Inactivated influenza".into(),
            dose_number: 1,
            total_doses: 1,
            manufacturer: "Sanofi Pasteur".into(),
            lot_number: "IN23456".into(),
            administered_by: "Dr. James Wilson".into(),
            location: "Springfield Medical Center".into(),
            next_due_date: "2024-10-15".into(),
            notes: "Annual flu shot".into(),
        },
        Immunization {
            name: "COVID-19 Vaccine".into(),
            date: "2023-09-01".into(),
            kind: "mRNA".into(),
            dose_number: 4,
            total_doses: 4,
            manufacturer: "Pfizer-BioNTech".into(),
            lot_number: "PB98765".into(),
            administered_by: "Dr. Maria Garcia".into(),
            location: "Springfield Medical Center".into(),
            next_due_date: "2024-09-01".into(),
            notes: "Annual booster".into(),
        },
        Immunization {
            name: "Tetanus/Diphtheria/Pertussis".into(),
            date: "2020-05-15".into(),
            kind: "Tdap".into(),
            dose_number: 1,
            total_doses: 1,
            manufacturer: "GlaxoSmithKline".into(),
            lot_number: "TD45678".into(),
            administered_by: "Dr. James Wilson".into(),
            location: "Springfield Medical Center".into(),
            next_due_date: "2030-05-15".into(),
            notes: "10-year booster".into(),
        },
    ]
}

fn lab_result(
    category: &str,
    test: &str,
    (result, unit): (&str, &str),
    normal_range: &str,
    status: LabStatus,
    notes: &str,
    interpretation: &str,
) -> LabResult {
    LabResult {
        date: "2024-03-01".into(),
        time: "08:30".into(),
        category: category.into(),
        test: test.into(),
        result: result.into(),
        unit: unit.into(),
        normal_range: normal_range.into(),
        status,
        ordered_by: "Dr. Sarah Smith".into(),
        performed_by: "John Davis, MT".into(),
        facility: "Springfield Medical Lab".into(),
        notes: notes.into(),
        interpretation: interpretation.into(),
    }
}

fn lab_results() -> Vec<LabResult> {
    vec![
        lab_result(
            "Diabetes Monitoring",
            "HbA1c",
            ("6.8", "%"),
            "4.0-5.6",
            LabStatus::Abnormal,
            "Improved from previous reading of 7.2%",
            "Indicates good diabetes control",
        ),
        lab_result(
            "Lipid Panel",
            "Total Cholesterol",
            ("185", "mg/dL"),
            "<200",
            LabStatus::Normal,
            "Within normal range",
            "Optimal level",
        ),
        lab_result(
            "Kidney Function",
            "Creatinine",
            ("0.9", "mg/dL"),
            "0.6-1.2",
            LabStatus::Normal,
            "Within normal range",
            "Normal kidney function",
        ),
    ]
}

fn family_history() -> Vec<FamilyHistoryEntry> {
    vec![
        FamilyHistoryEntry {
            relationship: "Father".into(),
            condition: "Type 2 Diabetes".into(),
            diagnosed_age: 45,
            status: "living".into(),
            notes: "Well managed with medication and diet".into(),
        },
        FamilyHistoryEntry {
            relationship: "Mother".into(),
            condition: "Hypertension".into(),
            diagnosed_age: 50,
            status: "living".into(),
            notes: "Controlled with medication".into(),
        },
        FamilyHistoryEntry {
            relationship: "Paternal Grandfather".into(),
            condition: "Coronary Artery Disease".into(),
            diagnosed_age: 60,
            status: "deceased".into(),
            notes: "Passed away at age 72 from heart attack".into(),
        },
    ]
}

fn lifestyle() -> Lifestyle {
    Lifestyle {
        smoking: Smoking {
            status: "never".into(),
            frequency: "N/A".into(),
            quit_date: None,
        },
        alcohol: Alcohol {
            status: "occasional".into(),
            frequency: "1-2 drinks per month".into(),
            amount: "1 drink per occasion".into(),
        },
        exercise: Exercise {
            frequency: "3-4 times per week".into(),
            kinds: strings(&["Walking", "Swimming", "Yoga"]),
            duration: "30-45 minutes".into(),
        },
        diet: Diet {
            kind: "Low-carb".into(),
            restrictions: strings(&["Refined sugars", "Processed foods"]),
            notes: "Following diabetic diet plan".into(),
        },
    }
}
