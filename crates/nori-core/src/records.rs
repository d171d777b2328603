//! Normalized record shapes handed to the persistence collaborator.
//!
//! Field conventions, uniform across entities:
//!
//! - `Option<String>` distinguishes "never resolved" (`None`, serialized as
//!   `null`) from "present but empty" (an explicit sentinel string).
//! - Display fields resolved through a coded translation default to
//!   [`UNKNOWN`] when the translation is missing; telecom fields use the
//!   sentinel from [`crate::normalize::telecom`].
//! - Timestamp fields carry canonical `YYYY-MM-DD HH:MM:SS` text and date
//!   fields `YYYY-MM-DD`, except a diagnosis date, which may carry the
//!   verbatim narrative fallback when the cell did not parse.

use serde::{Deserialize, Serialize};

/// Sentinel for display fields whose coded translation could not be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Default instruction text for medications without narrative instructions.
pub const NO_INSTRUCTIONS: &str = "No specific instructions";

/// Demographics for the one patient a document describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Natural key every dependent record references.
    pub patient_id: String,
    /// All given-name parts joined with single spaces.
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub gender: String,
    pub race: String,
    pub ethnicity: String,
    pub marital_status: String,
    /// Street lines, city, state and postal code joined with ", ".
    pub address: Option<String>,
    pub home_phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub email: Option<String>,
    /// Deduplicated, lowercased language codes in sorted order.
    pub languages: Vec<String>,
}

/// One encounter from the encounters section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalizationRecord {
    pub encounter_type: String,
    pub admission_date: Option<String>,
    pub discharge_date: Option<String>,
    pub location: Option<String>,
    /// Display names of the encounter's associated diagnosis observations.
    pub diagnoses: Vec<String>,
    /// Organization names from the encounter's performers, document order.
    pub providers: Vec<String>,
    /// Organization names from the encounter's informants, document order.
    pub informants: Vec<String>,
}

/// One problem-list row joined with its coded entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisEntry {
    pub description: String,
    /// Canonical timestamp, or the row's verbatim text when unparseable.
    pub date: String,
    pub icd10_code: Option<String>,
    /// Display name of the ICD-10 translation; empty when absent.
    pub severity: String,
}

/// One medication from the medications section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationEntry {
    pub medication_name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub instructions: String,
}

/// Everything one document yields, patient first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub patient: PatientRecord,
    pub hospitalizations: Vec<HospitalizationRecord>,
    pub diagnoses: Vec<DiagnosisEntry>,
    pub medications: Vec<MedicationEntry>,
}

impl RecordSet {
    /// Total number of records across all entities, the patient included.
    pub fn record_count(&self) -> usize {
        1 + self.hospitalizations.len() + self.diagnoses.len() + self.medications.len()
    }
}
