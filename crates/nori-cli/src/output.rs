//! Output formatting and reporting
//!
//! This module handles the human and JSON output shapes for ingest
//! summaries and single-document record dumps

use colored::*;
use nori_core::{RecordSet, Result};
use serde::Serialize;

use crate::OutputFormat;

/// Accumulated results of one batch ingest run
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestSummary {
    pub files_processed: usize,
    pub files_failed: usize,
    pub patients: usize,
    pub hospitalizations: usize,
    pub diagnoses: usize,
    pub medications: usize,
}

impl IngestSummary {
    /// Fold one document's records into the running totals.
    pub fn absorb(&mut self, records: &RecordSet) {
        self.patients += 1;
        self.hospitalizations += records.hospitalizations.len();
        self.diagnoses += records.diagnoses.len();
        self.medications += records.medications.len();
    }

    pub fn total_records(&self) -> usize {
        self.patients + self.hospitalizations + self.diagnoses + self.medications
    }

    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }
}

/// Output formatter for different formats
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format and print an ingest summary
    pub fn print_ingest(&self, summary: &IngestSummary) -> Result<()> {
        match self.format {
            OutputFormat::Human => self.print_ingest_human(summary),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(summary)?);
                Ok(())
            }
        }
    }

    fn print_ingest_human(&self, summary: &IngestSummary) -> Result<()> {
        println!("\n{}", "Ingest summary:".bold());
        println!("  Files processed: {}", summary.files_processed);
        if summary.has_failures() {
            println!(
                "  Files failed: {}",
                summary.files_failed.to_string().red()
            );
        }
        println!("  Records written:");
        println!("    Patients: {}", summary.patients);
        println!("    Hospitalizations: {}", summary.hospitalizations);
        println!("    Diagnoses: {}", summary.diagnoses);
        println!("    Medications: {}", summary.medications);

        if summary.total_records() == 0 {
            println!("\n{} No records extracted", "•".blue());
        } else {
            println!(
                "\n{} Wrote {} records",
                "✓".green(),
                summary.total_records()
            );
        }
        Ok(())
    }

    /// Format and print one document's extracted records
    pub fn print_records(&self, records: &RecordSet) -> Result<()> {
        match self.format {
            OutputFormat::Human => self.print_records_human(records),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(records)?);
                Ok(())
            }
        }
    }

    fn print_records_human(&self, records: &RecordSet) -> Result<()> {
        let patient = &records.patient;
        println!("{}", "Patient".bold());
        println!("  ID: {}", patient.patient_id);
        println!("  Name: {} {}", patient.first_name, patient.last_name);
        println!("  Born: {}", display_opt(&patient.date_of_birth));
        println!("  Gender: {}", patient.gender);
        println!("  Address: {}", display_opt(&patient.address));
        println!("  Home phone: {}", display_opt(&patient.home_phone));
        println!("  Mobile phone: {}", display_opt(&patient.mobile_phone));
        println!("  Email: {}", display_opt(&patient.email));
        if !patient.languages.is_empty() {
            println!("  Languages: {}", patient.languages.join(", "));
        }

        println!(
            "\n{} ({})",
            "Hospitalizations".bold(),
            records.hospitalizations.len()
        );
        for stay in &records.hospitalizations {
            println!(
                "  {} | {} -> {} | {}",
                stay.encounter_type,
                display_opt(&stay.admission_date),
                display_opt(&stay.discharge_date),
                display_opt(&stay.location),
            );
            if !stay.diagnoses.is_empty() {
                println!("    diagnoses: {}", stay.diagnoses.join("; "));
            }
        }

        println!("\n{} ({})", "Diagnoses".bold(), records.diagnoses.len());
        for diagnosis in &records.diagnoses {
            println!(
                "  {} | {} | {}",
                diagnosis.description,
                diagnosis.date,
                diagnosis.icd10_code.as_deref().unwrap_or("-"),
            );
        }

        println!("\n{} ({})", "Medications".bold(), records.medications.len());
        for medication in &records.medications {
            println!(
                "  {} | {} | {}",
                medication.medication_name,
                medication.dosage.as_deref().unwrap_or("-"),
                medication.instructions,
            );
        }
        Ok(())
    }
}

fn display_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}
