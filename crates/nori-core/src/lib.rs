//! NORI Core
//!
//! Core intake engine for CCDA-style clinical XML documents.
//! This crate parses a document into a navigable tree, locates its clinical
//! sections, and extracts normalized patient, hospitalization, diagnosis
//! and medication records for persistence.

pub mod anchors;
pub mod config;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod records;
pub mod sections;
pub mod sink;
pub mod xml;

// Re-export commonly used types
pub use anchors::AnchorIndex;
pub use config::IngestConfig;
pub use error::{Error, Result};
pub use extract::{
    extract_diagnoses, extract_hospitalizations, extract_medications, extract_patient,
};
pub use pipeline::extract_document;
pub use records::{
    DiagnosisEntry, HospitalizationRecord, MedicationEntry, PatientRecord, RecordSet,
};
pub use sections::SectionKind;
pub use sink::{JsonLinesSink, RecordSink};
pub use xml::{Document, Element};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nori=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
