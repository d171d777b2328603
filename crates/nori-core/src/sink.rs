//! Record handoff to the persistence collaborator
//!
//! The pipeline hands each document's record set across the [`RecordSink`]
//! trait and never depends on what the sink does with it. The bundled
//! implementation appends JSON lines to per-entity files, one object per
//! record, dependents tagged with the patient's natural key. A deployment
//! backed by a real store would implement the trait with upsert-by-key
//! writes instead.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::records::RecordSet;

/// Persistence boundary for extracted record sets.
pub trait RecordSink {
    /// Persist one document's records.
    fn persist(&mut self, records: &RecordSet) -> Result<()>;
}

/// Dependent record line carrying its patient's natural key.
#[derive(Serialize)]
struct Keyed<'a, T: Serialize> {
    patient_id: &'a str,
    #[serde(flatten)]
    record: &'a T,
}

/// Appends one JSON object per record to per-entity `.ndjson` files.
pub struct JsonLinesSink {
    patients: BufWriter<File>,
    hospitalizations: BufWriter<File>,
    diagnoses: BufWriter<File>,
    medications: BufWriter<File>,
}

impl JsonLinesSink {
    /// Open the four entity files under `dir`, creating the directory and
    /// appending to files from earlier runs.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            patients: open_entity(dir, "patients")?,
            hospitalizations: open_entity(dir, "hospitalizations")?,
            diagnoses: open_entity(dir, "diagnoses")?,
            medications: open_entity(dir, "medications")?,
        })
    }

    fn flush(&mut self) -> Result<()> {
        self.patients.flush()?;
        self.hospitalizations.flush()?;
        self.diagnoses.flush()?;
        self.medications.flush()?;
        Ok(())
    }
}

fn open_entity(dir: &Path, entity: &str) -> Result<BufWriter<File>> {
    let path = dir.join(format!("{entity}.ndjson"));
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

fn write_line<T: Serialize>(writer: &mut BufWriter<File>, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")?;
    Ok(())
}

impl RecordSink for JsonLinesSink {
    fn persist(&mut self, records: &RecordSet) -> Result<()> {
        write_line(&mut self.patients, &records.patient)?;

        let patient_id = records.patient.patient_id.as_str();
        for record in &records.hospitalizations {
            write_line(&mut self.hospitalizations, &Keyed { patient_id, record })?;
        }
        for record in &records.diagnoses {
            write_line(&mut self.diagnoses, &Keyed { patient_id, record })?;
        }
        for record in &records.medications {
            write_line(&mut self.medications, &Keyed { patient_id, record })?;
        }
        // Records for a document become durable before its file is declared
        // done, so a crash never leaves a moved-away source half persisted.
        self.flush()
    }
}
