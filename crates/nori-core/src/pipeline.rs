//! Per-document extraction pipeline
//!
//! Pure and synchronous: one parsed document in, one record set out, no
//! state shared across invocations. Callers parallelize across documents
//! freely and serialize only at the persistence boundary.

use tracing::debug;

use crate::error::Result;
use crate::extract::{
    extract_diagnoses, extract_hospitalizations, extract_medications, extract_patient,
};
use crate::records::RecordSet;
use crate::xml::Document;

/// Extract every record a document yields.
///
/// The patient comes first: its identifier anchors all dependent records,
/// and a document without one produces no records at all
/// ([`crate::Error::MissingPatientId`]) rather than a partial set. Absent
/// sections merely leave their entity list empty.
pub fn extract_document(doc: &Document) -> Result<RecordSet> {
    let root = doc.root();
    let patient = extract_patient(root)?;

    let hospitalizations = extract_hospitalizations(root);
    let diagnoses = extract_diagnoses(root);
    let medications = extract_medications(root);

    debug!(
        "patient {}: {} hospitalizations, {} diagnoses, {} medications",
        patient.patient_id,
        hospitalizations.len(),
        diagnoses.len(),
        medications.len()
    );

    Ok(RecordSet {
        patient,
        hospitalizations,
        diagnoses,
        medications,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn document_without_patient_id_yields_nothing() {
        // Medications are present and extractable, but without the patient
        // identifier the whole document must produce no records.
        let xml = r#"<ClinicalDocument>
          <component><structuredBody><component>
            <section>
              <code code="10160-0"/>
              <entry>
                <substanceAdministration>
                  <consumable><manufacturedProduct><manufacturedMaterial>
                    <code displayName="aspirin 81mg tablet"/>
                  </manufacturedMaterial></manufacturedProduct></consumable>
                </substanceAdministration>
              </entry>
            </section>
          </component></structuredBody></component>
        </ClinicalDocument>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(matches!(
            extract_document(&doc),
            Err(Error::MissingPatientId)
        ));
    }

    #[test]
    fn patient_only_document_has_empty_entity_lists() {
        let xml = r#"<ClinicalDocument>
          <recordTarget><patientRole><id extension="P-1"/></patientRole></recordTarget>
        </ClinicalDocument>"#;
        let doc = Document::parse(xml).unwrap();
        let records = extract_document(&doc).unwrap();
        assert_eq!(records.patient.patient_id, "P-1");
        assert!(records.hospitalizations.is_empty());
        assert!(records.diagnoses.is_empty());
        assert!(records.medications.is_empty());
        assert_eq!(records.record_count(), 1);
    }
}
