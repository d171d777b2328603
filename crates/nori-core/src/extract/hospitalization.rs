//! Hospitalization extraction from the encounters section.

use crate::records::{HospitalizationRecord, UNKNOWN};
use crate::sections::{self, SectionKind};
use crate::xml::Element;

use super::effective_range;

/// Extract one record per `encounter` under the encounters section, in
/// document order. No section, or a section with no encounters, yields an
/// empty list.
pub fn extract_hospitalizations(root: &Element) -> Vec<HospitalizationRecord> {
    let Some(section) = sections::locate(root, SectionKind::Encounters) else {
        return Vec::new();
    };
    section
        .find_all("encounter")
        .map(from_encounter)
        .collect()
}

fn from_encounter(encounter: &Element) -> HospitalizationRecord {
    let (admission_date, discharge_date) = effective_range(encounter);
    HospitalizationRecord {
        encounter_type: encounter
            .child("code")
            .and_then(|c| c.attr("displayName"))
            .unwrap_or(UNKNOWN)
            .to_string(),
        admission_date,
        discharge_date,
        location: encounter
            .find("playingEntity")
            .and_then(|pe| pe.child("name"))
            .and_then(|n| n.text())
            .map(str::to_string),
        diagnoses: encounter_diagnoses(encounter),
        providers: organization_names(encounter, "performer"),
        informants: organization_names(encounter, "informant"),
    }
}

/// Display names of diagnosis observations hanging off the encounter's
/// entry relationships.
fn encounter_diagnoses(encounter: &Element) -> Vec<String> {
    encounter
        .children("entryRelationship")
        .flat_map(|er| er.find_all("observation"))
        .filter_map(|obs| obs.child("value"))
        .filter_map(|v| v.attr("displayName"))
        .map(str::to_string)
        .collect()
}

/// Represented-organization names under every `role` child, document order.
fn organization_names(encounter: &Element, role: &str) -> Vec<String> {
    encounter
        .children(role)
        .filter_map(|r| r.find("representedOrganization"))
        .filter_map(|org| org.child("name"))
        .filter_map(|n| n.text())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Document;

    const DOC: &str = r#"<ClinicalDocument xmlns="urn:hl7-org:v3">
  <component><structuredBody><component>
    <section>
      <code code="46240-8"/>
      <entry>
        <encounter>
          <code code="IMP" displayName="Inpatient encounter"/>
          <effectiveTime>
            <low value="20230601080000"/>
            <high value="20230605120000"/>
          </effectiveTime>
          <participant>
            <participantRole>
              <playingEntity><name>General Hospital</name></playingEntity>
            </participantRole>
          </participant>
          <performer>
            <assignedEntity>
              <representedOrganization><name>Cardiology Associates</name></representedOrganization>
            </assignedEntity>
          </performer>
          <performer>
            <assignedEntity>
              <representedOrganization><name>Internal Medicine Group</name></representedOrganization>
            </assignedEntity>
          </performer>
          <informant>
            <assignedEntity>
              <representedOrganization><name>Community Clinic</name></representedOrganization>
            </assignedEntity>
          </informant>
          <entryRelationship typeCode="RSON">
            <observation>
              <value code="I10" displayName="Essential hypertension"/>
            </observation>
          </entryRelationship>
          <entryRelationship typeCode="RSON">
            <observation>
              <value code="E11.9" displayName="Type 2 diabetes"/>
            </observation>
          </entryRelationship>
        </encounter>
      </entry>
      <entry>
        <encounter>
          <code code="AMB"/>
        </encounter>
      </entry>
    </section>
  </component></structuredBody></component>
</ClinicalDocument>"#;

    #[test]
    fn extracts_encounters_in_document_order() {
        let doc = Document::parse(DOC).unwrap();
        let records = extract_hospitalizations(doc.root());
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.encounter_type, "Inpatient encounter");
        assert_eq!(first.admission_date.as_deref(), Some("2023-06-01 08:00:00"));
        assert_eq!(first.discharge_date.as_deref(), Some("2023-06-05 12:00:00"));
        assert_eq!(first.location.as_deref(), Some("General Hospital"));
        assert_eq!(
            first.diagnoses,
            vec!["Essential hypertension", "Type 2 diabetes"]
        );
        assert_eq!(
            first.providers,
            vec!["Cardiology Associates", "Internal Medicine Group"]
        );
        assert_eq!(first.informants, vec!["Community Clinic"]);
    }

    #[test]
    fn bare_encounter_degrades_each_field() {
        let doc = Document::parse(DOC).unwrap();
        let records = extract_hospitalizations(doc.root());

        // Second encounter has a code without displayName and nothing else.
        let second = &records[1];
        assert_eq!(second.encounter_type, UNKNOWN);
        assert_eq!(second.admission_date, None);
        assert_eq!(second.discharge_date, None);
        assert_eq!(second.location, None);
        assert!(second.diagnoses.is_empty());
        assert!(second.providers.is_empty());
        assert!(second.informants.is_empty());
    }

    #[test]
    fn missing_section_yields_no_records() {
        let doc = Document::parse("<ClinicalDocument/>").unwrap();
        assert!(extract_hospitalizations(doc.root()).is_empty());
    }
}
