//! Medication extraction from the medications section.

use tracing::trace;

use crate::normalize::dosage::{sentence_case, split_dosage, title_case};
use crate::records::{MedicationEntry, NO_INSTRUCTIONS};
use crate::sections::{self, SectionKind};
use crate::xml::Element;

use super::effective_range;

/// Extract one record per named medication entry, in document order.
///
/// Entries without a resolvable display name are skipped outright rather
/// than persisted with a placeholder name.
pub fn extract_medications(root: &Element) -> Vec<MedicationEntry> {
    let Some(section) = sections::locate(root, SectionKind::Medications) else {
        return Vec::new();
    };
    section.children("entry").filter_map(from_entry).collect()
}

fn from_entry(entry: &Element) -> Option<MedicationEntry> {
    let substance = entry.find("substanceAdministration")?;
    let Some(display) = substance
        .find("manufacturedMaterial")
        .and_then(|m| m.child("code"))
        .and_then(|c| c.attr("displayName"))
    else {
        trace!("skipping medication entry without a display name");
        return None;
    };

    let (cleaned, split_token) = split_dosage(display);
    let medication_name = title_case(&cleaned);
    if medication_name.is_empty() {
        return None;
    }

    let (start_date, end_date) = effective_range(substance);
    Some(MedicationEntry {
        medication_name,
        // A structured dose beats the token recovered from the name.
        dosage: quantity(substance, "doseQuantity").or(split_token),
        frequency: quantity(substance, "rateQuantity"),
        start_date,
        end_date,
        instructions: instructions(entry),
    })
}

/// `value [unit]` from the first matching quantity element.
fn quantity(substance: &Element, name: &str) -> Option<String> {
    let q = substance.find(name)?;
    let value = q.attr("value")?;
    Some(match q.attr("unit") {
        Some(unit) => format!("{value} {unit}"),
        None => value.to_string(),
    })
}

/// Narrative instructions from the first related act, sentence-cased;
/// absent text gets the fixed default.
fn instructions(entry: &Element) -> String {
    entry
        .find_all("entryRelationship")
        .find_map(|er| er.path(&["act", "text"]))
        .and_then(|t| t.text())
        .map(sentence_case)
        .unwrap_or_else(|| NO_INSTRUCTIONS.to_string())
}
