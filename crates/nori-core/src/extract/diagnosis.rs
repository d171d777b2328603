//! Diagnosis extraction from the problem list narrative table.
//!
//! The problem section is narrative-first: the table rows are the unit of
//! iteration, and each row is joined back to its coded entry through the
//! anchor index. A row must yield both a description fragment and a date
//! cell to become a record; the ICD-10 half is optional.

use tracing::trace;

use crate::anchors::{AnchorIndex, is_problem_row_id};
use crate::normalize::dates::{looks_like_narrative_date, normalize_narrative};
use crate::records::DiagnosisEntry;
use crate::sections::{self, SectionKind};
use crate::xml::Element;

/// Extract one record per conforming row of the problem table, in document
/// order. No section, no table, or no conforming rows all yield an empty
/// list.
pub fn extract_diagnoses(root: &Element) -> Vec<DiagnosisEntry> {
    let Some(section) = sections::locate(root, SectionKind::Problems) else {
        return Vec::new();
    };
    let Some(tbody) = section.find("tbody") else {
        return Vec::new();
    };
    let index = AnchorIndex::build(root);

    let mut entries = Vec::new();
    for row in tbody.find_all("tr") {
        let Some(row_id) = row.attr("ID") else {
            continue;
        };
        if !is_problem_row_id(row_id) {
            trace!("skipping non-problem row id {row_id}");
            continue;
        }

        let (coded_entry, fragment) = index.resolve(row, row_id);

        // Both the description and a date cell are required; a row missing
        // either is dropped whole rather than persisted half-filled.
        let Some(description) = fragment.and_then(|f| f.text()) else {
            continue;
        };
        let Some(date) = narrative_date(row) else {
            continue;
        };

        let translation = coded_entry.and_then(icd10_translation);
        entries.push(DiagnosisEntry {
            description: description.to_string(),
            date,
            icd10_code: translation
                .and_then(|t| t.attr("code"))
                .map(str::to_string),
            severity: translation
                .and_then(|t| t.attr("displayName"))
                .unwrap_or_default()
                .to_string(),
        });
    }
    entries
}

/// First cell content that reads like a narrative date, normalized.
fn narrative_date(row: &Element) -> Option<String> {
    for td in row.children("td") {
        for content in td.find_all("content") {
            if let Some(text) = content.text() {
                if looks_like_narrative_date(text) {
                    return Some(normalize_narrative(text));
                }
            }
        }
    }
    None
}

/// The coded entry's translation element naming the ICD-10 code system.
fn icd10_translation(entry: &Element) -> Option<&Element> {
    entry
        .find_all("translation")
        .find(|t| t.attr("codeSystemName") == Some("ICD-10"))
}
