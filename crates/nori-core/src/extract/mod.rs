//! Per-entity extractors
//!
//! Each extractor is a pure function from the document tree to normalized
//! records, composing the section locator, the anchor index and the
//! normalization primitives. Missing optional structure degrades to
//! defaults or skipped records; only a missing patient identifier aborts a
//! document, and that decision lives in the pipeline, not here.

mod diagnosis;
mod hospitalization;
mod medication;
mod patient;

pub use diagnosis::extract_diagnoses;
pub use hospitalization::extract_hospitalizations;
pub use medication::extract_medications;
pub use patient::extract_patient;

use crate::normalize::dates::normalize_compact;
use crate::xml::Element;

/// Normalized `effectiveTime` low/high bounds beneath an element.
///
/// The first `low` and the first `high` found under any `effectiveTime`
/// descendant win, matching how loosely the documents nest interval times.
pub(crate) fn effective_range(elem: &Element) -> (Option<String>, Option<String>) {
    let low = elem
        .find_all("effectiveTime")
        .find_map(|et| et.child("low"))
        .and_then(|e| e.attr("value"))
        .and_then(normalize_compact);
    let high = elem
        .find_all("effectiveTime")
        .find_map(|et| et.child("high"))
        .and_then(|e| e.attr("value"))
        .and_then(normalize_compact);
    (low, high)
}
