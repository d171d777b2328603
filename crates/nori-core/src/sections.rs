//! Section locator
//!
//! Source documents are inconsistent about how a clinical category can be
//! addressed: demographics sit at a structurally required fixed path, the
//! problem list is only reliably found by its template id, and the encounter
//! and medication sections by their LOINC section codes. Each category keys
//! its strategy in one table, so supporting a new document variant means
//! adding a table entry rather than new control flow.

use crate::xml::Element;

/// Clinical categories the extractors pull from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Demographics,
    Problems,
    Encounters,
    Medications,
}

/// Template id of the problem/diagnosis list section.
const PROBLEMS_TEMPLATE_ID: &str = "2.16.840.1.113883.10.20.22.2.5.1";
/// LOINC code of the encounters section.
const ENCOUNTERS_CODE: &str = "46240-8";
/// LOINC code of the medications section.
const MEDICATIONS_CODE: &str = "10160-0";

enum Strategy {
    /// Direct descent through structurally required containment.
    FixedPath(&'static [&'static str]),
    /// First `section` whose `templateId` child declares the given root.
    TemplateId(&'static str),
    /// First `section` whose `code` child carries the given code attribute.
    SectionCode(&'static str),
}

const STRATEGIES: &[(SectionKind, Strategy)] = &[
    (
        SectionKind::Demographics,
        Strategy::FixedPath(&["recordTarget", "patientRole"]),
    ),
    (SectionKind::Problems, Strategy::TemplateId(PROBLEMS_TEMPLATE_ID)),
    (SectionKind::Encounters, Strategy::SectionCode(ENCOUNTERS_CODE)),
    (SectionKind::Medications, Strategy::SectionCode(MEDICATIONS_CODE)),
];

/// Find the subtree for a category, or `None` when the document lacks it.
///
/// Absence of a section is common and expected, not exceptional; extractors
/// degrade to an empty result set instead of erroring.
pub fn locate<'a>(root: &'a Element, kind: SectionKind) -> Option<&'a Element> {
    let strategy = STRATEGIES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, strategy)| strategy)?;

    match strategy {
        Strategy::FixedPath(segments) => root.path(segments),
        Strategy::TemplateId(template_root) => root
            .find_all("section")
            .find(|s| section_has_template(s, template_root)),
        Strategy::SectionCode(code) => root
            .find_all("section")
            .find(|s| section_has_code(s, code)),
    }
}

fn section_has_template(section: &Element, template_root: &str) -> bool {
    section
        .children("templateId")
        .any(|t| t.attr("root") == Some(template_root))
}

fn section_has_code(section: &Element, code: &str) -> bool {
    section
        .children("code")
        .any(|c| c.attr("code") == Some(code))
}
