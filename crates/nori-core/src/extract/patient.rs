//! Patient demographics extraction.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::normalize::dates::normalize_compact_date;
use crate::normalize::telecom::{self, TelecomKind};
use crate::records::{PatientRecord, UNKNOWN};
use crate::sections::{self, SectionKind};
use crate::xml::Element;

/// Extract the single patient record a document describes.
///
/// The only hard failure is an unresolvable patient identifier: without it
/// the whole document is unusable, since every dependent record keys off
/// it. Everything else degrades to sentinels or empty values.
pub fn extract_patient(root: &Element) -> Result<PatientRecord> {
    let patient_role = sections::locate(root, SectionKind::Demographics)
        .ok_or(Error::MissingPatientId)?;
    let patient_id = patient_role
        .children("id")
        .find_map(|id| id.attr("extension"))
        .ok_or(Error::MissingPatientId)?
        .to_string();

    let patient = patient_role.child("patient");
    let (first_name, last_name) = patient.map(names).unwrap_or_default();

    let record = PatientRecord {
        first_name,
        last_name,
        date_of_birth: patient
            .and_then(|p| p.child("birthTime"))
            .and_then(|b| b.attr("value"))
            .and_then(normalize_compact_date),
        gender: gender_display(patient),
        race: translated_display(patient, "raceCode"),
        ethnicity: translated_display(patient, "ethnicGroupCode"),
        marital_status: translated_display(patient, "maritalStatusCode"),
        address: address(patient_role),
        home_phone: None,
        mobile_phone: None,
        email: None,
        languages: languages(patient),
        patient_id,
    };
    let record = with_telecoms(record, patient_role);

    debug!("extracted demographics for patient {}", record.patient_id);
    Ok(record)
}

/// Given names joined across all `name` elements; first family name wins.
fn names(patient: &Element) -> (String, String) {
    let first = patient
        .children("name")
        .flat_map(|n| n.children("given"))
        .filter_map(|g| g.text())
        .collect::<Vec<_>>()
        .join(" ");
    let last = patient
        .children("name")
        .find_map(|n| n.child("family").and_then(|f| f.text()))
        .unwrap_or_default()
        .to_string();
    (first, last)
}

/// Display name carried by the `translation` child of a coded element,
/// falling back to [`UNKNOWN`].
fn translated_display(patient: Option<&Element>, code_element: &str) -> String {
    patient
        .and_then(|p| p.child(code_element))
        .and_then(|c| c.child("translation"))
        .and_then(|t| t.attr("displayName"))
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Gender prefers the translation display name; otherwise the raw
/// administrative code is mapped, and anything unrecognized is [`UNKNOWN`].
fn gender_display(patient: Option<&Element>) -> String {
    let Some(code_el) = patient.and_then(|p| p.child("administrativeGenderCode")) else {
        return UNKNOWN.to_string();
    };
    if let Some(display) = code_el.child("translation").and_then(|t| t.attr("displayName")) {
        return display.to_string();
    }
    match code_el.attr("code") {
        Some("M") => "Male",
        Some("F") => "Female",
        Some("O") => "Other",
        _ => UNKNOWN,
    }
    .to_string()
}

/// Street lines, city, state and postal code joined with ", ", keeping only
/// the parts that are present.
fn address(patient_role: &Element) -> Option<String> {
    let addr = patient_role.child("addr")?;
    let mut parts: Vec<&str> = addr
        .children("streetAddressLine")
        .filter_map(|line| line.text())
        .collect();
    for field in ["city", "state", "postalCode"] {
        if let Some(text) = addr.child(field).and_then(|e| e.text()) {
            parts.push(text);
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Classify every telecom in document order; on duplicates the later
/// element overwrites the slot.
fn with_telecoms(mut record: PatientRecord, patient_role: &Element) -> PatientRecord {
    for telecom in patient_role.children("telecom") {
        let use_code = telecom.attr("use").unwrap_or_default();
        let value = telecom.attr("value").unwrap_or_default();
        match telecom::classify(use_code, value) {
            Some((TelecomKind::HomePhone, v)) => record.home_phone = Some(v),
            Some((TelecomKind::MobilePhone, v)) => record.mobile_phone = Some(v),
            Some((TelecomKind::Email, v)) => record.email = Some(v),
            None => {}
        }
    }
    record
}

/// Deduplicated, lowercased language codes in sorted order.
fn languages(patient: Option<&Element>) -> Vec<String> {
    let Some(patient) = patient else {
        return Vec::new();
    };
    let codes: BTreeSet<String> = patient
        .children("languageCommunication")
        .filter_map(|lc| lc.child("languageCode"))
        .filter_map(|code| code.attr("code"))
        .map(|code| code.to_ascii_lowercase())
        .collect();
    codes.into_iter().collect()
}
