//! Medication display-name cleanup
//!
//! Upstream systems squash the dose into the medication's display name
//! ("Lisinopril 10mg Oral Tablet"). The splitter pulls the first
//! number-plus-unit token out so the dose can live in its own field, and
//! the casing helpers put display strings into a consistent shape.
//!
//! This is best-effort string surgery over display data, not coded data:
//! names that interleave digits and units ambiguously may mis-split, and
//! callers treat the result accordingly.

use std::sync::LazyLock;

use regex::Regex;

static DOSE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*([A-Za-z]+(?:/[A-Za-z]+)?)").unwrap());

/// Split a display name into the cleaned name and an isolated dose token.
///
/// `"Lisinopril 10mg Tablet"` becomes `("Lisinopril Tablet", Some("10 mg"))`.
/// Only the first token is extracted; a name with no token comes back
/// unchanged apart from whitespace collapse.
pub fn split_dosage(display: &str) -> (String, Option<String>) {
    let Some(caps) = DOSE_TOKEN.captures(display) else {
        return (collapse_whitespace(display), None);
    };
    let token = caps.get(0).unwrap();
    let dosage = format!("{} {}", &caps[1], &caps[2]);

    let mut name = String::with_capacity(display.len());
    name.push_str(&display[..token.start()]);
    name.push(' ');
    name.push_str(&display[token.end()..]);
    (collapse_whitespace(&name), Some(dosage))
}

/// Uppercase the first letter of every word, lowercasing the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first letter only, lowercasing everything after it.
pub fn sentence_case(text: &str) -> String {
    capitalize_word(text.trim())
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_attached_and_spaced_doses() {
        assert_eq!(
            split_dosage("Lisinopril 10mg Oral Tablet"),
            ("Lisinopril Oral Tablet".to_string(), Some("10 mg".to_string()))
        );
        assert_eq!(
            split_dosage("Metformin 500 mg Tablet"),
            ("Metformin Tablet".to_string(), Some("500 mg".to_string()))
        );
    }

    #[test]
    fn handles_decimal_doses_and_compound_units() {
        assert_eq!(
            split_dosage("Insulin 0.5 mL/hr Solution"),
            ("Insulin Solution".to_string(), Some("0.5 mL/hr".to_string()))
        );
    }

    #[test]
    fn name_without_dose_is_untouched() {
        assert_eq!(
            split_dosage("Aspirin Tablet"),
            ("Aspirin Tablet".to_string(), None)
        );
    }

    #[test]
    fn splitting_a_cleaned_name_changes_nothing() {
        let (cleaned, dose) = split_dosage("Lisinopril 10mg Oral Tablet");
        assert_eq!(dose.as_deref(), Some("10 mg"));
        assert_eq!(split_dosage(&cleaned), (cleaned.clone(), None));
    }

    #[test]
    fn only_first_token_is_extracted() {
        let (name, dose) = split_dosage("Amoxicillin 250mg per 5mL Suspension");
        assert_eq!(dose.as_deref(), Some("250 mg"));
        assert_eq!(name, "Amoxicillin per 5mL Suspension");
    }

    #[test]
    fn whitespace_left_by_extraction_is_collapsed() {
        let (name, _) = split_dosage("  Lisinopril   10 mg   Tablet ");
        assert_eq!(name, "Lisinopril Tablet");
    }

    #[test]
    fn title_case_normalizes_each_word() {
        assert_eq!(title_case("lisinopril oral tablet"), "Lisinopril Oral Tablet");
        assert_eq!(title_case("ASPIRIN"), "Aspirin");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn sentence_case_touches_only_the_first_letter() {
        assert_eq!(
            sentence_case("take with FOOD in the morning"),
            "Take with food in the morning"
        );
        assert_eq!(sentence_case(""), "");
    }
}
