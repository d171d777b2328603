//! Telecom classification
//!
//! A patient's `telecom` elements mix phones and email addresses behind a
//! `use` code and a scheme-prefixed value. Classification checks the codes
//! in one fixed order: `HP` (home phone), then `MC` (mobile), then a code
//! containing `H` combined with an email-shaped value. Elements matching
//! none of these are skipped, and when the same slot matches twice the
//! later element wins.

use std::borrow::Cow;

/// Sentinel distinguishing a telecom that was present but carried no usable
/// value from one that never appeared at all (which stays `None` and keeps
/// the caller's default).
pub const NONE_SENTINEL: &str = "None";

/// Slot a classified telecom lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelecomKind {
    HomePhone,
    MobilePhone,
    Email,
}

/// Classify one telecom element from its `use` code and raw value.
///
/// Returns the slot plus the cleaned value, with `tel:`/`mailto:` scheme
/// prefixes removed and placeholder values (`none`, `null`, empty) replaced
/// by [`NONE_SENTINEL`].
pub fn classify(use_code: &str, raw_value: &str) -> Option<(TelecomKind, String)> {
    let raw = raw_value.trim();
    let is_email_scheme = has_scheme(raw, "mailto:");
    let value = strip_scheme(raw);

    let use_lower = use_code.to_ascii_lowercase();
    let kind = if use_lower.contains("hp") {
        TelecomKind::HomePhone
    } else if use_lower.contains("mc") {
        TelecomKind::MobilePhone
    } else if use_lower.contains('h') && (is_email_scheme || value.contains('@')) {
        TelecomKind::Email
    } else {
        return None;
    };

    let cleaned = if value.is_empty()
        || value.eq_ignore_ascii_case("none")
        || value.eq_ignore_ascii_case("null")
    {
        NONE_SENTINEL.to_string()
    } else {
        value.into_owned()
    };
    Some((kind, cleaned))
}

fn has_scheme(raw: &str, scheme: &str) -> bool {
    raw.get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
}

fn strip_scheme(raw: &str) -> Cow<'_, str> {
    for scheme in ["tel:", "mailto:"] {
        if has_scheme(raw, scheme) {
            return Cow::Borrowed(raw[scheme.len()..].trim());
        }
    }
    Cow::Borrowed(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_phone_strips_tel_scheme() {
        assert_eq!(
            classify("HP", "tel:+1-555-0100"),
            Some((TelecomKind::HomePhone, "+1-555-0100".to_string()))
        );
    }

    #[test]
    fn mobile_phone_by_mc_code() {
        assert_eq!(
            classify("MC", "tel:+1-555-0199"),
            Some((TelecomKind::MobilePhone, "+1-555-0199".to_string()))
        );
    }

    #[test]
    fn email_requires_h_code_and_email_shape() {
        assert_eq!(
            classify("H", "mailto:pat@example.com"),
            Some((TelecomKind::Email, "pat@example.com".to_string()))
        );
        // An H-coded value with an @ counts even without the scheme prefix.
        assert_eq!(
            classify("H", "pat@example.com"),
            Some((TelecomKind::Email, "pat@example.com".to_string()))
        );
        // H-coded but phone-shaped matches nothing.
        assert_eq!(classify("H", "tel:+1-555-0100"), None);
    }

    #[test]
    fn hp_takes_priority_over_email_shape() {
        // Decision order is fixed: HP first, even for an @-bearing value.
        assert_eq!(
            classify("HP", "mailto:pat@example.com"),
            Some((TelecomKind::HomePhone, "pat@example.com".to_string()))
        );
    }

    #[test]
    fn placeholder_values_become_the_sentinel() {
        assert_eq!(
            classify("HP", "none"),
            Some((TelecomKind::HomePhone, NONE_SENTINEL.to_string()))
        );
        assert_eq!(
            classify("MC", "NULL"),
            Some((TelecomKind::MobilePhone, NONE_SENTINEL.to_string()))
        );
        assert_eq!(
            classify("HP", ""),
            Some((TelecomKind::HomePhone, NONE_SENTINEL.to_string()))
        );
    }

    #[test]
    fn unrecognized_use_codes_are_skipped() {
        assert_eq!(classify("WP", "tel:+1-555-0100"), None);
        assert_eq!(classify("", "tel:+1-555-0100"), None);
    }
}
