//! Timestamp normalization
//!
//! Documents carry timestamps in two unrelated shapes. Machine-readable
//! attributes use the compact form: digits `YYYYMMDDHHMMSS`, possibly
//! truncated after the date, optionally followed by a signed 4-digit UTC
//! offset (`20230615140000+0500`). Narrative table cells use a 12-hour
//! clock (`06/15/2023 02:30:00 PM`) in the document's local time, with no
//! offset to correct by.
//!
//! Both normalize to canonical text: `YYYY-MM-DD HH:MM:SS` for timestamps,
//! `YYYY-MM-DD` for dates. Compact values with an offset are converted to
//! UTC; narrative values stay as local time, since applying a correction
//! they do not carry would fabricate precision.

use std::sync::LazyLock;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Canonical timestamp shape for every normalized record field.
pub const CANONICAL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";
/// Canonical date shape for date-only fields.
pub const CANONICAL_DATE: &str = "%Y-%m-%d";

/// Narrative format as written by upstream document generators.
const NARRATIVE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

static NARRATIVE_STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}:\d{2} [AP]M").unwrap()
});

static NARRATIVE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}").unwrap());

/// Normalize a compact timestamp to canonical `YYYY-MM-DD HH:MM:SS` text.
///
/// Fewer than eight leading digits, a calendar-invalid value, or trailing
/// junk that is not a well-formed offset all yield `None`; absence is the
/// uniform answer to any malformed value.
pub fn normalize_compact(raw: &str) -> Option<String> {
    parse_compact(raw).map(|dt| dt.format(CANONICAL_DATETIME).to_string())
}

/// Normalize a compact timestamp keeping only the date part.
pub fn normalize_compact_date(raw: &str) -> Option<String> {
    parse_compact(raw).map(|dt| dt.format(CANONICAL_DATE).to_string())
}

fn parse_compact(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let digit_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, rest) = trimmed.split_at(digit_end);
    if digits.len() < 8 || digits.len() > 14 {
        return None;
    }

    let year: i32 = digits[..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    // Truncated time components count as zero.
    let padded = format!("{:0<6}", &digits[8..]);
    let hour: u32 = padded[..2].parse().ok()?;
    let minute: u32 = padded[2..4].parse().ok()?;
    let second: u32 = padded[4..6].parse().ok()?;
    let local = date.and_hms_opt(hour, minute, second)?;

    if rest.is_empty() {
        return Some(local);
    }
    // A trailing offset shifts the local time back to UTC. The sign applies
    // to the whole hh:mm magnitude, so -0530 adds 5h30m.
    let offset = parse_offset(rest)?;
    local.checked_sub_signed(Duration::minutes(offset))
}

fn parse_offset(rest: &str) -> Option<i64> {
    let (sign, body) = match rest.strip_prefix('+') {
        Some(body) => (1i64, body),
        None => (-1i64, rest.strip_prefix('-')?),
    };
    if body.len() != 4 || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = body[..2].parse().ok()?;
    let minutes: i64 = body[2..].parse().ok()?;
    Some(sign * (hours * 60 + minutes))
}

/// True when a narrative cell's text starts with a `MM/DD/YYYY` date, the
/// cue that the cell is the row's date column.
pub fn looks_like_narrative_date(text: &str) -> bool {
    NARRATIVE_PREFIX.is_match(text.trim_start())
}

/// Normalize a narrative cell to canonical form.
///
/// The 12-hour timestamp is pulled out of the surrounding free text; when
/// no parseable stamp is present the trimmed original text is returned
/// verbatim, preserving whatever the document author wrote.
pub fn normalize_narrative(text: &str) -> String {
    let trimmed = text.trim();
    let Some(found) = NARRATIVE_STAMP.find(trimmed) else {
        return trimmed.to_string();
    };
    match NaiveDateTime::parse_from_str(found.as_str(), NARRATIVE_FORMAT) {
        Ok(dt) => dt.format(CANONICAL_DATETIME).to_string(),
        Err(_) => trimmed.to_string(),
    }
}
