//! Strict `YYYY-MM-DD` parsing and formatting for record dates.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

static RECORD_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid record date regex"));

/// Parses a zero-padded `YYYY-MM-DD` string.
///
/// Returns `None` for unpadded fields, trailing text or impossible days.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    if !RECORD_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, RECORD_DATE_FORMAT).ok()
}

/// Formats a date as zero-padded `YYYY-MM-DD`.
pub fn format_record_date(date: NaiveDate) -> String {
    date.format(RECORD_DATE_FORMAT).to_string()
}

/// Serde adapter that keeps dates on the wire as `YYYY-MM-DD` text.
pub mod serde_format {
    use super::{format_record_date, parse_record_date};
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_record_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_record_date(&text).ok_or_else(|| {
            D::Error::custom(format!(
                "invalid record date `{text}`; expected YYYY-MM-DD"
            ))
        })
    }
}
