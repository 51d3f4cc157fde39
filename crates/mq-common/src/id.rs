//! Report identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one evaluation run and the artifacts written from it.
///
/// Format: `mq-YYYYMMDD-HHMMSS-XXXX`
/// Example: `mq-20261016-143022-a7xq`
///
/// The id is never part of the report body, so two evaluations of the same
/// input serialize identically regardless of when they ran.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl ReportId {
    /// Generate a new report ID.
    pub fn new() -> Self {
        Self::at(chrono::Utc::now())
    }

    /// Generate a report ID stamped with the given instant.
    pub fn at(now: chrono::DateTime<chrono::Utc>) -> Self {
        ReportId(format!(
            "mq-{}-{}-{}",
            now.format("%Y%m%d"),
            now.format("%H%M%S"),
            generate_base32_suffix()
        ))
    }

    /// Parse an existing report ID string.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != 23 || !s.is_ascii() {
            return None;
        }
        let bytes = s.as_bytes();
        if &bytes[0..3] != b"mq-" || bytes[11] != b'-' || bytes[18] != b'-' {
            return None;
        }
        let date = &s[3..11];
        let time = &s[12..18];
        let suffix = &s[19..23];
        if !date.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !time.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !suffix.chars().all(|c| matches!(c, 'a'..='z' | '2'..='7')) {
            return None;
        }
        Some(ReportId(s.to_string()))
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn generate_base32_suffix() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    let value = (((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | (bytes[2] as u32))
        & 0x000F_FFFF;
    let alphabet = b"abcdefghijklmnopqrstuvwxyz234567";
    [15_u32, 10, 5, 0]
        .iter()
        .map(|shift| alphabet[((value >> shift) & 0x1F) as usize] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_id_roundtrips_through_parse() {
        let id = ReportId::new();
        assert!(id.0.starts_with("mq-"));
        assert_eq!(id.0.len(), 23);
        assert_eq!(ReportId::parse(&id.0), Some(id));
    }

    #[test]
    fn stamped_with_given_instant() {
        let t = chrono::Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 22).unwrap();
        let id = ReportId::at(t);
        assert!(id.0.starts_with("mq-20260115-143022-"));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(ReportId::parse("pt-20260115-143022-a7xq").is_none());
        assert!(ReportId::parse("mq-2026011-143022-a7xqq").is_none());
        assert!(ReportId::parse("mq-20260115-143022-A7XQ").is_none());
        assert!(ReportId::parse("mq-20260115-143022-a7x1").is_none());
        assert!(ReportId::parse("").is_none());
    }
}
