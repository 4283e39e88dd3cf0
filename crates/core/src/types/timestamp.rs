//! Timestamp (de)serialization for backend payloads.
//!
//! The backend echoes timestamps either with an offset
//! (`2026-10-19T12:30:00+00:00`) or naive (`2026-10-19T12:30:00`). Naive
//! values are taken as UTC. Outbound timestamps use millisecond precision
//! with a `Z` suffix.
//!
//! Use with `#[serde(with = "teezy_core::types::timestamp")]`.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a backend timestamp, accepting RFC 3339 or naive UTC forms.
#[must_use]
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Format a timestamp the way the order endpoint expects it.
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serialize a timestamp as ISO-8601 with millisecond precision.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

/// Deserialize a timestamp with or without an offset.
///
/// # Errors
///
/// Fails when the value is not a recognizable timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_parse_with_offset() {
        let dt = parse("2026-10-19T15:30:00+03:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 10, 19, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let dt = parse("2026-10-19T12:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 10, 19, 12, 30, 0).unwrap());

        let dt = parse("2026-10-19T12:30:00.123456").unwrap();
        assert_eq!(dt.timestamp_subsec_micros(), 123_456);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse("tomorrow at noon").is_none());
    }

    #[test]
    fn test_format_millis_z() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 19, 12, 30, 0).unwrap();
        assert_eq!(format(&dt), "2026-10-19T12:30:00.000Z");
    }
}
