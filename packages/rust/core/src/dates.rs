//! Publish dates supplied in configuration for URL-list posts.
//!
//! Strings are parsed leniently and normalized to UTC. Timestamps without a
//! zone are taken as UTC; a bare date is midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use extposts_shared::{ExtPostsError, Result};

const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Convert a `published_date` config value to a UTC timestamp.
///
/// Accepts TOML strings and TOML date/datetime values. Anything else, or a
/// string no known format matches, is a config error.
pub fn parse_published_date(value: &toml::Value) -> Result<DateTime<Utc>> {
    let parsed = match value {
        toml::Value::String(s) => parse_lenient(s),
        toml::Value::Datetime(dt) => parse_lenient(&dt.to_string()),
        _ => None,
    };

    parsed.ok_or_else(|| ExtPostsError::config(format!("invalid date format for {value}")))
}

/// Try every supported shape in turn.
pub fn parse_lenient(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = ZONED_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    // "UTC"/"GMT" suffixes name the zone we assume anyway.
    let naive = s
        .strip_suffix(" UTC")
        .or_else(|| s.strip_suffix(" GMT"))
        .unwrap_or(s);

    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
    {
        return Some(dt.and_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(naive, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn string(s: &str) -> toml::Value {
        toml::Value::String(s.into())
    }

    #[test]
    fn date_only_is_midnight_utc() {
        let parsed = parse_published_date(&string("2024-01-05")).unwrap();
        assert_eq!(parsed, utc(2024, 1, 5, 0, 0, 0));
    }

    #[test]
    fn offsets_are_normalized() {
        assert_eq!(
            parse_published_date(&string("2024-01-05T10:30:00+02:00")).unwrap(),
            utc(2024, 1, 5, 8, 30, 0)
        );
        assert_eq!(
            parse_published_date(&string("2024-01-05 10:30:00 -0500")).unwrap(),
            utc(2024, 1, 5, 15, 30, 0)
        );
        assert_eq!(
            parse_published_date(&string("Fri, 05 Jan 2024 10:30:00 GMT")).unwrap(),
            utc(2024, 1, 5, 10, 30, 0)
        );
    }

    #[test]
    fn naive_datetimes_are_utc() {
        assert_eq!(
            parse_published_date(&string("2024-01-05 10:30:00")).unwrap(),
            utc(2024, 1, 5, 10, 30, 0)
        );
        assert_eq!(
            parse_published_date(&string("2024-01-05 10:30:00 UTC")).unwrap(),
            utc(2024, 1, 5, 10, 30, 0)
        );
    }

    #[test]
    fn written_out_dates() {
        assert_eq!(
            parse_published_date(&string("March 3, 2023")).unwrap(),
            utc(2023, 3, 3, 0, 0, 0)
        );
        assert_eq!(
            parse_published_date(&string("3 March 2023")).unwrap(),
            utc(2023, 3, 3, 0, 0, 0)
        );
    }

    #[test]
    fn toml_datetime_values() {
        let doc: toml::Table = toml::from_str(
            "a = 2024-01-05\nb = 2024-01-05T10:30:00Z\nc = 2024-01-05T10:30:00",
        )
        .unwrap();

        assert_eq!(parse_published_date(&doc["a"]).unwrap(), utc(2024, 1, 5, 0, 0, 0));
        assert_eq!(parse_published_date(&doc["b"]).unwrap(), utc(2024, 1, 5, 10, 30, 0));
        assert_eq!(parse_published_date(&doc["c"]).unwrap(), utc(2024, 1, 5, 10, 30, 0));
    }

    #[test]
    fn garbage_string_is_config_error() {
        let err = parse_published_date(&string("not-a-date-at-all")).unwrap_err();
        assert!(matches!(err, ExtPostsError::Config { .. }));
        assert!(err.to_string().contains("not-a-date-at-all"));
    }

    #[test]
    fn wrong_type_is_config_error() {
        let err = parse_published_date(&toml::Value::Integer(42)).unwrap_err();
        assert_eq!(err.to_string(), "config error: invalid date format for 42");

        assert!(parse_published_date(&toml::Value::Boolean(true)).is_err());
    }

    #[test]
    fn time_only_value_is_rejected() {
        let doc: toml::Table = toml::from_str("t = 10:30:00").unwrap();
        assert!(parse_published_date(&doc["t"]).is_err());
    }
}
