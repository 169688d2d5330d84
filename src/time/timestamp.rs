use crate::time::error::Error;
use chrono::NaiveDateTime;
use lazy_static::*;
use regex::Regex;

lazy_static! {
    static ref TIMESTAMP_REGEX: Regex = Regex::new(
        r"^(?P<civil>[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{1,6})(?P<offset>Z|[+-][0-9]{2}:[0-9]{2})?$"
    )
    .expect("Regex compilation error");
}

const CIVIL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses a report timestamp such as `2024-03-01T10:00:02.500+05:30`.
///
/// The `Z` or `+HH:MM`/`-HH:MM` suffix is stripped and never applied: every
/// timestamp of a run is taken to be in the same local clock.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, Error> {
    let trimmed = value.trim();
    let caps = TIMESTAMP_REGEX.captures(trimmed).ok_or_else(|| {
        Error::Syntax(format!("'{}' is not a supported timestamp", value))
    })?;
    let civil = match caps.name("civil") {
        Some(civil) => civil.as_str(),
        None => return Err(Error::Syntax(format!("'{}' has no date part", value))),
    };
    NaiveDateTime::parse_from_str(civil, CIVIL_FORMAT)
        .map_err(|err| Error::OutOfRange(format!("'{}' is not a valid instant: {}", value, err)))
}

/// Elapsed seconds from `start` to `end`, negative when `end` precedes `start`.
pub fn duration_seconds(start: &NaiveDateTime, end: &NaiveDateTime) -> f64 {
    let elapsed = *end - *start;
    match elapsed.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000f64,
        None => elapsed.num_milliseconds() as f64 / 1_000f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn instant(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 3, 1).and_hms_micro(h, m, s, micro)
    }

    #[test]
    fn test_parsing_utc_suffix() {
        let result = parse_timestamp("2024-03-01T10:00:02.500Z");
        assert_eq!(result.unwrap(), instant(10, 0, 2, 500_000));
    }

    #[test]
    fn test_offset_is_discarded_not_applied() {
        let positive = parse_timestamp("2024-03-01T10:00:02.500+05:30").unwrap();
        let negative = parse_timestamp("2024-03-01T10:00:02.500-04:00").unwrap();
        assert_eq!(positive, instant(10, 0, 2, 500_000));
        assert_eq!(negative, positive);
    }

    #[test]
    fn test_parsing_without_suffix_and_with_padding() {
        let result = parse_timestamp("  2024-03-01T23:59:59.123456 ").unwrap();
        assert_eq!(result.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_rejects_unknown_layouts() {
        for value in &[
            "",
            "2024-03-01 10:00:00.000Z",
            "2024-03-01T10:00:00Z",
            "2024-03-01T10:00:00.000+0530",
            "2024-03-01T10:00:00.1234567Z",
            "10:00:00.000",
            "\u{0662}\u{0660}\u{0662}\u{0664}-03-01T10:00:00.000Z",
            "2024-03-01T10:00:00.000+\u{0660}5:30",
        ] {
            match parse_timestamp(value) {
                Err(Error::Syntax(_)) => {}
                other => panic!("unexpected result for {:?}: {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_rejects_impossible_dates() {
        let result = parse_timestamp("2024-13-01T10:00:00.000Z");
        assert!(matches!(result, Err(Error::OutOfRange(_))));
    }

    #[test]
    fn test_duration_between_instants() {
        let start = instant(10, 0, 0, 0);
        let end = instant(10, 0, 2, 500_000);
        assert_eq!(duration_seconds(&start, &end), 2.5);
        assert_eq!(duration_seconds(&end, &start), -2.5);
        assert_eq!(duration_seconds(&start, &start), 0.0);
    }
}
