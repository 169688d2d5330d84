use chrono::{NaiveDateTime, Timelike};

const MILLIS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const MICROS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Shows milliseconds unless the instant carries finer fractions, so a
/// `.123456` input is not cut to `.123`.
pub fn format_timestamp(instant: &NaiveDateTime) -> String {
    let format = if instant.nanosecond() % 1_000_000 == 0 {
        MILLIS_FORMAT
    } else {
        MICROS_FORMAT
    };
    instant.format(format).to_string()
}

pub mod timestamp {
    use super::format_timestamp;
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S>(instant: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(format_timestamp(instant).as_str())
    }
}
