//! Weekly time slot validation.
//!
//! Slots are stored as a weekday name plus `HH:MM` 24-hour start and end
//! times, exactly as the scheduling form submits them.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Weekday names in calendar order (Monday first).
pub const WEEKDAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid time regex"));

/// Zero-based position of `day` within [`WEEKDAYS`].
pub fn weekday_index(day: &str) -> Option<usize> {
    WEEKDAYS.iter().position(|d| *d == day)
}

/// Validate that `day` is a capitalised English weekday name.
pub fn validate_day(day: &str) -> Result<(), CoreError> {
    weekday_index(day).map(|_| ()).ok_or_else(|| {
        CoreError::Validation(format!("Invalid day '{day}'. Must be one of: {WEEKDAYS:?}"))
    })
}

/// Parse an `HH:MM` string into minutes since midnight.
pub fn parse_time(value: &str) -> Result<u32, CoreError> {
    let caps = TIME_RE.captures(value).ok_or_else(|| {
        CoreError::Validation(format!("Invalid time '{value}'. Expected HH:MM (24-hour)"))
    })?;
    // Both groups are guaranteed to be two ASCII digits by the regex.
    let hours: u32 = caps[1].parse().unwrap_or_default();
    let minutes: u32 = caps[2].parse().unwrap_or_default();
    Ok(hours * 60 + minutes)
}

/// Validate a full slot definition: known day, well-formed times, and a
/// start strictly before the end.
pub fn validate_slot(day: &str, start_time: &str, end_time: &str) -> Result<(), CoreError> {
    validate_day(day)?;
    let start = parse_time(start_time)?;
    let end = parse_time(end_time)?;
    if start >= end {
        return Err(CoreError::Validation(format!(
            "Start time {start_time} must be before end time {end_time}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parse_valid_times() {
        assert_eq!(parse_time("00:00").unwrap(), 0);
        assert_eq!(parse_time("09:30").unwrap(), 570);
        assert_eq!(parse_time("23:59").unwrap(), 1439);
    }

    #[test]
    fn parse_rejects_malformed_times() {
        for bad in ["24:00", "9:30", "09:60", "0930", "", "ab:cd", "09:30:00"] {
            assert_matches!(parse_time(bad), Err(CoreError::Validation(_)), "{bad}");
        }
    }

    #[test]
    fn weekday_order_starts_monday() {
        assert_eq!(weekday_index("Monday"), Some(0));
        assert_eq!(weekday_index("Sunday"), Some(6));
        assert_eq!(weekday_index("monday"), None);
    }

    #[test]
    fn valid_slot_passes() {
        assert!(validate_slot("Friday", "16:00", "17:30").is_ok());
    }

    #[test]
    fn slot_with_end_before_start_fails() {
        assert!(validate_slot("Friday", "17:30", "16:00").is_err());
    }

    #[test]
    fn zero_length_slot_fails() {
        assert!(validate_slot("Friday", "16:00", "16:00").is_err());
    }

    #[test]
    fn slot_with_unknown_day_fails() {
        assert!(validate_slot("Funday", "16:00", "17:00").is_err());
    }
}
