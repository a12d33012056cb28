//! Parsing of the event timestamps exported by the mail client.
//!
//! Timestamps look like `2024-03-01 09:00:00`, optionally followed by a
//! fractional-seconds part (`.123456`) and/or a timezone offset
//! (`+09:00`). Both suffixes are discarded before parsing; the wall-clock
//! value is taken as-is.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

/// Format every event timestamp must match once suffixes are stripped.
pub const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Drop everything from the first `+`, then everything from the first `.`.
///
/// Negative offsets such as `-05:00` are not stripped, so those
/// timestamps fail to parse.
pub fn strip_suffix(raw: &str) -> &str {
    let without_offset = raw.split('+').next().unwrap_or(raw);
    without_offset.split('.').next().unwrap_or(without_offset)
}

/// Parse an event timestamp, returning `None` if it doesn't match.
pub fn parse_event_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(strip_suffix(raw), EVENT_TIMESTAMP_FORMAT).ok()
}

/// Day heading label, e.g. `2024年03月01日(金)`.
pub fn date_label(day: NaiveDate) -> String {
    format!(
        "{}({})",
        day.format("%Y年%m月%d日"),
        weekday_abbrev(day.weekday())
    )
}

/// Clock label, e.g. `09:00`.
pub fn time_label(at: &NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "月",
        Weekday::Tue => "火",
        Weekday::Wed => "水",
        Weekday::Thu => "木",
        Weekday::Fri => "金",
        Weekday::Sat => "土",
        Weekday::Sun => "日",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_offset() {
        assert_eq!(strip_suffix("2024-03-01 09:00:00+09:00"), "2024-03-01 09:00:00");
    }

    #[test]
    fn test_strip_fraction_and_offset() {
        assert_eq!(
            strip_suffix("2024-03-01 09:00:00.123456+00:00"),
            "2024-03-01 09:00:00"
        );
    }

    #[test]
    fn test_strip_fraction_without_offset() {
        assert_eq!(strip_suffix("2024-03-01 09:00:00.5"), "2024-03-01 09:00:00");
        let at = parse_event_timestamp("2024-03-01 09:00:00.5").unwrap();
        assert_eq!(time_label(&at), "09:00");
    }

    #[test]
    fn test_strip_plain() {
        assert_eq!(strip_suffix("2024-03-01 09:00:00"), "2024-03-01 09:00:00");
    }

    #[test]
    fn test_parse_with_offset() {
        let at = parse_event_timestamp("2024-03-01 09:00:00+09:00").unwrap();
        assert_eq!(date_label(at.date()), "2024年03月01日(金)");
        assert_eq!(time_label(&at), "09:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_event_timestamp("tomorrow").is_none());
        assert!(parse_event_timestamp("").is_none());
        assert!(parse_event_timestamp("2024-03-01T09:00:00").is_none());
        assert!(parse_event_timestamp("2024-03-01 09:00").is_none());
    }

    #[test]
    fn test_negative_offset_is_not_stripped() {
        assert!(parse_event_timestamp("2024-03-01 09:00:00-05:00").is_none());
    }

    #[test]
    fn test_weekday_labels() {
        let sunday = parse_event_timestamp("2024-03-03 00:00:00").unwrap();
        assert_eq!(date_label(sunday.date()), "2024年03月03日(日)");
        let monday = parse_event_timestamp("2024-03-04 23:59:59").unwrap();
        assert_eq!(date_label(monday.date()), "2024年03月04日(月)");
    }
}
