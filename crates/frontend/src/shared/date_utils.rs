//! Utilities for date and time formatting
//!
//! Provides consistent date/time formatting across the application

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// `DD.MM.YYYY HH:MM:SS`, fractional seconds dropped
pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Today in the user's time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Day before `today`. Reports default to it
pub fn yesterday_of(today: NaiveDate) -> NaiveDate {
    today - Duration::days(1)
}

pub fn yesterday() -> NaiveDate {
    yesterday_of(today())
}

/// Window of `days` days ending on `end` (inclusive)
pub fn last_days(end: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let span = i64::from(days.max(1)) - 1;
    (end - Duration::days(span), end)
}

/// Parse `YYYY-MM-DD` as produced by `<input type="date">`
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `DD.MM.YYYY` label of a date
pub fn format_day(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        let datetime = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_milli_opt(14, 2, 26, 123)
            .unwrap();
        assert_eq!(format_datetime(datetime), "15.03.2024 14:02:26");
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_datetime(midnight), "05.01.2024 00:00:00");
    }

    #[test]
    fn test_yesterday_and_window() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(yesterday_of(today), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
        assert_eq!(
            last_days(today, 7),
            (NaiveDate::from_ymd_opt(2024, 4, 25).unwrap(), today)
        );
        assert_eq!(last_days(today, 0), (today, today));
    }

    #[test]
    fn test_iso_roundtrip_from_input() {
        let date = parse_iso_date("2024-05-01").unwrap();
        assert_eq!(to_iso(date), "2024-05-01");
        assert_eq!(format_day(date), "01.05.2024");
        assert_eq!(parse_iso_date(""), None);
        assert_eq!(parse_iso_date("01.05.2024"), None);
    }
}
