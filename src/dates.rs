//! Date Helpers
//!
//! The API speaks `YYYY-MM-DD` everywhere; the list view defaults to the
//! current calendar month.

use chrono::{Datelike, Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    next_month.and_then(|first| first.pred_opt()).unwrap_or(date)
}

/// A date range is usable iff both ends parse and start does not come after
/// end. Inverted ranges never reach the API.
pub fn range_valid(start: &str, end: &str) -> bool {
    match (parse_ymd(start), parse_ymd(end)) {
        (Some(start), Some(end)) => start <= end,
        _ => false,
    }
}

fn parse_ymd(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_pads_with_zeros() {
        assert_eq!(format_ymd(date(2026, 3, 7)), "2026-03-07");
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_start(date(2026, 8, 29)), date(2026, 8, 1));
        assert_eq!(month_end(date(2026, 8, 29)), date(2026, 8, 31));
        assert_eq!(month_end(date(2026, 2, 10)), date(2026, 2, 28));
        assert_eq!(month_end(date(2024, 2, 10)), date(2024, 2, 29));
    }

    #[test]
    fn test_month_end_crosses_year() {
        assert_eq!(month_end(date(2026, 12, 5)), date(2026, 12, 31));
    }

    #[test]
    fn test_range_valid_orders_endpoints() {
        assert!(range_valid("2026-08-01", "2026-08-31"));
        assert!(range_valid("2026-08-15", "2026-08-15"));
        assert!(!range_valid("2026-08-31", "2026-08-01"));
    }

    #[test]
    fn test_range_valid_rejects_garbage() {
        assert!(!range_valid("", "2026-08-31"));
        assert!(!range_valid("2026-08-01", "31/08/2026"));
    }
}
