//! Date helpers
//!
//! Calendar dates are stored as `YYYY-MM-DD` strings, timestamps as Unix
//! millis (UTC).

use chrono::{Datelike, NaiveDate};

use super::{AppError, AppResult};

/// Parse a `YYYY-MM-DD` query parameter
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 00:00:00 UTC of `date` in Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// 00:00:00 UTC of the following day; use with `<` (exclusive)
pub fn day_end_millis(date: NaiveDate) -> i64 {
    day_start_millis(date.succ_opt().unwrap_or(date))
}

/// First day of `date`'s month
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
        assert!(parse_date("10/01/2025").is_err());
    }

    #[test]
    fn test_day_bounds() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(day_end_millis(d) - day_start_millis(d), 86_400_000);
        assert_eq!(day_start_millis(d), 1_736_467_200_000);
    }

    #[test]
    fn test_month_start() {
        let d = NaiveDate::from_ymd_opt(2025, 2, 17).unwrap();
        assert_eq!(month_start(d), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }
}
