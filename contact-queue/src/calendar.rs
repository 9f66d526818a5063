//! Date arithmetic shared by the queue stages.

use chrono::{Datelike, NaiveDate};

/// Whole days from `from` to `to` (negative if `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Month and day match, year ignored.
///
/// A Feb 29 birthday only matches on leap years.
pub fn is_birthday(date_of_birth: Option<NaiveDate>, today: NaiveDate) -> bool {
    date_of_birth.is_some_and(|dob| dob.month() == today.month() && dob.day() == today.day())
}

/// `until` is set and strictly after `today`.
pub fn is_still_active(until: Option<NaiveDate>, today: NaiveDate) -> bool {
    until.is_some_and(|until| until > today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 20)), 19);
        assert_eq!(days_between(date(2024, 1, 20), date(2024, 1, 1)), -19);
        assert_eq!(days_between(date(2023, 12, 31), date(2024, 3, 1)), 61);
    }

    #[test]
    fn test_is_birthday_ignores_year() {
        let today = date(2024, 6, 15);
        assert!(is_birthday(Some(date(1999, 6, 15)), today));
        assert!(!is_birthday(Some(date(1999, 6, 16)), today));
        assert!(!is_birthday(None, today));
        assert!(!is_birthday(Some(date(2000, 2, 29)), date(2023, 2, 28)));
        assert!(is_birthday(Some(date(2000, 2, 29)), date(2024, 2, 29)));
    }

    #[test]
    fn test_is_still_active_is_strict() {
        let today = date(2024, 6, 15);
        assert!(is_still_active(Some(date(2024, 6, 16)), today));
        assert!(!is_still_active(Some(today), today));
        assert!(!is_still_active(None, today));
    }
}
