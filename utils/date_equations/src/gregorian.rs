//! Gregorian Date Calculations
//!
//! This module contains the leap year, month length and weekday rules,
//! while the `epoch_days` submodule maps dates to and from a linear day
//! count where 1970-01-01 is day zero.
//!
//! ## Epoch day scale
//!
//! | Significant Date    | Day from 0000-01-01 | Epoch day           |
//! | --------------------|---------------------|---------------------|
//! | January 1, 0        | 0                   | -719,528            |
//! | March 1, 0          | 60                  | -719,468            |
//! | January 1, 1970     | 719,528             | 0                   |
//! | January 1, 2000     | 730,485             | 10,957              |
//!

pub mod epoch_days;

pub use epoch_days::{
    epoch_days_from_gregorian_date as epoch_days_from_date,
    gregorian_ymd_from_epoch_days as ymd_from_epoch_days, DAYS_PER_CYCLE, DAYS_ZERO_TO_1970,
};

/// Cumulative days before the first of each month in a common year.
///
/// Index 12 holds the length of a common year.
pub const DAYS_BEFORE_MONTH: [u16; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

/// Returns whether `year` is a leap year.
///
/// A year is a leap year when it is divisible by 4, except for
/// centuries that are not divisible by 400. Year 0 and negative
/// years follow the same rule.
#[inline]
pub const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in `year`.
#[inline]
pub const fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the number of days in `month` of `year`.
///
/// `month` must be in `1..=12`.
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    debug_assert!(month >= 1 && month <= 12);
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns the ordinal day of `year` for a valid `month` and `day`, starting at 1.
pub const fn day_of_year(year: i64, month: u8, day: u8) -> u16 {
    debug_assert!(month >= 1 && month <= 12);
    let leap_day = (month > 2 && is_leap_year(year)) as u16;
    DAYS_BEFORE_MONTH[month as usize - 1] + leap_day + day as u16
}

/// Returns the day of the week for a valid date, where Sunday is 0
/// and Saturday is 6.
///
/// The count is taken from 0001-01-01, a Monday, with floored
/// division so that years before 1 land on the right weekday.
pub const fn day_of_week(year: i64, month: u8, day: u8) -> u8 {
    let last_year = year - 1;
    let days_before_year = last_year * 365 + last_year.div_euclid(4) - last_year.div_euclid(100)
        + last_year.div_euclid(400);
    let total = days_before_year + day_of_year(year, month, day) as i64 - 1;
    (total + 1).rem_euclid(7) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-1));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
        assert!(!is_leap_year(999_999_999));
        assert!(is_leap_year(-999_999_600));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(-4, 2), 29);
        let total: u16 = (1..=12).map(|m| days_in_month(2024, m) as u16).sum();
        assert_eq!(total, days_in_year(2024));
    }

    #[test]
    fn ordinal_days() {
        assert_eq!(day_of_year(2023, 1, 1), 1);
        assert_eq!(day_of_year(2023, 12, 31), 365);
        assert_eq!(day_of_year(2024, 12, 31), 366);
        assert_eq!(day_of_year(2024, 3, 1), 61);
        assert_eq!(day_of_year(2023, 3, 1), 60);
    }

    #[test]
    fn known_weekdays() {
        // 2000-01-01 was a Saturday.
        assert_eq!(day_of_week(2000, 1, 1), 6);
        // 1970-01-01 was a Thursday.
        assert_eq!(day_of_week(1970, 1, 1), 4);
        assert_eq!(day_of_week(2024, 2, 29), 4);
        assert_eq!(day_of_week(1, 1, 1), 1);
        assert_eq!(day_of_week(0, 12, 31), 0);
    }

    #[test]
    fn weekday_matches_epoch_days() {
        for epoch_days in (-1_000_000..1_000_000).step_by(7919).chain(-800..800) {
            let (year, month, day) = ymd_from_epoch_days(epoch_days);
            let expected = (epoch_days + 4).rem_euclid(7) as u8;
            assert_eq!(day_of_week(year, month, day), expected, "{year}-{month}-{day}");
        }
        for year in [-999_999_999, -123_456_789, 123_456_789, 999_999_999] {
            let epoch_days = epoch_days_from_date(year, 7, 15);
            let expected = (epoch_days + 4).rem_euclid(7) as u8;
            assert_eq!(day_of_week(year, 7, 15), expected);
        }
    }
}
