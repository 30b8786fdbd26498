// Epoch day equations.
//
// The inverse direction works on a year that starts on March 1 so the
// leap day is the last day of the computational year. Negative day counts
// are first shifted forward by whole 400 year cycles, which keeps every
// division in the estimate on non-negative operands.

use super::is_leap_year;

/// The number of days in a 400 year Gregorian cycle.
pub const DAYS_PER_CYCLE: i64 = 146_097;

/// The day number of 1970-01-01 counted from 0000-01-01.
pub const DAYS_ZERO_TO_1970: i64 = DAYS_PER_CYCLE * 5 - (30 * 365 + 7);

// 0000-01-01 to 0000-03-01, year 0 being a leap year.
const DAYS_ZERO_TO_MARCH: i64 = 60;

/// Returns the epoch day of a date.
///
/// `month` must be in `1..=12`. `day` is applied linearly, so a day
/// outside the month (e.g. day 0 or day 45) counts on from the first of
/// the month.
pub const fn epoch_days_from_gregorian_date(year: i64, month: u8, day: i64) -> i64 {
    debug_assert!(month >= 1 && month <= 12);
    let month = month as i64;
    let mut total = 365 * year;
    if year >= 0 {
        total += (year + 3) / 4 - (year + 99) / 100 + (year + 399) / 400;
    } else {
        total -= year / -4 - year / -100 + year / -400;
    }
    total += (367 * month - 362) / 12;
    total += day - 1;
    if month > 2 {
        total -= 1;
        if !is_leap_year(year) {
            total -= 1;
        }
    }
    total - DAYS_ZERO_TO_1970
}

/// Returns the `(year, month, day)` of an epoch day.
pub const fn gregorian_ymd_from_epoch_days(epoch_days: i64) -> (i64, u8, u8) {
    let mut zero_day = epoch_days + DAYS_ZERO_TO_1970 - DAYS_ZERO_TO_MARCH;
    let mut adjust = 0;
    if zero_day < 0 {
        let adjust_cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
        adjust = adjust_cycles * 400;
        zero_day += -adjust_cycles * DAYS_PER_CYCLE;
    }
    let mut year_est = (400 * zero_day + 591) / DAYS_PER_CYCLE;
    let mut doy_est = zero_day - days_before_march_year(year_est);
    if doy_est < 0 {
        year_est -= 1;
        doy_est = zero_day - days_before_march_year(year_est);
    }
    year_est += adjust;

    let march_month0 = (doy_est * 5 + 2) / 153;
    let month = (march_month0 + 2) % 12 + 1;
    let day = doy_est - (march_month0 * 306 + 5) / 10 + 1;
    let year = year_est + march_month0 / 10;
    (year, month as u8, day as u8)
}

// Days from 0000-03-01 to the March 1 that starts `year`.
const fn days_before_march_year(year: i64) -> i64 {
    365 * year + year / 4 - year / 100 + year / 400
}
