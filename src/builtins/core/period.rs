//! This module implements `CalendarPeriod`.

use core::fmt;

use writeable::Writeable;

use crate::{
    iso::{IsoDate, IsoTime},
    parsers::FormattablePeriod,
};


/// A signed calendar displacement of years, months, days, hours, minutes,
/// seconds and nanoseconds.
///
/// Unlike the other value types, a `CalendarPeriod` is normalized every time
/// it is built or changed. The time fields are carried as a mixed radix
/// number, then the overflowing days are folded into months and years by
/// reading them back through a date in year `years`, month `months + 1`.
///
/// ```rust
/// use calendar_rs::CalendarPeriod;
///
/// let period = CalendarPeriod::new(0, 0, 0, 25, 0, 0, 0);
/// assert_eq!((period.days(), period.hours()), (1, 1));
///
/// let period = CalendarPeriod::new(0, 0, 0, 0, 0, 3661, 0);
/// assert_eq!((period.hours(), period.minutes(), period.seconds()), (1, 1, 1));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarPeriod {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    nanoseconds: i64,
}

// ==== Private API ====

impl CalendarPeriod {
    /// Creates a date only period exactly as given.
    ///
    /// The fields are the ones found by `CalendarDate::until`, and adding them
    /// back one at a time reproduces the end date. Folding the day field
    /// into months would break that, so the fields are kept as they are.
    #[inline]
    pub(crate) const fn from_date_difference(years: i64, months: i64, days: i64) -> Self {
        Self {
            years,
            months,
            days,
            hours: 0,
            minutes: 0,
            seconds: 0,
            nanoseconds: 0,
        }
    }

    fn balance(&self) -> Self {
        let (days, time) =
            IsoTime::new_unchecked(self.hours, self.minutes, self.seconds, self.nanoseconds)
                .balance();
        let date =
            IsoDate::new_unchecked(self.years, self.months + 1, self.days + days + 1).balance();
        Self {
            years: date.year,
            months: date.month - 1,
            days: date.day - 1,
            hours: time.hour,
            minutes: time.minute,
            seconds: time.second,
            nanoseconds: time.nanosecond,
        }
    }
}

// ==== Public API ====

impl CalendarPeriod {
    /// The empty period.
    pub const ZERO: Self = Self::from_date_difference(0, 0, 0);

    /// Creates a new normalized `CalendarPeriod`.
    #[must_use]
    pub fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        nanoseconds: i64,
    ) -> Self {
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            nanoseconds,
        }
        .balance()
    }

    /// Returns the years of this period.
    #[inline]
    #[must_use]
    pub const fn years(&self) -> i64 {
        self.years
    }

    /// Returns the months, from 0 to 11.
    #[inline]
    #[must_use]
    pub const fn months(&self) -> i64 {
        self.months
    }

    /// Returns the days left over after the months.
    #[inline]
    #[must_use]
    pub const fn days(&self) -> i64 {
        self.days
    }

    /// Returns the hours, from 0 to 23.
    #[inline]
    #[must_use]
    pub const fn hours(&self) -> i64 {
        self.hours
    }

    /// Returns the minutes, from 0 to 59.
    #[inline]
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        self.minutes
    }

    /// Returns the seconds, from 0 to 59.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the nanoseconds, from 0 to 999_999_999.
    #[inline]
    #[must_use]
    pub const fn nanoseconds(&self) -> i64 {
        self.nanoseconds
    }

    /// Returns whether every field is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Sets the years and normalizes the period.
    pub fn set_years(&mut self, years: i64) {
        self.years = years;
        *self = self.balance();
    }

    /// Sets the months and normalizes the period.
    ///
    /// Twelve or more months are carried into the years.
    pub fn set_months(&mut self, months: i64) {
        self.months = months;
        *self = self.balance();
    }

    /// Sets the days and normalizes the period.
    pub fn set_days(&mut self, days: i64) {
        self.days = days;
        *self = self.balance();
    }

    /// Sets the hours and normalizes the period.
    ///
    /// Whole days of hours are carried into the days.
    pub fn set_hours(&mut self, hours: i64) {
        self.hours = hours;
        *self = self.balance();
    }

    /// Sets the minutes and normalizes the period.
    pub fn set_minutes(&mut self, minutes: i64) {
        self.minutes = minutes;
        *self = self.balance();
    }

    /// Sets the seconds and normalizes the period.
    pub fn set_seconds(&mut self, seconds: i64) {
        self.seconds = seconds;
        *self = self.balance();
    }

    /// Sets the nanoseconds and normalizes the period.
    pub fn set_nanoseconds(&mut self, nanoseconds: i64) {
        self.nanoseconds = nanoseconds;
        *self = self.balance();
    }

    /// Returns a normalized copy of this period with the years replaced.
    #[must_use]
    pub fn with_years(&self, years: i64) -> Self {
        let mut result = *self;
        result.set_years(years);
        result
    }

    /// Returns a normalized copy of this period with the months replaced.
    #[must_use]
    pub fn with_months(&self, months: i64) -> Self {
        let mut result = *self;
        result.set_months(months);
        result
    }

    /// Returns a normalized copy of this period with the days replaced.
    #[must_use]
    pub fn with_days(&self, days: i64) -> Self {
        let mut result = *self;
        result.set_days(days);
        result
    }

    /// Returns a normalized copy of this period with the hours replaced.
    #[must_use]
    pub fn with_hours(&self, hours: i64) -> Self {
        let mut result = *self;
        result.set_hours(hours);
        result
    }

    /// Returns a normalized copy of this period with the minutes replaced.
    #[must_use]
    pub fn with_minutes(&self, minutes: i64) -> Self {
        let mut result = *self;
        result.set_minutes(minutes);
        result
    }

    /// Returns a normalized copy of this period with the seconds replaced.
    #[must_use]
    pub fn with_seconds(&self, seconds: i64) -> Self {
        let mut result = *self;
        result.set_seconds(seconds);
        result
    }

    /// Returns a normalized copy of this period with the nanoseconds replaced.
    #[must_use]
    pub fn with_nanoseconds(&self, nanoseconds: i64) -> Self {
        let mut result = *self;
        result.set_nanoseconds(nanoseconds);
        result
    }

    /// Adds two periods field by field, then normalizes the sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.years + other.years,
            self.months + other.months,
            self.days + other.days,
            self.hours + other.hours,
            self.minutes + other.minutes,
            self.seconds + other.seconds,
            self.nanoseconds + other.nanoseconds,
        )
    }

    /// Subtracts `other` from this period field by field, then normalizes
    /// the difference.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        Self::new(
            self.years - other.years,
            self.months - other.months,
            self.days - other.days,
            self.hours - other.hours,
            self.minutes - other.minutes,
            self.seconds - other.seconds,
            self.nanoseconds - other.nanoseconds,
        )
    }
}

impl fmt::Display for CalendarPeriod {
    /// Writes the period as an ISO 8601 duration, such as `P1Y2M3DT4H5M6S`.
    ///
    /// Every field keeps its own sign, so a normalized negative period reads
    /// like `P-1Y11M30D`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FormattablePeriod {
            date: [self.years, self.months, self.days],
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            nanoseconds: self.nanoseconds as u32,
        }
        .write_to(f)
    }
}
