//! This module implements `TimeOfDay` and any directly related algorithms.

use alloc::string::String;
use core::{cmp::Ordering, fmt, hash, str::FromStr};

use writeable::Writeable;

use crate::{
    calendar_assert,
    iso::IsoTime,
    options::Unit,
    parsers::{parse_time, FormattableTime, Precision},
    CalendarError, CalendarResult, HOURS_PER_DAY, MINUTES_PER_HOUR, NANOS_PER_SECOND,
    SECONDS_PER_MINUTE,
};

/// A wall clock time of day with nanosecond precision.
///
/// Like [`CalendarDate`][crate::CalendarDate], a `TimeOfDay` keeps the raw
/// fields it was created with and reads them back normalized. A stand-alone
/// time wraps around midnight, so `25:00` reads as `01:00`. Inside a
/// [`CalendarDateTime`][crate::CalendarDateTime] the overflowing day is
/// carried into the date instead.
///
/// ```rust
/// use calendar_rs::TimeOfDay;
///
/// let time = TimeOfDay::new(0, 0, 3661, 0);
/// assert_eq!((time.hour(), time.minute(), time.second()), (1, 1, 1));
///
/// let time = TimeOfDay::new(25, 0, 0, 0);
/// assert_eq!(time, TimeOfDay::new(1, 0, 0, 0));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeOfDay {
    pub(crate) iso: IsoTime,
}

// ==== Private API ====

impl TimeOfDay {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoTime) -> Self {
        Self { iso }
    }

    /// Returns the normalized record, wrapped around midnight.
    #[inline]
    pub(crate) fn balanced(&self) -> IsoTime {
        self.iso.balance().1
    }

    pub(crate) fn formattable(&self, precision: Precision) -> FormattableTime {
        let iso = self.balanced();
        FormattableTime {
            hour: iso.hour as u8,
            minute: iso.minute as u8,
            second: iso.second as u8,
            nanosecond: iso.nanosecond as u32,
            precision,
        }
    }
}

// ==== Public API ====

impl TimeOfDay {
    /// `00:00:00`
    pub const MIN: Self = Self::new(0, 0, 0, 0);
    /// `00:00:00`
    pub const MIDNIGHT: Self = Self::MIN;
    /// `12:00:00`
    pub const NOON: Self = Self::new_unchecked(IsoTime::noon());
    /// `23:59:59.999999999`
    pub const MAX: Self = Self::new(23, 59, 59, 999_999_999);

    /// Creates a `TimeOfDay` from raw fields.
    #[inline]
    #[must_use]
    pub const fn new(hour: i64, minute: i64, second: i64, nanosecond: i64) -> Self {
        Self::new_unchecked(IsoTime::new_unchecked(hour, minute, second, nanosecond))
    }

    /// Creates a `TimeOfDay` from a count of nanoseconds since midnight.
    ///
    /// Counts past the end of the day are kept as extra hours, which a
    /// `CalendarDateTime` carries into its date.
    #[inline]
    #[must_use]
    pub fn from_nanosecond_of_day(nanosecond_of_day: i64) -> Self {
        Self::new_unchecked(IsoTime::from_nanosecond_of_day(nanosecond_of_day))
    }

    /// Parses a time from an ISO 8601 time or date-time string.
    ///
    /// ```rust
    /// use calendar_rs::TimeOfDay;
    ///
    /// let time = TimeOfDay::parse("13:05:09.5").unwrap();
    /// assert_eq!(time, TimeOfDay::new(13, 5, 9, 500_000_000));
    /// assert!(TimeOfDay::parse("1pm").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::from_str(text).ok()
    }

    /// Returns the normalized hour, from 0 to 23.
    #[inline]
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.balanced().hour as u8
    }

    /// Returns the normalized minute, from 0 to 59.
    #[inline]
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.balanced().minute as u8
    }

    /// Returns the normalized second, from 0 to 59.
    #[inline]
    #[must_use]
    pub fn second(&self) -> u8 {
        self.balanced().second as u8
    }

    /// Returns the normalized nanosecond of the second.
    #[inline]
    #[must_use]
    pub fn nanosecond(&self) -> u32 {
        self.balanced().nanosecond as u32
    }

    /// Returns the nanoseconds since midnight, in `0..NANOS_PER_DAY`.
    #[inline]
    #[must_use]
    pub fn nanosecond_of_day(&self) -> i64 {
        self.balanced().to_nanosecond_of_day()
    }

    /// Returns the smallest and largest valid value of a field.
    pub fn range(&self, unit: Unit) -> CalendarResult<(i64, i64)> {
        match unit {
            Unit::Hour => Ok((0, HOURS_PER_DAY - 1)),
            Unit::Minute => Ok((0, MINUTES_PER_HOUR - 1)),
            Unit::Second => Ok((0, SECONDS_PER_MINUTE - 1)),
            Unit::Nanosecond => Ok((0, NANOS_PER_SECOND - 1)),
            _ => unit.reject(),
        }
    }

    /// Returns a copy of this time with the field named by `unit` set to `value`.
    pub fn with(&self, unit: Unit, value: i64) -> CalendarResult<Self> {
        match unit {
            Unit::Hour => Ok(self.with_hour(value)),
            Unit::Minute => Ok(self.with_minute(value)),
            Unit::Second => Ok(self.with_second(value)),
            Unit::Nanosecond => Ok(self.with_nanosecond(value)),
            _ => unit.reject(),
        }
    }

    /// Returns a copy of this time with the hour altered.
    #[must_use]
    pub fn with_hour(&self, hour: i64) -> Self {
        let iso = self.balanced();
        Self::new(hour, iso.minute, iso.second, iso.nanosecond)
    }

    /// Returns a copy of this time with the minute altered.
    #[must_use]
    pub fn with_minute(&self, minute: i64) -> Self {
        let iso = self.balanced();
        Self::new(iso.hour, minute, iso.second, iso.nanosecond)
    }

    /// Returns a copy of this time with the second altered.
    #[must_use]
    pub fn with_second(&self, second: i64) -> Self {
        let iso = self.balanced();
        Self::new(iso.hour, iso.minute, second, iso.nanosecond)
    }

    /// Returns a copy of this time with the nanosecond altered.
    #[must_use]
    pub fn with_nanosecond(&self, nanosecond: i64) -> Self {
        let iso = self.balanced();
        Self::new(iso.hour, iso.minute, iso.second, nanosecond)
    }

    /// Returns a copy of this time with `amount` of `unit` added to the raw fields.
    pub fn plus(&self, unit: Unit, amount: i64) -> CalendarResult<Self> {
        match unit {
            Unit::Hour => Ok(self.plus_hours(amount)),
            Unit::Minute => Ok(self.plus_minutes(amount)),
            Unit::Second => Ok(self.plus_seconds(amount)),
            Unit::Nanosecond => Ok(self.plus_nanoseconds(amount)),
            _ => unit.reject(),
        }
    }

    /// Returns a copy of this time with `amount` of `unit` subtracted.
    pub fn minus(&self, unit: Unit, amount: i64) -> CalendarResult<Self> {
        self.plus(unit, -amount)
    }

    /// Returns a copy of this time with `hours` added to the raw hour.
    ///
    /// The result wraps around midnight when it is read.
    #[must_use]
    pub const fn plus_hours(&self, hours: i64) -> Self {
        let iso = self.iso;
        Self::new(iso.hour + hours, iso.minute, iso.second, iso.nanosecond)
    }

    /// Returns a copy of this time with `minutes` added to the raw minute.
    #[must_use]
    pub const fn plus_minutes(&self, minutes: i64) -> Self {
        let iso = self.iso;
        Self::new(iso.hour, iso.minute + minutes, iso.second, iso.nanosecond)
    }

    /// Returns a copy of this time with `seconds` added to the raw second.
    #[must_use]
    pub const fn plus_seconds(&self, seconds: i64) -> Self {
        let iso = self.iso;
        Self::new(iso.hour, iso.minute, iso.second + seconds, iso.nanosecond)
    }

    /// Returns a copy of this time with `nanoseconds` added to the raw nanosecond.
    #[must_use]
    pub const fn plus_nanoseconds(&self, nanoseconds: i64) -> Self {
        let iso = self.iso;
        Self::new(iso.hour, iso.minute, iso.second, iso.nanosecond + nanoseconds)
    }

    /// Returns a copy of this time with `hours` subtracted.
    #[must_use]
    pub const fn minus_hours(&self, hours: i64) -> Self {
        self.plus_hours(-hours)
    }

    /// Returns a copy of this time with `minutes` subtracted.
    #[must_use]
    pub const fn minus_minutes(&self, minutes: i64) -> Self {
        self.plus_minutes(-minutes)
    }

    /// Returns a copy of this time with `seconds` subtracted.
    #[must_use]
    pub const fn minus_seconds(&self, seconds: i64) -> Self {
        self.plus_seconds(-seconds)
    }

    /// Returns a copy of this time with `nanoseconds` subtracted.
    #[must_use]
    pub const fn minus_nanoseconds(&self, nanoseconds: i64) -> Self {
        self.plus_nanoseconds(-nanoseconds)
    }

    /// Returns the whole number of `unit` from this time to `end` on the
    /// same day, truncated toward zero.
    ///
    /// The result is negative when `end` is earlier than `self`.
    ///
    /// ```rust
    /// use calendar_rs::{TimeOfDay, Unit};
    ///
    /// let start = TimeOfDay::new(10, 30, 0, 0);
    /// let end = TimeOfDay::new(8, 0, 0, 0);
    /// assert_eq!(start.until(&end, Unit::Hour).unwrap(), -2);
    /// assert_eq!(start.until(&end, Unit::Minute).unwrap(), -150);
    /// ```
    pub fn until(&self, end: &Self, unit: Unit) -> CalendarResult<i64> {
        let unit_nanos = match unit.as_nanoseconds() {
            Some(nanos) if unit.is_time_unit() => nanos,
            _ => return unit.reject(),
        };
        Ok((end.nanosecond_of_day() - self.nanosecond_of_day()) / unit_nanos)
    }

    /// Adds another time's normalized fields to this time's, field by field.
    #[must_use]
    pub fn add_fields(&self, other: &Self) -> Self {
        let (lhs, rhs) = (self.balanced(), other.balanced());
        Self::new(
            lhs.hour + rhs.hour,
            lhs.minute + rhs.minute,
            lhs.second + rhs.second,
            lhs.nanosecond + rhs.nanosecond,
        )
    }

    /// Subtracts another time's normalized fields from this time's, field by field.
    #[must_use]
    pub fn subtract_fields(&self, other: &Self) -> Self {
        let (lhs, rhs) = (self.balanced(), other.balanced());
        Self::new(
            lhs.hour - rhs.hour,
            lhs.minute - rhs.minute,
            lhs.second - rhs.second,
            lhs.nanosecond - rhs.nanosecond,
        )
    }

    /// Returns this time as an ISO 8601 string, trimming trailing zeros from
    /// the fraction.
    #[must_use]
    pub fn to_ixdtf_string(&self) -> String {
        self.formattable(Precision::Auto)
            .write_to_string()
            .into_owned()
    }
}

// ==== Trait impls ====

impl PartialEq for TimeOfDay {
    fn eq(&self, other: &Self) -> bool {
        self.balanced() == other.balanced()
    }
}

impl Eq for TimeOfDay {}

impl PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeOfDay {
    fn cmp(&self, other: &Self) -> Ordering {
        self.balanced().compare(&other.balanced())
    }
}

impl hash::Hash for TimeOfDay {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.nanosecond_of_day().hash(state);
    }
}

impl fmt::Display for TimeOfDay {
    /// Writes the time as `HH:MM:SS.nnnnnnnnn`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.formattable(Precision::Digit(9)).write_to(f)
    }
}

impl FromStr for TimeOfDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let iso = IsoTime::from_time_record(parse_time(s)?)?;
        calendar_assert!(
            iso.is_valid(),
            "parsed time fields are out of range: {iso:?}"
        );
        Ok(Self::new_unchecked(iso))
    }
}
