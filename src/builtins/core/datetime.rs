//! This module implements `CalendarDateTime` and any directly related algorithms.

use alloc::string::String;
use core::{cmp::Ordering, fmt, hash, str::FromStr};

use num_traits::ToPrimitive;
use writeable::Writeable;

use crate::{
    builtins::core::{timezone::UtcOffset, CalendarDate, CalendarPeriod, TimeOfDay},
    error::ErrorMessage,
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::Unit,
    parsers::{parse_date_time, DateStyle, FormattableDateTime, Precision},
    time::EpochNanoseconds,
    CalendarError, CalendarResult, CalendarUnwrap, NANOS_PER_DAY,
};

/// A date and a time of day, with no time zone.
///
/// The raw time may overflow the day in either direction. Whenever the
/// value is read, whole days of overflow are carried into the date's day
/// field, then the date is normalized.
///
/// ```rust
/// use calendar_rs::CalendarDateTime;
///
/// let dt = CalendarDateTime::new(2024, 1, 31, 25, 0, 0, 0);
/// assert_eq!((dt.month(), dt.day(), dt.hour()), (2, 1, 1));
/// assert_eq!(dt.to_string(), "2024.02.01T01:00:00.000000000");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CalendarDateTime {
    pub(crate) iso: IsoDateTime,
}

// ==== Private API ====

impl CalendarDateTime {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDateTime) -> Self {
        Self { iso }
    }

    #[inline]
    pub(crate) fn balanced(&self) -> IsoDateTime {
        self.iso.balance()
    }

    const fn raw_date(&self) -> CalendarDate {
        CalendarDate::new_unchecked(self.iso.date)
    }

    const fn raw_time(&self) -> TimeOfDay {
        TimeOfDay::new_unchecked(self.iso.time)
    }

    const fn from_parts(date: IsoDate, time: IsoTime) -> Self {
        Self::new_unchecked(IsoDateTime::new_unchecked(date, time))
    }

    fn formattable(&self, style: DateStyle, precision: Precision) -> FormattableDateTime {
        FormattableDateTime {
            date: Some(self.date().formattable(style)),
            time: Some(self.time().formattable(precision)),
        }
    }
}

// ==== Public API ====

impl CalendarDateTime {
    /// `-999999999-01-01T00:00:00`
    pub const MIN: Self = Self::from_parts(CalendarDate::MIN.iso, TimeOfDay::MIN.iso);
    /// `999999999-12-31T23:59:59.999999999`
    pub const MAX: Self = Self::from_parts(CalendarDate::MAX.iso, TimeOfDay::MAX.iso);

    /// Creates a `CalendarDateTime` from raw fields.
    #[inline]
    #[must_use]
    pub const fn new(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        nanosecond: i64,
    ) -> Self {
        Self::from_parts(
            IsoDate::new_unchecked(year, month, day),
            IsoTime::new_unchecked(hour, minute, second, nanosecond),
        )
    }

    /// Creates a `CalendarDateTime` from a date and a time, keeping their raw fields.
    #[inline]
    #[must_use]
    pub const fn from_date_and_time(date: CalendarDate, time: TimeOfDay) -> Self {
        Self::from_parts(date.iso, time.iso)
    }

    /// Creates a `CalendarDateTime` from an epoch day and a count of
    /// nanoseconds since midnight.
    ///
    /// A nanosecond count of a day or more rolls into the following days.
    #[must_use]
    pub fn from_epoch_day_and_nanos(epoch_days: i64, nanosecond_of_day: i64) -> Self {
        Self::from_parts(
            IsoDate::from_epoch_days(epoch_days),
            IsoTime::from_nanosecond_of_day(nanosecond_of_day),
        )
    }

    /// Creates the `CalendarDateTime` of an instant as seen from `offset`.
    pub fn from_epoch_nanoseconds(
        epoch_nanoseconds: EpochNanoseconds,
        offset: UtcOffset,
    ) -> CalendarResult<Self> {
        IsoDateTime::from_epoch_nanoseconds(epoch_nanoseconds, offset.seconds().into())
            .map(Self::new_unchecked)
    }

    /// Parses a date-time from an ISO 8601 date or date-time string.
    ///
    /// A missing time reads as midnight.
    ///
    /// ```rust
    /// use calendar_rs::CalendarDateTime;
    ///
    /// let dt = CalendarDateTime::parse("2024-02-29T23:30").unwrap();
    /// assert_eq!(dt, CalendarDateTime::new(2024, 2, 29, 23, 30, 0, 0));
    /// assert!(CalendarDateTime::parse("2024-02-29T23:30Z").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::from_str(text).ok()
    }

    /// Returns the normalized date.
    #[must_use]
    pub fn date(&self) -> CalendarDate {
        CalendarDate::new_unchecked(self.balanced().date)
    }

    /// Returns the normalized time of day.
    #[must_use]
    pub fn time(&self) -> TimeOfDay {
        TimeOfDay::new_unchecked(self.balanced().time)
    }

    /// Returns the normalized year.
    #[inline]
    #[must_use]
    pub fn year(&self) -> i64 {
        self.balanced().date.year
    }

    /// Returns the normalized month, from 1 to 12.
    #[inline]
    #[must_use]
    pub fn month(&self) -> u8 {
        self.balanced().date.month as u8
    }

    /// Returns the normalized day of the month.
    #[inline]
    #[must_use]
    pub fn day(&self) -> u8 {
        self.balanced().date.day as u8
    }

    /// Returns the normalized hour, from 0 to 23.
    #[inline]
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.balanced().time.hour as u8
    }

    /// Returns the normalized minute.
    #[inline]
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.balanced().time.minute as u8
    }

    /// Returns the normalized second.
    #[inline]
    #[must_use]
    pub fn second(&self) -> u8 {
        self.balanced().time.second as u8
    }

    /// Returns the normalized nanosecond of the second.
    #[inline]
    #[must_use]
    pub fn nanosecond(&self) -> u32 {
        self.balanced().time.nanosecond as u32
    }

    /// Returns the day of the week, where Sunday is 0.
    #[must_use]
    pub fn day_of_week(&self) -> u8 {
        self.date().day_of_week()
    }

    /// Returns the day of the year, starting at 1.
    #[must_use]
    pub fn day_of_year(&self) -> u16 {
        self.date().day_of_year()
    }

    /// Returns the number of days in this date-time's month.
    #[must_use]
    pub fn length_of_month(&self) -> u8 {
        self.date().length_of_month()
    }

    /// Returns the number of days in this date-time's year.
    #[must_use]
    pub fn length_of_year(&self) -> u16 {
        self.date().length_of_year()
    }

    /// Returns whether this date-time's year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.date().is_leap_year()
    }

    /// Returns the smallest and largest valid value of a field.
    ///
    /// Time units are answered by the time of day and date units by the date.
    pub fn range(&self, unit: Unit) -> CalendarResult<(i64, i64)> {
        if unit.is_time_unit() {
            self.time().range(unit)
        } else {
            self.date().range(unit)
        }
    }

    /// Returns a copy of this date-time with the field named by `unit` set to `value`.
    pub fn with(&self, unit: Unit, value: i64) -> CalendarResult<Self> {
        let balanced = self.balanced();
        if unit.is_time_unit() {
            let time = TimeOfDay::new_unchecked(balanced.time).with(unit, value)?;
            Ok(Self::from_parts(balanced.date, time.iso))
        } else {
            let date = CalendarDate::new_unchecked(balanced.date).with(unit, value)?;
            Ok(Self::from_parts(date.iso, balanced.time))
        }
    }

    /// Returns a copy of this date-time with the date replaced.
    #[must_use]
    pub fn with_date(&self, date: CalendarDate) -> Self {
        Self::from_parts(date.iso, self.balanced().time)
    }

    /// Returns a copy of this date-time with the time of day replaced.
    #[must_use]
    pub fn with_time(&self, time: TimeOfDay) -> Self {
        Self::from_parts(self.balanced().date, time.iso)
    }

    /// Returns a copy of this date-time with `amount` of `unit` added to the
    /// raw fields.
    ///
    /// ```rust
    /// use calendar_rs::{CalendarDateTime, Unit};
    ///
    /// let dt = CalendarDateTime::new(2024, 2, 29, 23, 0, 0, 0);
    /// let later = dt.plus(Unit::Hour, 2).unwrap();
    /// assert_eq!((later.month(), later.day(), later.hour()), (3, 1, 1));
    /// ```
    pub fn plus(&self, unit: Unit, amount: i64) -> CalendarResult<Self> {
        if unit.is_time_unit() {
            let time = self.raw_time().plus(unit, amount)?;
            Ok(Self::from_parts(self.iso.date, time.iso))
        } else {
            let date = self.raw_date().plus(unit, amount)?;
            Ok(Self::from_parts(date.iso, self.iso.time))
        }
    }

    /// Returns a copy of this date-time with `amount` of `unit` subtracted.
    pub fn minus(&self, unit: Unit, amount: i64) -> CalendarResult<Self> {
        self.plus(unit, -amount)
    }

    /// Returns the whole number of `unit` from this date-time to `end`,
    /// truncated toward zero.
    ///
    /// Time units count the time of day difference in `unit`, truncated,
    /// plus the whole days between the two dates. Date units only count a
    /// day once the time of day has caught up with the start, so one minute
    /// before the same time tomorrow is zero days.
    ///
    /// ```rust
    /// use calendar_rs::{CalendarDateTime, Unit};
    ///
    /// let start = CalendarDateTime::new(2024, 1, 1, 10, 0, 0, 0);
    /// let end = CalendarDateTime::new(2024, 1, 2, 9, 59, 0, 0);
    /// assert_eq!(start.until(&end, Unit::Day).unwrap(), 0);
    /// assert_eq!(start.until(&end, Unit::Hour).unwrap(), 24);
    /// ```
    pub fn until(&self, end: &Self, unit: Unit) -> CalendarResult<i64> {
        let (start, end) = (self.balanced(), end.balanced());
        if unit.is_time_unit() {
            let time_part = TimeOfDay::new_unchecked(start.time)
                .until(&TimeOfDay::new_unchecked(end.time), unit)?;
            let units_per_day = NANOS_PER_DAY / unit.as_nanoseconds().calendar_unwrap()?;
            let days = end.date.to_epoch_days() - start.date.to_epoch_days();
            return (i128::from(days) * i128::from(units_per_day) + i128::from(time_part))
                .to_i64()
                .ok_or(CalendarError::range().with_enum(ErrorMessage::InstantOutOfRange));
        }
        let end_date = CalendarDate::new_unchecked(start.adjusted_end_date(&end));
        CalendarDate::new_unchecked(start.date).until_unit(&end_date, unit)
    }

    /// Adds a period to the normalized fields, field by field.
    ///
    /// The period is not applied as calendar arithmetic: each field is added
    /// on its own and the result is normalized when it is read.
    ///
    /// ```rust
    /// use calendar_rs::{CalendarDateTime, CalendarPeriod};
    ///
    /// let dt = CalendarDateTime::new(2024, 1, 31, 12, 0, 0, 0);
    /// let later = dt.add_period(&CalendarPeriod::new(0, 1, 0, 0, 0, 0, 0));
    /// assert_eq!((later.month(), later.day()), (3, 2));
    /// ```
    #[must_use]
    pub fn add_period(&self, period: &CalendarPeriod) -> Self {
        let IsoDateTime { date, time } = self.balanced();
        Self::new(
            date.year + period.years(),
            date.month + period.months(),
            date.day + period.days(),
            time.hour + period.hours(),
            time.minute + period.minutes(),
            time.second + period.seconds(),
            time.nanosecond + period.nanoseconds(),
        )
    }

    /// Subtracts a period from the normalized fields, field by field.
    #[must_use]
    pub fn subtract_period(&self, period: &CalendarPeriod) -> Self {
        let IsoDateTime { date, time } = self.balanced();
        Self::new(
            date.year - period.years(),
            date.month - period.months(),
            date.day - period.days(),
            time.hour - period.hours(),
            time.minute - period.minutes(),
            time.second - period.seconds(),
            time.nanosecond - period.nanoseconds(),
        )
    }

    /// Adds another date-time's normalized fields to this one's, field by field.
    #[must_use]
    pub fn add_fields(&self, other: &Self) -> Self {
        self.add_date_fields(&other.date())
            .add_time_fields(&other.time())
    }

    /// Subtracts another date-time's normalized fields from this one's, field by field.
    #[must_use]
    pub fn subtract_fields(&self, other: &Self) -> Self {
        self.subtract_date_fields(&other.date())
            .subtract_time_fields(&other.time())
    }

    /// Adds a date's normalized fields to the date of this date-time.
    #[must_use]
    pub fn add_date_fields(&self, date: &CalendarDate) -> Self {
        let balanced = self.balanced();
        let sum = CalendarDate::new_unchecked(balanced.date).add_fields(date);
        Self::from_parts(sum.iso, balanced.time)
    }

    /// Subtracts a date's normalized fields from the date of this date-time.
    #[must_use]
    pub fn subtract_date_fields(&self, date: &CalendarDate) -> Self {
        let balanced = self.balanced();
        let difference = CalendarDate::new_unchecked(balanced.date).subtract_fields(date);
        Self::from_parts(difference.iso, balanced.time)
    }

    /// Adds a time's normalized fields to the time of this date-time.
    ///
    /// Overflow past midnight moves the date.
    #[must_use]
    pub fn add_time_fields(&self, time: &TimeOfDay) -> Self {
        let balanced = self.balanced();
        let sum = TimeOfDay::new_unchecked(balanced.time).add_fields(time);
        Self::from_parts(balanced.date, sum.iso)
    }

    /// Subtracts a time's normalized fields from the time of this date-time.
    ///
    /// Borrowing past midnight moves the date back.
    #[must_use]
    pub fn subtract_time_fields(&self, time: &TimeOfDay) -> Self {
        let balanced = self.balanced();
        let difference = TimeOfDay::new_unchecked(balanced.time).subtract_fields(time);
        Self::from_parts(balanced.date, difference.iso)
    }

    /// Returns the instant of this date-time as seen from `offset`.
    pub fn to_epoch_nanoseconds(&self, offset: UtcOffset) -> CalendarResult<EpochNanoseconds> {
        self.iso.as_epoch_nanoseconds(offset.seconds().into())
    }

    /// Returns this date-time as an ISO 8601 string, such as
    /// `2024-02-29T23:30:00`.
    #[must_use]
    pub fn to_ixdtf_string(&self) -> String {
        self.formattable(DateStyle::Ixdtf, Precision::Auto)
            .write_to_string()
            .into_owned()
    }
}

// ==== Trait impls ====

impl PartialEq for CalendarDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.balanced() == other.balanced()
    }
}

impl Eq for CalendarDateTime {}

impl PartialOrd for CalendarDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.balanced().compare(&other.balanced())
    }
}

impl hash::Hash for CalendarDateTime {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        let IsoDateTime { date, time } = self.balanced();
        (date.year, date.month, date.day).hash(state);
        time.to_nanosecond_of_day().hash(state);
    }
}

impl Default for CalendarDateTime {
    /// 1970-01-01T00:00:00
    fn default() -> Self {
        Self::from_epoch_day_and_nanos(0, 0)
    }
}

impl fmt::Display for CalendarDateTime {
    /// Writes the date-time as `YYYY.MM.DDTHH:MM:SS.nnnnnnnnn`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.formattable(DateStyle::Dotted, Precision::Digit(9))
            .write_to(f)
    }
}

impl FromStr for CalendarDateTime {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let record = parse_date_time(s)?;
        let date = IsoDate::from_date_record(record.date.calendar_unwrap()?);
        let time = record
            .time
            .map(IsoTime::from_time_record)
            .transpose()?
            .unwrap_or_default();
        if !date.is_valid() {
            return Err(CalendarError::range().with_enum(ErrorMessage::InvalidDate));
        }
        if !date.is_within_limits() {
            return Err(CalendarError::range().with_enum(ErrorMessage::DateOutOfRange));
        }
        Ok(Self::from_parts(date, time))
    }
}
