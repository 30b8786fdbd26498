//! This module implements `CalendarDate` and any directly related algorithms.

use alloc::string::String;
use core::{cmp::Ordering, fmt, hash, str::FromStr};

use date_equations::gregorian;
use writeable::Writeable;

use crate::{
    builtins::core::{timezone::UtcOffset, CalendarPeriod},
    error::ErrorMessage,
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::Unit,
    parsers::{parse_date_time, DateStyle, FormattableDate},
    time::EpochNanoseconds,
    CalendarError, CalendarResult, CalendarUnwrap, MAX_YEAR, MIN_YEAR,
};

/// A proleptic Gregorian date.
///
/// A `CalendarDate` keeps the fields it was created with, even when they are
/// out of range. Every accessor reads the normalized date: month overflow is
/// carried into the year, then day overflow is carried through the month
/// lengths.
///
/// ```rust
/// use calendar_rs::CalendarDate;
///
/// let date = CalendarDate::new(2023, 2, 30);
/// assert_eq!((date.year(), date.month(), date.day()), (2023, 3, 2));
///
/// let date = CalendarDate::new(2023, 13, 1);
/// assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 1));
/// assert_eq!(date, CalendarDate::new(2024, 1, 1));
/// ```
///
/// Equality, ordering and hashing all work on the normalized date.
#[derive(Debug, Clone, Copy)]
pub struct CalendarDate {
    pub(crate) iso: IsoDate,
}

// ==== Private API ====

impl CalendarDate {
    /// Create a new `CalendarDate` from an `IsoDate` record.
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDate) -> Self {
        Self { iso }
    }

    /// Returns the normalized record.
    #[inline]
    pub(crate) fn balanced(&self) -> IsoDate {
        self.iso.balance()
    }
}

// ==== Public API ====

impl CalendarDate {
    /// The first supported date, `-999999999-01-01`.
    pub const MIN: Self = Self::new(MIN_YEAR, 1, 1);
    /// The last supported date, `999999999-12-31`.
    pub const MAX: Self = Self::new(MAX_YEAR, 12, 31);

    /// Creates a `CalendarDate` from raw fields.
    ///
    /// The fields are not validated, `new(2024, 1, 32)` is February 1.
    #[inline]
    #[must_use]
    pub const fn new(year: i64, month: i64, day: i64) -> Self {
        Self::new_unchecked(IsoDate::new_unchecked(year, month, day))
    }

    /// Creates a `CalendarDate` in year 0 from a month and a day.
    #[inline]
    #[must_use]
    pub const fn from_month_day(month: i64, day: i64) -> Self {
        Self::new(0, month, day)
    }

    /// Creates a `CalendarDate` from a year and a day of that year, starting at 1.
    ///
    /// ```rust
    /// use calendar_rs::CalendarDate;
    ///
    /// let date = CalendarDate::from_year_day(2024, 60);
    /// assert_eq!((date.month(), date.day()), (2, 29));
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_year_day(year: i64, day_of_year: i64) -> Self {
        Self::new(year, 1, day_of_year)
    }

    /// Creates a `CalendarDate` from a day count where 1970-01-01 is day 0.
    #[inline]
    #[must_use]
    pub const fn from_epoch_days(epoch_days: i64) -> Self {
        Self::new_unchecked(IsoDate::from_epoch_days(epoch_days))
    }

    /// Creates the `CalendarDate` of an instant as seen from `offset`.
    pub fn from_epoch_nanoseconds(
        epoch_nanoseconds: EpochNanoseconds,
        offset: UtcOffset,
    ) -> CalendarResult<Self> {
        let iso = IsoDateTime::from_epoch_nanoseconds(epoch_nanoseconds, offset.seconds().into())?;
        Ok(Self::new_unchecked(iso.date))
    }

    /// Parses a date from an ISO 8601 date or date-time string.
    ///
    /// Returns `None` when the text is not a date. Use `FromStr` to see the
    /// reason.
    ///
    /// ```rust
    /// use calendar_rs::CalendarDate;
    ///
    /// let date = CalendarDate::parse("2024-02-29").unwrap();
    /// assert_eq!(date, CalendarDate::new(2024, 2, 29));
    /// assert!(CalendarDate::parse("29/02/2024").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        Self::from_str(text).ok()
    }

    /// Returns the normalized year.
    #[inline]
    #[must_use]
    pub fn year(&self) -> i64 {
        self.balanced().year
    }

    /// Returns the normalized month, from 1 to 12.
    #[inline]
    #[must_use]
    pub fn month(&self) -> u8 {
        self.balanced().month as u8
    }

    /// Returns the normalized day of the month, starting at 1.
    #[inline]
    #[must_use]
    pub fn day(&self) -> u8 {
        self.balanced().day as u8
    }

    /// Returns the day of the week, where Sunday is 0 and Saturday is 6.
    ///
    /// ```rust
    /// use calendar_rs::CalendarDate;
    ///
    /// assert_eq!(CalendarDate::new(2000, 1, 1).day_of_week(), 6);
    /// ```
    #[must_use]
    pub fn day_of_week(&self) -> u8 {
        let iso = self.balanced();
        gregorian::day_of_week(iso.year, iso.month as u8, iso.day as u8)
    }

    /// Returns the day of the year, starting at 1.
    #[must_use]
    pub fn day_of_year(&self) -> u16 {
        let iso = self.balanced();
        gregorian::day_of_year(iso.year, iso.month as u8, iso.day as u8)
    }

    /// Returns the day count from 1970-01-01.
    #[inline]
    #[must_use]
    pub fn epoch_days(&self) -> i64 {
        self.iso.to_epoch_days()
    }

    /// Returns the number of days in this date's month.
    #[must_use]
    pub fn length_of_month(&self) -> u8 {
        let iso = self.balanced();
        gregorian::days_in_month(iso.year, iso.month as u8)
    }

    /// Returns the number of days in this date's year.
    #[must_use]
    pub fn length_of_year(&self) -> u16 {
        gregorian::days_in_year(self.year())
    }

    /// Returns whether this date's year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        gregorian::is_leap_year(self.year())
    }

    /// Returns the smallest and largest valid value of a field.
    ///
    ///   - `Unit::Week`: the week rows of the month, with weeks starting on Sunday.
    ///   - `Unit::Month`: the days of the month.
    ///   - `Unit::Year`: the days of the year.
    ///
    /// ```rust
    /// use calendar_rs::{CalendarDate, Unit};
    ///
    /// let date = CalendarDate::new(2024, 2, 10);
    /// assert_eq!(date.range(Unit::Month).unwrap(), (1, 29));
    /// assert_eq!(date.range(Unit::Week).unwrap(), (1, 5));
    /// assert!(date.range(Unit::Hour).is_err());
    /// ```
    pub fn range(&self, unit: Unit) -> CalendarResult<(i64, i64)> {
        match unit {
            Unit::Week => {
                let iso = self.balanced();
                let first = gregorian::day_of_week(iso.year, iso.month as u8, 1);
                let cells = i64::from(first) + i64::from(self.length_of_month());
                Ok((1, (cells + 6) / 7))
            }
            Unit::Month => Ok((1, i64::from(self.length_of_month()))),
            Unit::Year => Ok((1, i64::from(self.length_of_year()))),
            _ => unit.reject(),
        }
    }

    /// Returns the range of the week of the month: four weeks for a
    /// February outside of a leap year and five otherwise.
    ///
    /// This is the span of whole weeks a month can touch, not the week rows
    /// of this particular month. Use `range(Unit::Week)` for those.
    #[must_use]
    pub fn week_of_month_range(&self) -> (i64, i64) {
        if self.month() == 2 && !self.is_leap_year() {
            (1, 4)
        } else {
            (1, 5)
        }
    }

    /// Returns the range of the year within this date's era.
    ///
    /// Years up to 0 count back from 1 BCE, which makes the earlier era one
    /// year longer.
    ///
    /// ```rust
    /// use calendar_rs::{CalendarDate, MAX_YEAR};
    ///
    /// assert_eq!(CalendarDate::new(2024, 1, 1).year_of_era_range(), (1, MAX_YEAR));
    /// assert_eq!(CalendarDate::new(0, 1, 1).year_of_era_range(), (1, MAX_YEAR + 1));
    /// ```
    #[must_use]
    pub fn year_of_era_range(&self) -> (i64, i64) {
        if self.year() <= 0 {
            (1, MAX_YEAR + 1)
        } else {
            (1, MAX_YEAR)
        }
    }

    /// Returns a copy of this date with the year, month or day set to `value`.
    pub fn with(&self, unit: Unit, value: i64) -> CalendarResult<Self> {
        match unit {
            Unit::Year => Ok(self.with_year(value)),
            Unit::Month => Ok(self.with_month(value)),
            Unit::Day => Ok(self.with_day(value)),
            _ => unit.reject(),
        }
    }

    /// Returns a copy of this date with the year altered.
    #[must_use]
    pub fn with_year(&self, year: i64) -> Self {
        let iso = self.balanced();
        Self::new(year, iso.month, iso.day)
    }

    /// Returns a copy of this date with the month altered.
    #[must_use]
    pub fn with_month(&self, month: i64) -> Self {
        let iso = self.balanced();
        Self::new(iso.year, month, iso.day)
    }

    /// Returns a copy of this date with the day of the month altered.
    #[must_use]
    pub fn with_day(&self, day: i64) -> Self {
        let iso = self.balanced();
        Self::new(iso.year, iso.month, day)
    }

    /// Returns a copy of this date with the day of the year altered.
    #[must_use]
    pub fn with_day_of_year(&self, day_of_year: i64) -> Self {
        Self::from_year_day(self.year(), day_of_year)
    }

    /// Returns a copy of this date with `amount` of `unit` added to the raw
    /// fields.
    ///
    /// Nothing is normalized until the result is read, so adding a month to
    /// January 31 reads as March 2 (or March 1 in a leap year).
    pub fn plus(&self, unit: Unit, amount: i64) -> CalendarResult<Self> {
        match unit {
            Unit::Year => Ok(self.plus_years(amount)),
            Unit::Month => Ok(self.plus_months(amount)),
            Unit::Week => Ok(self.plus_weeks(amount)),
            Unit::Day => Ok(self.plus_days(amount)),
            _ => unit.reject(),
        }
    }

    /// Returns a copy of this date with `amount` of `unit` subtracted.
    pub fn minus(&self, unit: Unit, amount: i64) -> CalendarResult<Self> {
        self.plus(unit, -amount)
    }

    /// Returns a copy of this date with `years` added to the raw year.
    ///
    /// February 29 plus one year reads as March 1.
    #[must_use]
    pub const fn plus_years(&self, years: i64) -> Self {
        Self::new(self.iso.year + years, self.iso.month, self.iso.day)
    }

    /// Returns a copy of this date with `months` added to the raw month.
    #[must_use]
    pub const fn plus_months(&self, months: i64) -> Self {
        Self::new(self.iso.year, self.iso.month + months, self.iso.day)
    }

    /// Returns a copy of this date with `weeks` seven day weeks added.
    #[must_use]
    pub const fn plus_weeks(&self, weeks: i64) -> Self {
        self.plus_days(weeks * 7)
    }

    /// Returns a copy of this date with `days` added to the raw day.
    #[must_use]
    pub const fn plus_days(&self, days: i64) -> Self {
        Self::new(self.iso.year, self.iso.month, self.iso.day + days)
    }

    /// Returns a copy of this date with `years` subtracted.
    #[must_use]
    pub const fn minus_years(&self, years: i64) -> Self {
        self.plus_years(-years)
    }

    /// Returns a copy of this date with `months` subtracted.
    #[must_use]
    pub const fn minus_months(&self, months: i64) -> Self {
        self.plus_months(-months)
    }

    /// Returns a copy of this date with `weeks` subtracted.
    #[must_use]
    pub const fn minus_weeks(&self, weeks: i64) -> Self {
        self.plus_weeks(-weeks)
    }

    /// Returns a copy of this date with `days` subtracted.
    #[must_use]
    pub const fn minus_days(&self, days: i64) -> Self {
        self.plus_days(-days)
    }

    /// Returns the years, months and days from this date to `end`.
    ///
    /// The whole years and months are counted between the normalized
    /// dates. For `self <= end`, adding the period's years, months and days
    /// to this date with `plus_years`, `plus_months` and `plus_days`
    /// reproduces `end`, even when this date holds out of range fields.
    /// The period is returned exactly as computed, and its day field is not
    /// folded into months.
    ///
    /// ```rust
    /// use calendar_rs::CalendarDate;
    ///
    /// let start = CalendarDate::new(2024, 2, 29);
    /// let end = CalendarDate::new(2025, 4, 10);
    /// let period = start.until(&end);
    /// assert_eq!((period.years(), period.months(), period.days()), (1, 1, 12));
    ///
    /// let back = start
    ///     .plus_years(period.years())
    ///     .plus_months(period.months())
    ///     .plus_days(period.days());
    /// assert_eq!(back, end);
    /// ```
    #[must_use]
    pub fn until(&self, end: &Self) -> CalendarPeriod {
        let (years, months, _) = self.balanced().diff(&end.balanced());
        // The days are counted from the raw fields, which is where
        // `plus_years` and `plus_months` start.
        let shifted = IsoDate::new_unchecked(
            self.iso.year + years,
            self.iso.month + months,
            self.iso.day,
        );
        let days = end.epoch_days() - shifted.to_epoch_days();
        CalendarPeriod::from_date_difference(years, months, days)
    }

    /// Returns the whole number of `unit` from this date to `end`, truncated
    /// toward zero.
    ///
    /// Only `Day`, `Week`, `Month` and `Year` are supported.
    pub fn until_unit(&self, end: &Self, unit: Unit) -> CalendarResult<i64> {
        match unit {
            Unit::Day => Ok(self.days_until(end)),
            Unit::Week => Ok(self.days_until(end) / 7),
            Unit::Month => Ok(self.balanced().months_until(&end.balanced())),
            Unit::Year => Ok(self.balanced().months_until(&end.balanced()) / 12),
            _ => unit.reject(),
        }
    }

    #[inline]
    fn days_until(&self, end: &Self) -> i64 {
        end.epoch_days() - self.epoch_days()
    }

    /// Adds another date's normalized fields to this date's, field by field.
    ///
    /// This is not calendar arithmetic: `2024-01-31` plus `0001-02-01`
    /// is the raw date `2025-03-32`, which reads as `2025-04-01`.
    #[must_use]
    pub fn add_fields(&self, other: &Self) -> Self {
        let (lhs, rhs) = (self.balanced(), other.balanced());
        Self::new(lhs.year + rhs.year, lhs.month + rhs.month, lhs.day + rhs.day)
    }

    /// Subtracts another date's normalized fields from this date's, field by field.
    #[must_use]
    pub fn subtract_fields(&self, other: &Self) -> Self {
        let (lhs, rhs) = (self.balanced(), other.balanced());
        Self::new(lhs.year - rhs.year, lhs.month - rhs.month, lhs.day - rhs.day)
    }

    /// Returns the instant at the start of this date as seen from `offset`.
    ///
    /// Fails when the date is outside of the supported years.
    pub fn to_epoch_nanoseconds(&self, offset: UtcOffset) -> CalendarResult<EpochNanoseconds> {
        IsoDateTime::new_unchecked(self.iso, IsoTime::default())
            .as_epoch_nanoseconds(offset.seconds().into())
    }

    /// Returns this date as an ISO 8601 string, such as `2024-02-29` or
    /// `+012345-06-07`.
    #[must_use]
    pub fn to_ixdtf_string(&self) -> String {
        self.formattable(DateStyle::Ixdtf)
            .write_to_string()
            .into_owned()
    }

    pub(crate) fn formattable(&self, style: DateStyle) -> FormattableDate {
        let iso = self.balanced();
        FormattableDate {
            year: iso.year,
            month: iso.month as u8,
            day: iso.day as u8,
            style,
        }
    }
}

// ==== Trait impls ====

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        self.balanced() == other.balanced()
    }
}

impl Eq for CalendarDate {}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.balanced().compare(&other.balanced())
    }
}

impl hash::Hash for CalendarDate {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        let iso = self.balanced();
        (iso.year, iso.month, iso.day).hash(state);
    }
}

impl Default for CalendarDate {
    /// 1970-01-01
    fn default() -> Self {
        Self::from_epoch_days(0)
    }
}

impl fmt::Display for CalendarDate {
    /// Writes the date as `YYYY.MM.DD`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.formattable(DateStyle::Dotted).write_to(f)
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let record = parse_date_time(s)?;
        let date = record.date.calendar_unwrap()?;
        let iso = IsoDate::from_date_record(date);
        if !iso.is_valid() {
            return Err(CalendarError::range().with_enum(ErrorMessage::InvalidDate));
        }
        if !iso.is_within_limits() {
            return Err(CalendarError::range().with_enum(ErrorMessage::DateOutOfRange));
        }
        Ok(Self::new_unchecked(iso))
    }
}

// ==== Test land ====

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::str::FromStr;

    use super::CalendarDate;
    use crate::{options::Unit, time::EpochNanoseconds, UtcOffset, MAX_YEAR, NANOS_PER_DAY};

    fn assert_date(date: CalendarDate, expected: (i64, u8, u8)) {
        assert_eq!((date.year(), date.month(), date.day()), expected);
    }

    #[test]
    fn normalization_reads() {
        assert_date(CalendarDate::new(2024, 2, 29), (2024, 2, 29));
        assert_date(CalendarDate::new(2023, 13, 1), (2024, 1, 1));
        assert_date(CalendarDate::new(2023, 2, 30), (2023, 3, 2));
        assert_date(CalendarDate::new(2020, 37, 45), (2023, 2, 14));
        assert_date(CalendarDate::new(2024, 1, 0), (2023, 12, 31));
        assert_date(CalendarDate::new(0, 1, -365), (-2, 12, 31));
    }

    #[test]
    fn reads_do_not_change_raw_fields() {
        let date = CalendarDate::new(2023, 2, 30);
        assert_eq!(date.day(), 2);
        // The raw day is kept, so adding days still counts from February.
        assert_date(date.plus_days(-1), (2023, 3, 1));
        assert_eq!(date.iso.day, 30);
    }

    #[test]
    fn epoch_day_round_trip() {
        for epoch_days in (-3_000_000..3_000_000).step_by(997) {
            let date = CalendarDate::from_epoch_days(epoch_days);
            assert_eq!(date.epoch_days(), epoch_days);
        }
        assert_eq!(CalendarDate::new(1970, 1, 1).epoch_days(), 0);
        assert_eq!(CalendarDate::MIN.epoch_days(), -365_243_219_162);
        assert_eq!(
            CalendarDate::from_epoch_days(CalendarDate::MAX.epoch_days()),
            CalendarDate::MAX
        );
    }

    #[test]
    fn leap_years_and_lengths() {
        assert!(!CalendarDate::new(1900, 1, 1).is_leap_year());
        assert!(CalendarDate::new(2000, 1, 1).is_leap_year());
        assert!(CalendarDate::new(-4, 1, 1).is_leap_year());
        assert_eq!(CalendarDate::new(2024, 2, 1).length_of_month(), 29);
        assert_eq!(CalendarDate::new(2023, 2, 1).length_of_month(), 28);
        assert_eq!(CalendarDate::new(2024, 4, 1).length_of_month(), 30);
        assert_eq!(CalendarDate::new(2024, 1, 1).length_of_month(), 31);
        assert_eq!(CalendarDate::new(2024, 1, 1).length_of_year(), 366);
        assert_eq!(CalendarDate::new(2023, 12, 31).day_of_year(), 365);
    }

    #[test]
    fn day_of_week_matches_epoch_days() {
        assert_eq!(CalendarDate::new(2000, 1, 1).day_of_week(), 6);
        for epoch_days in (-800_000..800_000).step_by(7_001) {
            let date = CalendarDate::from_epoch_days(epoch_days);
            assert_eq!(
                i64::from(date.day_of_week()),
                (epoch_days + 4).rem_euclid(7)
            );
        }
    }

    #[test]
    fn ordering() {
        assert!(CalendarDate::new(2024, 2, 29) > CalendarDate::new(2024, 2, 28));
        assert!(CalendarDate::new(1999, 12, 31) < CalendarDate::new(2000, 1, 1));
        assert!(CalendarDate::new(-1, 12, 31) < CalendarDate::new(0, 1, 1));
        // A smaller year with a larger month is still the earlier date.
        assert!(CalendarDate::new(2023, 12, 1) < CalendarDate::new(2024, 1, 1));
        assert!(CalendarDate::new(2024, 1, 31) < CalendarDate::new(2024, 2, 1));
        assert_eq!(CalendarDate::new(2023, 13, 1), CalendarDate::new(2024, 1, 1));
        assert!(CalendarDate::MIN < CalendarDate::MAX);
    }

    #[test]
    fn plus_is_lazy() {
        let date = CalendarDate::new(2024, 1, 31);
        assert_date(date.plus_months(1), (2024, 3, 2));
        assert_date(date.plus_months(1).plus_days(-2), (2024, 2, 29));
        assert_date(date.plus_weeks(2), (2024, 2, 14));
        assert_date(date.minus_years(1), (2023, 1, 31));
        assert_date(date.plus(Unit::Month, 13).unwrap(), (2025, 3, 3));
        assert_date(date.minus(Unit::Day, 31).unwrap(), (2023, 12, 31));
        assert!(date.plus(Unit::Hour, 1).is_err());
    }

    #[test]
    fn with_uses_normalized_fields() {
        let date = CalendarDate::new(2023, 2, 30);
        assert_date(date.with_year(2020), (2020, 3, 2));
        assert_date(date.with_month(4), (2023, 4, 2));
        assert_date(date.with_day(31), (2023, 3, 31));
        assert_date(date.with_day_of_year(60), (2023, 3, 1));
        assert_date(date.with(Unit::Day, 1).unwrap(), (2023, 3, 1));
        assert!(date.with(Unit::Week, 1).is_err());
        assert_date(CalendarDate::from_month_day(2, 29), (0, 2, 29));
    }

    #[test]
    fn ranges() {
        // June 2024 starts on a Saturday and spans six week rows.
        let june = CalendarDate::new(2024, 6, 15);
        assert_eq!(june.range(Unit::Week).unwrap(), (1, 6));
        // February 2015 starts on a Sunday and fits in four rows.
        let february = CalendarDate::new(2015, 2, 1);
        assert_eq!(february.range(Unit::Week).unwrap(), (1, 4));
        assert_eq!(february.range(Unit::Month).unwrap(), (1, 28));
        assert_eq!(february.range(Unit::Year).unwrap(), (1, 365));
        assert!(february.range(Unit::Day).is_err());
    }

    #[test]
    fn week_of_month_and_era_ranges() {
        assert_eq!(CalendarDate::new(2015, 2, 1).week_of_month_range(), (1, 4));
        assert_eq!(CalendarDate::new(2024, 2, 1).week_of_month_range(), (1, 5));
        assert_eq!(CalendarDate::new(2015, 6, 1).week_of_month_range(), (1, 5));
        // Read from the normalized month: 2015-01-32 is in February.
        assert_eq!(CalendarDate::new(2015, 1, 32).week_of_month_range(), (1, 4));

        assert_eq!(CalendarDate::new(1, 1, 1).year_of_era_range(), (1, MAX_YEAR));
        assert_eq!(CalendarDate::new(1, 1, 0).year_of_era_range(), (1, MAX_YEAR + 1));
        assert_eq!(CalendarDate::MIN.year_of_era_range(), (1, MAX_YEAR + 1));
    }

    #[test]
    fn until_period() {
        let start = CalendarDate::new(2024, 1, 31);
        let end = CalendarDate::new(2024, 3, 1);
        let period = start.until(&end);
        assert_eq!((period.years(), period.months(), period.days()), (0, 1, -1));

        let start = CalendarDate::new(2024, 3, 1);
        let end = CalendarDate::new(2024, 1, 31);
        let period = start.until(&end);
        assert_eq!((period.years(), period.months(), period.days()), (0, -1, -1));

        let start = CalendarDate::new(2020, 5, 15);
        let end = CalendarDate::new(2023, 5, 14);
        let period = start.until(&end);
        assert_eq!((period.years(), period.months(), period.days()), (2, 11, 29));
    }

    #[test]
    fn until_inverse_property() {
        let anchors = [
            CalendarDate::new(2024, 1, 31),
            CalendarDate::new(2024, 2, 29),
            CalendarDate::new(1999, 12, 31),
            CalendarDate::new(-1, 3, 30),
            CalendarDate::new(0, 2, 29),
            CalendarDate::new(2023, 1, 59),
            CalendarDate::new(2023, 2, 30),
            CalendarDate::new(2024, 14, -3),
        ];
        for start in anchors {
            for offset in (0..1_500).step_by(7) {
                let end = start.plus_days(offset);
                let period = start.until(&end);
                let back = start
                    .plus_years(period.years())
                    .plus_months(period.months())
                    .plus_days(period.days());
                assert_eq!(back, end, "{start} + {period} != {end}");
            }
        }
    }

    #[test]
    fn until_counts_days_from_the_raw_start() {
        let start = CalendarDate::new(2023, 1, 59);
        let end = CalendarDate::new(2023, 3, 28);
        assert_eq!(start, CalendarDate::new(2023, 2, 28));

        let period = start.until(&end);
        assert_eq!((period.years(), period.months(), period.days()), (0, 1, -3));
        let back = start.plus_months(period.months()).plus_days(period.days());
        assert_eq!(back, end);

        // A normalized start gives the plain difference.
        let period = CalendarDate::new(2023, 2, 28).until(&end);
        assert_eq!((period.years(), period.months(), period.days()), (0, 1, 0));
    }

    #[test]
    fn until_units() {
        let start = CalendarDate::new(2024, 1, 31);
        let end = CalendarDate::new(2024, 3, 30);
        assert_eq!(start.until_unit(&end, Unit::Day).unwrap(), 59);
        assert_eq!(start.until_unit(&end, Unit::Week).unwrap(), 8);
        assert_eq!(start.until_unit(&end, Unit::Month).unwrap(), 1);
        assert_eq!(start.until_unit(&end, Unit::Year).unwrap(), 0);
        assert_eq!(end.until_unit(&start, Unit::Week).unwrap(), -8);
        assert_eq!(end.until_unit(&start, Unit::Month).unwrap(), -1);
        let later = CalendarDate::new(2026, 1, 31);
        assert_eq!(start.until_unit(&later, Unit::Year).unwrap(), 2);
        assert!(start.until_unit(&end, Unit::Second).is_err());
    }

    #[test]
    fn field_arithmetic() {
        let lhs = CalendarDate::new(2024, 1, 31);
        let rhs = CalendarDate::new(1, 2, 1);
        assert_date(lhs.add_fields(&rhs), (2025, 4, 1));
        assert_date(lhs.subtract_fields(&rhs), (2022, 11, 30));
    }

    #[test]
    fn strings() {
        let date = CalendarDate::new(2024, 2, 29);
        assert_eq!(date.to_string(), "2024.02.29");
        assert_eq!(date.to_ixdtf_string(), "2024-02-29");
        assert_eq!(CalendarDate::new(-12, 13, 1).to_string(), "-0011.01.01");
        assert_eq!(CalendarDate::new(12_345, 6, 7).to_ixdtf_string(), "+012345-06-07");

        assert_eq!(CalendarDate::parse("2024-02-29T10:15:00"), Some(date));
        assert_eq!(CalendarDate::parse("-000001-12-31"), Some(CalendarDate::new(-1, 12, 31)));
        assert!(CalendarDate::parse("2024-02-30").is_none());
        assert!(CalendarDate::parse("2024-02-29T10:15:00Z").is_none());
        assert!(CalendarDate::from_str("yesterday").is_err());
    }

    #[test]
    fn epoch_nanosecond_conversion() {
        let date = CalendarDate::new(1970, 1, 2);
        let utc = date.to_epoch_nanoseconds(UtcOffset::UTC).unwrap();
        assert_eq!(utc.as_i128(), i128::from(NANOS_PER_DAY));

        let plus_one = UtcOffset::from_seconds(3_600).unwrap();
        let shifted = date.to_epoch_nanoseconds(plus_one).unwrap();
        assert_eq!(shifted.as_i128(), i128::from(NANOS_PER_DAY) - 3_600_000_000_000);

        let back = CalendarDate::from_epoch_nanoseconds(shifted, plus_one).unwrap();
        assert_eq!(back, date);
        let in_utc = CalendarDate::from_epoch_nanoseconds(shifted, UtcOffset::UTC).unwrap();
        assert_eq!(in_utc, CalendarDate::new(1970, 1, 1));

        assert!(CalendarDate::MAX.to_epoch_nanoseconds(UtcOffset::UTC).is_ok());
        assert!(CalendarDate::MAX
            .plus_days(1)
            .to_epoch_nanoseconds(UtcOffset::UTC)
            .is_err());
        assert!(CalendarDate::from_epoch_nanoseconds(
            EpochNanoseconds::from(i128::MAX),
            UtcOffset::UTC
        )
        .is_err());
    }
}
