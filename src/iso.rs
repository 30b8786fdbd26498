//! This module implements the internal field records.
//!
//! The three record types are:
//!   - `IsoDateTime`
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! The records store raw signed fields. A field may sit outside of its
//! normal range (month 13, day 45, hour 30) until the record is balanced.
//! Balancing is a pure function: it returns a new record and leaves the
//! original untouched, so public types can hold raw fields and still
//! present normalized values from `&self`.

use date_equations::gregorian;
use ixdtf::records::{DateRecord, TimeRecord};
use num_traits::ToPrimitive;

use crate::{
    error::ErrorMessage, time::EpochNanoseconds, CalendarError, CalendarResult, Sign,
    HOURS_PER_DAY, MAX_YEAR, MINUTES_PER_HOUR, MIN_YEAR, NANOS_PER_DAY, NANOS_PER_HOUR,
    NANOS_PER_MINUTE, NANOS_PER_SECOND, SECONDS_PER_MINUTE,
};

// ==== `IsoDate` section ====

/// A raw `(year, month, day)` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IsoDate {
    pub(crate) year: i64,
    pub(crate) month: i64,
    pub(crate) day: i64,
}

impl IsoDate {
    /// Creates a new `IsoDate` without any validation.
    #[inline]
    pub(crate) const fn new_unchecked(year: i64, month: i64, day: i64) -> Self {
        Self { year, month, day }
    }

    /// Creates an `IsoDate` from a parsed `DateRecord`.
    pub(crate) fn from_date_record(record: DateRecord) -> Self {
        Self::new_unchecked(
            i64::from(record.year),
            i64::from(record.month),
            i64::from(record.day),
        )
    }

    /// Creates the balanced `IsoDate` for an epoch day.
    #[inline]
    pub(crate) const fn from_epoch_days(epoch_days: i64) -> Self {
        let (year, month, day) = gregorian::ymd_from_epoch_days(epoch_days);
        Self::new_unchecked(year, month as i64, day as i64)
    }

    /// Returns whether the month and day are inside their normal ranges.
    #[inline]
    pub(crate) fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= i64::from(gregorian::days_in_month(self.year, self.month as u8))
    }

    /// Returns the balanced version of this record.
    ///
    /// Month overflow is folded into the year first, then the day is
    /// applied through an epoch day round trip. A valid record is returned
    /// as is.
    pub(crate) fn balance(&self) -> Self {
        if self.is_valid() {
            return *self;
        }
        Self::from_epoch_days(self.to_epoch_days())
    }

    /// Returns the epoch day of this record, whether or not it is balanced.
    pub(crate) fn to_epoch_days(&self) -> i64 {
        let (year, month) = balance_year_month(self.year, self.month);
        gregorian::epoch_days_from_date(year, month as u8, self.day)
    }

    /// Returns `year * 12 + month - 1` of a balanced record.
    #[inline]
    pub(crate) const fn proleptic_month(&self) -> i64 {
        self.year * 12 + self.month - 1
    }

    /// The length of the month of a balanced record.
    #[inline]
    pub(crate) fn days_in_month(&self) -> i64 {
        i64::from(gregorian::days_in_month(self.year, self.month as u8))
    }

    /// Returns whether this balanced record is inside `MIN_YEAR..=MAX_YEAR`.
    #[inline]
    pub(crate) fn is_within_limits(&self) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&self.year)
    }

    /// Returns the `(years, months, days)` between two balanced records.
    ///
    /// Whole months are counted first. When the day component points the
    /// other way, one month is borrowed back and the residual days are
    /// recounted. Adding the result to `self` field by field and then
    /// balancing reproduces `other` when `self <= other`.
    pub(crate) fn diff(&self, other: &Self) -> (i64, i64, i64) {
        let mut total_months = other.proleptic_month() - self.proleptic_month();
        let mut days = other.day - self.day;
        if total_months > 0 && days < 0 {
            total_months -= 1;
            let shifted = Self::new_unchecked(self.year, self.month + total_months, self.day);
            days = other.to_epoch_days() - shifted.to_epoch_days();
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= other.days_in_month();
        }
        (total_months / 12, total_months % 12, days)
    }

    /// Returns the number of whole months from `self` to `other`, truncated
    /// toward zero. Both records must be balanced.
    pub(crate) fn months_until(&self, other: &Self) -> i64 {
        let packed_start = self.proleptic_month() * 32 + self.day;
        let packed_end = other.proleptic_month() * 32 + other.day;
        (packed_end - packed_start) / 32
    }

    /// Returns the ordering of two balanced records.
    #[inline]
    pub(crate) fn compare(&self, other: &Self) -> core::cmp::Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

// ==== `IsoTime` section ====

/// A raw `(hour, minute, second, nanosecond)` record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IsoTime {
    pub(crate) hour: i64,
    pub(crate) minute: i64,
    pub(crate) second: i64,
    pub(crate) nanosecond: i64,
}

impl IsoTime {
    /// Creates a new `IsoTime` without any validation.
    #[inline]
    pub(crate) const fn new_unchecked(hour: i64, minute: i64, second: i64, nanosecond: i64) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    /// Returns an `IsoTime` set to 12:00:00
    pub(crate) const fn noon() -> Self {
        Self::new_unchecked(12, 0, 0, 0)
    }

    /// Creates an `IsoTime` from a parsed `TimeRecord`.
    pub(crate) fn from_time_record(record: TimeRecord) -> CalendarResult<Self> {
        // A leap second is read as the last second of the minute.
        let second = record.second.clamp(0, 59);
        let nanosecond = record
            .fraction
            .map(|fraction| {
                fraction
                    .to_nanoseconds()
                    .ok_or(CalendarError::range().with_enum(ErrorMessage::InvalidFraction))
            })
            .transpose()?
            .unwrap_or(0);
        Ok(Self::new_unchecked(
            i64::from(record.hour),
            i64::from(record.minute),
            i64::from(second),
            i64::from(nanosecond),
        ))
    }

    /// Creates an `IsoTime` from a nanosecond count.
    ///
    /// Counts of a day or more are kept in the hour field, so the caller can
    /// still observe the overflow.
    pub(crate) fn from_nanosecond_of_day(nanos: i64) -> Self {
        let (hour, rem) = div_mod(nanos, NANOS_PER_HOUR);
        let (minute, rem) = div_mod(rem, NANOS_PER_MINUTE);
        let (second, nanosecond) = div_mod(rem, NANOS_PER_SECOND);
        Self::new_unchecked(hour, minute, second, nanosecond)
    }

    pub(crate) fn is_valid(&self) -> bool {
        (0..HOURS_PER_DAY).contains(&self.hour)
            && (0..MINUTES_PER_HOUR).contains(&self.minute)
            && (0..SECONDS_PER_MINUTE).contains(&self.second)
            && (0..NANOS_PER_SECOND).contains(&self.nanosecond)
    }

    /// Balances this record and returns the whole days that overflowed,
    /// alongside the balanced time.
    pub(crate) fn balance(&self) -> (i64, Self) {
        if self.is_valid() {
            return (0, *self);
        }
        // 1. Carry nanoseconds into seconds.
        let (quotient, nanosecond) = div_mod(self.nanosecond, NANOS_PER_SECOND);
        let second = self.second + quotient;
        // 2. Carry seconds into minutes.
        let (quotient, second) = div_mod(second, SECONDS_PER_MINUTE);
        let minute = self.minute + quotient;
        // 3. Carry minutes into hours.
        let (quotient, minute) = div_mod(minute, MINUTES_PER_HOUR);
        let hour = self.hour + quotient;
        // 4. Carry hours into days.
        let (days, hour) = div_mod(hour, HOURS_PER_DAY);

        (days, Self::new_unchecked(hour, minute, second, nanosecond))
    }

    /// Returns the nanosecond of the day of a balanced record.
    #[inline]
    pub(crate) const fn to_nanosecond_of_day(&self) -> i64 {
        self.hour * NANOS_PER_HOUR
            + self.minute * NANOS_PER_MINUTE
            + self.second * NANOS_PER_SECOND
            + self.nanosecond
    }

    /// Returns the ordering of two balanced records.
    #[inline]
    pub(crate) fn compare(&self, other: &Self) -> core::cmp::Ordering {
        self.to_nanosecond_of_day()
            .cmp(&other.to_nanosecond_of_day())
    }
}

// ==== `IsoDateTime` section ====

/// `IsoDateTime` is the record of an `IsoDate` and an `IsoTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IsoDateTime {
    pub(crate) date: IsoDate,
    pub(crate) time: IsoTime,
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime` without any validation.
    #[inline]
    pub(crate) const fn new_unchecked(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Returns the balanced version of this record.
    ///
    /// Overflowing time is carried into the day field before the date
    /// itself is balanced.
    ///
    /// The carry goes both ways and starts at the nanosecond: hour 25 adds
    /// a day, hour -1 borrows one, and 1440 minutes add a day the same way
    /// 24 hours do.
    pub(crate) fn balance(&self) -> Self {
        let (days, time) = self.time.balance();
        let date = IsoDate::new_unchecked(self.date.year, self.date.month, self.date.day + days);
        Self::new_unchecked(date.balance(), time)
    }

    /// Creates a balanced `IsoDateTime` from epoch nanoseconds shifted by
    /// `offset_seconds`.
    pub(crate) fn from_epoch_nanoseconds(
        epoch_nanoseconds: EpochNanoseconds,
        offset_seconds: i64,
    ) -> CalendarResult<Self> {
        epoch_nanoseconds.check_validity()?;
        let local = epoch_nanoseconds.as_i128()
            + i128::from(offset_seconds) * i128::from(NANOS_PER_SECOND);
        let nanos_per_day = i128::from(NANOS_PER_DAY);
        let epoch_days = local
            .div_euclid(nanos_per_day)
            .to_i64()
            .ok_or(CalendarError::range().with_enum(ErrorMessage::InstantOutOfRange))?;
        let nanos = local
            .rem_euclid(nanos_per_day)
            .to_i64()
            .ok_or(CalendarError::assert())?;
        let result = Self::new_unchecked(
            IsoDate::from_epoch_days(epoch_days),
            IsoTime::from_nanosecond_of_day(nanos),
        );
        if !result.date.is_within_limits() {
            return Err(CalendarError::range().with_enum(ErrorMessage::DateOutOfRange));
        }
        Ok(result)
    }

    /// Returns the epoch nanoseconds of this record when read in a zone
    /// that is `offset_seconds` ahead of UTC.
    pub(crate) fn as_epoch_nanoseconds(&self, offset_seconds: i64) -> CalendarResult<EpochNanoseconds> {
        let balanced = self.balance();
        if !balanced.date.is_within_limits() {
            #[cfg(feature = "log")]
            log::debug!("date-time outside of supported years: {balanced:?}");
            return Err(CalendarError::range().with_enum(ErrorMessage::DateOutOfRange));
        }
        let nanos = i128::from(balanced.date.to_epoch_days()) * i128::from(NANOS_PER_DAY)
            + i128::from(balanced.time.to_nanosecond_of_day())
            - i128::from(offset_seconds) * i128::from(NANOS_PER_SECOND);
        let result = EpochNanoseconds::from(nanos);
        result.check_validity()?;
        Ok(result)
    }

    /// Returns the end date to compare against when counting whole days
    /// from `self` to `other`. Both records must be balanced.
    ///
    /// When the time of day points the other way from the dates, the end
    /// date is moved one day toward `self` so that a partial day is not
    /// counted as a whole one.
    pub(crate) fn adjusted_end_date(&self, other: &Self) -> IsoDate {
        let time_sign = Sign::from(other.time.compare(&self.time) as i8);
        let date_sign = Sign::from(other.date.compare(&self.date) as i8);
        if time_sign != Sign::Zero && time_sign == date_sign.negate() {
            let day = other.date.day + i64::from(time_sign as i8);
            return IsoDate::new_unchecked(other.date.year, other.date.month, day).balance();
        }
        other.date
    }

    /// Returns the ordering of two balanced records.
    #[inline]
    pub(crate) fn compare(&self, other: &Self) -> core::cmp::Ordering {
        self.date
            .compare(&other.date)
            .then_with(|| self.time.compare(&other.time))
    }
}

// ==== Utility functions ====

/// Folds an out of range month into the year, returning a month in `1..=12`.
#[inline]
pub(crate) fn balance_year_month(year: i64, month: i64) -> (i64, i64) {
    let (quotient, month) = div_mod(month - 1, 12);
    (year + quotient, month + 1)
}

#[inline]
pub(crate) fn div_mod(dividend: i64, divisor: i64) -> (i64, i64) {
    (dividend.div_euclid(divisor), dividend.rem_euclid(divisor))
}
