//! The `calendar_rs` crate implements proleptic Gregorian calendar values
//! and the arithmetic between them.
//!
//! ```rust
//! use calendar_rs::{CalendarDate, CalendarPeriod, Unit};
//!
//! let leap_day = CalendarDate::new(2024, 2, 29);
//! let later = CalendarDate::new(2025, 4, 10);
//!
//! let period = leap_day.until(&later);
//! assert_eq!((period.years(), period.months(), period.days()), (1, 1, 12));
//!
//! // A day past the end of the month is carried into the next month.
//! let overflowed = leap_day.plus_days(1);
//! assert_eq!((overflowed.month(), overflowed.day()), (3, 1));
//!
//! assert_eq!(leap_day.until_unit(&later, Unit::Day).unwrap(), 406);
//! ```
//!
//! There are four value types:
//!
//!   - [`CalendarDate`]: a `(year, month, day)` triple.
//!   - [`TimeOfDay`]: an `(hour, minute, second, nanosecond)` quadruple.
//!   - [`CalendarDateTime`]: a date and a time of day.
//!   - [`CalendarPeriod`]: a seven field signed displacement.
//!
//! Dates, times and date-times keep the raw fields they were built with.
//! Out of range fields (a 13th month, a 45th day, hour 25) are legal and are
//! carried into the larger units whenever the value is read. Periods carry
//! their fields eagerly on every construction and mutation.
//!
//! All arithmetic is exact integer arithmetic over the years
//! `-999_999_999..=999_999_999`.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_panics_doc,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod host;
pub mod options;
pub mod parsers;

#[cfg(feature = "sys")]
pub(crate) mod sys;

mod builtins;
mod epoch_nanoseconds;
mod iso;

use core::cmp::Ordering;

use date_equations::gregorian;

#[doc(inline)]
pub use error::CalendarError;

/// The `calendar_rs` result type
pub type CalendarResult<T> = Result<T, CalendarError>;

pub mod time {
    //! Instants on the host's time line.
    pub use crate::epoch_nanoseconds::EpochNanoseconds;
}

pub use crate::builtins::{
    core::timezone::UtcOffset, CalendarDate, CalendarDateTime, CalendarPeriod, Now, TimeOfDay,
};
pub use crate::options::Unit;

#[cfg(feature = "sys")]
pub use crate::sys::{Clock, UtcHostSystem};

/// A library specific trait for unwrapping assertions.
pub(crate) trait CalendarUnwrap {
    type Output;

    /// `calendar_rs` based assertion for unwrapping. This will panic in
    /// debug builds, but returns an error during runtime.
    fn calendar_unwrap(self) -> CalendarResult<Self::Output>;
}

impl<T> CalendarUnwrap for Option<T> {
    type Output = T;

    fn calendar_unwrap(self) -> CalendarResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(CalendarError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! calendar_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::CalendarError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::CalendarError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i8> for Sign {
    fn from(value: i8) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl Sign {
    pub(crate) fn negate(&self) -> Sign {
        Sign::from(-(*self as i8))
    }
}

// Relevant numeric constants

/// The smallest supported year.
pub const MIN_YEAR: i64 = -999_999_999;
/// The largest supported year.
pub const MAX_YEAR: i64 = 999_999_999;

/// Hours per day constant: 24
pub const HOURS_PER_DAY: i64 = 24;
/// Minutes per hour constant: 60
pub const MINUTES_PER_HOUR: i64 = 60;
/// Seconds per minute constant: 60
pub const SECONDS_PER_MINUTE: i64 = 60;
/// Nanoseconds per second constant: 1e+9
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
/// Minutes per day constant: 1440
pub const MINUTES_PER_DAY: i64 = MINUTES_PER_HOUR * HOURS_PER_DAY;
/// Seconds per day constant: 86400
pub const SECONDS_PER_DAY: i64 = SECONDS_PER_MINUTE * MINUTES_PER_DAY;
/// Nanoseconds per minute constant: 6e+10
pub const NANOS_PER_MINUTE: i64 = NANOS_PER_SECOND * SECONDS_PER_MINUTE;
/// Nanoseconds per hour constant: 3.6e+12
pub const NANOS_PER_HOUR: i64 = NANOS_PER_MINUTE * MINUTES_PER_HOUR;
/// Nanoseconds per day constant: 8.64e+13
pub const NANOS_PER_DAY: i64 = NANOS_PER_SECOND * SECONDS_PER_DAY;

/// Max instant nanosecond constant, the last nanosecond of `MAX_YEAR` in UTC.
#[doc(hidden)]
pub(crate) const NS_MAX_INSTANT: i128 =
    (gregorian::epoch_days_from_date(MAX_YEAR, 12, 31) as i128 + 1) * NANOS_PER_DAY as i128 - 1;
/// Min instant nanosecond constant, the first nanosecond of `MIN_YEAR` in UTC.
#[doc(hidden)]
pub(crate) const NS_MIN_INSTANT: i128 =
    gregorian::epoch_days_from_date(MIN_YEAR, 1, 1) as i128 * NANOS_PER_DAY as i128;
