//! Options shared by the calendar value types.
//!
//! Every `with`, `plus`, `minus`, `range` and `until` operation names the
//! field or unit it works on with a [`Unit`].

use core::{fmt, str::FromStr};

use crate::{
    error::ErrorMessage, CalendarError, CalendarResult, NANOS_PER_DAY, NANOS_PER_HOUR,
    NANOS_PER_MINUTE, NANOS_PER_SECOND,
};

/// The unit that an operation is applied to.
///
/// Units are ordered from the smallest to the largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    /// The `Nanosecond` unit
    Nanosecond,
    /// The `Second` unit
    Second,
    /// The `Minute` unit
    Minute,
    /// The `Hour` unit
    Hour,
    /// The `Day` unit
    Day,
    /// The `Week` unit
    Week,
    /// The `Month` unit
    Month,
    /// The `Year` unit
    Year,
}

impl Unit {
    /// Returns the nanosecond length of a fixed length unit.
    ///
    /// `Month` and `Year` vary in length and return `None`.
    #[must_use]
    pub const fn as_nanoseconds(&self) -> Option<i64> {
        match self {
            Self::Year | Self::Month => None,
            Self::Week => Some(NANOS_PER_DAY * 7),
            Self::Day => Some(NANOS_PER_DAY),
            Self::Hour => Some(NANOS_PER_HOUR),
            Self::Minute => Some(NANOS_PER_MINUTE),
            Self::Second => Some(NANOS_PER_SECOND),
            Self::Nanosecond => Some(1),
        }
    }

    /// Returns whether this unit is a day or longer.
    #[inline]
    #[must_use]
    pub const fn is_date_unit(&self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Week | Self::Day)
    }

    /// Returns whether this unit is shorter than a day.
    #[inline]
    #[must_use]
    pub const fn is_time_unit(&self) -> bool {
        matches!(
            self,
            Self::Hour | Self::Minute | Self::Second | Self::Nanosecond
        )
    }

    /// Returns the error raised when this unit is not supported by an operation.
    pub(crate) fn unsupported(self) -> CalendarError {
        #[cfg(feature = "log")]
        log::debug!("rejected unsupported unit: {self}");
        CalendarError::range().with_enum(ErrorMessage::UnsupportedUnit)
    }

    /// Shorthand for `Err(self.unsupported())`.
    pub(crate) fn reject<T>(self) -> CalendarResult<T> {
        Err(self.unsupported())
    }
}

/// A parsing error for `Unit`
#[derive(Debug, Clone, Copy)]
pub struct ParseUnitError;

impl fmt::Display for ParseUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid Unit")
    }
}

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" | "years" => Ok(Self::Year),
            "month" | "months" => Ok(Self::Month),
            "week" | "weeks" => Ok(Self::Week),
            "day" | "days" => Ok(Self::Day),
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" => Ok(Self::Minute),
            "second" | "seconds" => Ok(Self::Second),
            "nanosecond" | "nanoseconds" => Ok(Self::Nanosecond),
            _ => Err(ParseUnitError),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Nanosecond => "nanosecond",
        }
        .fmt(f)
    }
}
