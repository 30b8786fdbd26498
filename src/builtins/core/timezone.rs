//! This module implements `UtcOffset`, the fixed zone used for host conversions.

use core::fmt;

use writeable::Writeable;

use crate::{
    error::ErrorMessage,
    parsers::{FormattableTime, Precision},
    CalendarError, CalendarResult, Sign, SECONDS_PER_DAY,
};

/// A fixed offset from UTC, in seconds.
///
/// Conversions between calendar values and instants always take an explicit
/// `UtcOffset`. The default is UTC itself.
///
/// ```rust
/// use calendar_rs::UtcOffset;
///
/// let tokyo = UtcOffset::from_hours_minutes(9, 0).unwrap();
/// assert_eq!(tokyo.seconds(), 32_400);
/// assert_eq!(tokyo.to_string(), "+09:00");
/// assert_eq!(UtcOffset::default(), UtcOffset::UTC);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// The UTC offset, `+00:00`.
    pub const UTC: Self = Self(0);

    /// Creates a `UtcOffset` from a signed second count.
    ///
    /// The magnitude must be less than a day.
    pub fn from_seconds(seconds: i32) -> CalendarResult<Self> {
        if i64::from(seconds).abs() >= SECONDS_PER_DAY {
            return Err(CalendarError::range().with_enum(ErrorMessage::OffsetOutOfRange));
        }
        Ok(Self(seconds))
    }

    /// Creates a `UtcOffset` from hours and minutes, which share the same sign.
    pub fn from_hours_minutes(hours: i8, minutes: i8) -> CalendarResult<Self> {
        if hours != 0 && minutes != 0 && hours.signum() != minutes.signum() {
            return Err(CalendarError::range()
                .with_message("Offset hours and minutes must have the same sign."));
        }
        Self::from_seconds(i32::from(hours) * 3600 + i32::from(minutes) * 60)
    }

    /// Returns the offset in seconds.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i32 {
        self.0
    }

    /// Returns whether this offset is ahead of or behind UTC.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        Sign::from(self.0.signum() as i8)
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let second = (magnitude % 60) as u8;
        let time = FormattableTime {
            hour: (magnitude / 3600) as u8,
            minute: ((magnitude / 60) % 60) as u8,
            second,
            nanosecond: 0,
            precision: if second == 0 {
                Precision::Minute
            } else {
                Precision::Auto
            },
        };
        match self.sign() {
            Sign::Negative => f.write_str("-")?,
            _ => f.write_str("+")?,
        }
        time.write_to(f)
    }
}
