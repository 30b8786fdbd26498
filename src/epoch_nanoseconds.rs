use num_traits::ToPrimitive;

use crate::{error::ErrorMessage, CalendarError, CalendarResult, NANOS_PER_SECOND};

/// A count of nanoseconds since 1970-01-01T00:00:00Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EpochNanoseconds(pub(crate) i128);

impl From<i128> for EpochNanoseconds {
    fn from(value: i128) -> Self {
        Self(value)
    }
}

impl EpochNanoseconds {
    /// Creates an `EpochNanoseconds` from whole seconds.
    #[inline]
    #[must_use]
    pub fn from_seconds(seconds: i64) -> Self {
        Self(i128::from(seconds) * i128::from(NANOS_PER_SECOND))
    }

    /// Returns the nanoseconds since the unix epoch.
    #[inline]
    #[must_use]
    pub const fn as_i128(&self) -> i128 {
        self.0
    }

    /// Returns the whole seconds of this instant, rounded toward negative infinity.
    pub fn as_seconds(&self) -> CalendarResult<i64> {
        self.0
            .div_euclid(i128::from(NANOS_PER_SECOND))
            .to_i64()
            .ok_or(CalendarError::range().with_enum(ErrorMessage::InstantOutOfRange))
    }

    /// Checks that this instant falls inside the supported year range.
    pub fn check_validity(&self) -> CalendarResult<()> {
        if !is_valid_epoch_nanos(&self.0) {
            #[cfg(feature = "log")]
            log::debug!("epoch nanoseconds out of range: {}", self.0);
            return Err(CalendarError::range().with_enum(ErrorMessage::InstantOutOfRange));
        }
        Ok(())
    }
}

/// Utility for determining if the nanos are within a valid range.
#[inline]
#[must_use]
pub(crate) fn is_valid_epoch_nanos(nanos: &i128) -> bool {
    (crate::NS_MIN_INSTANT..=crate::NS_MAX_INSTANT).contains(nanos)
}

#[cfg(test)]
mod tests {
    use super::EpochNanoseconds;

    #[test]
    fn validity_bounds() {
        assert!(EpochNanoseconds::from(0).check_validity().is_ok());
        assert!(EpochNanoseconds::from(crate::NS_MAX_INSTANT)
            .check_validity()
            .is_ok());
        assert!(EpochNanoseconds::from(crate::NS_MAX_INSTANT + 1)
            .check_validity()
            .is_err());
        assert!(EpochNanoseconds::from(crate::NS_MIN_INSTANT - 1)
            .check_validity()
            .is_err());
    }

    #[test]
    fn seconds_round_toward_negative_infinity() {
        assert_eq!(EpochNanoseconds::from(-1).as_seconds(), Ok(-1));
        assert_eq!(EpochNanoseconds::from_seconds(42).as_seconds(), Ok(42));
    }
}
