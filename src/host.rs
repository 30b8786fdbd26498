//! Trait definitions for accessing values from the host environment.
//!
//! The calendar value types never read the host on their own. A [`Now`][crate::Now]
//! is built from a `HostHooks` implementation and is the only place where
//! the clock and the host's offset are consulted.

use crate::{time::EpochNanoseconds, CalendarResult, UtcOffset};

/// The `HostClock` trait defines an accessor to the host's clock.
pub trait HostClock {
    fn get_host_epoch_nanoseconds(&self) -> CalendarResult<EpochNanoseconds>;
}

/// The `HostTimeZone` trait defines the host's offset from UTC.
pub trait HostTimeZone {
    fn get_host_offset(&self) -> CalendarResult<UtcOffset>;
}

/// `HostHooks` marks whether a trait implements the required host hooks with some
/// system methods.
pub trait HostHooks: HostClock + HostTimeZone {
    fn get_system_epoch_nanoseconds(&self) -> CalendarResult<EpochNanoseconds> {
        self.get_host_epoch_nanoseconds()
    }

    fn get_system_offset(&self) -> CalendarResult<UtcOffset> {
        self.get_host_offset()
    }
}

// Implement empty providers

impl HostClock for () {
    fn get_host_epoch_nanoseconds(&self) -> CalendarResult<EpochNanoseconds> {
        Ok(EpochNanoseconds::from_seconds(0))
    }
}

impl HostTimeZone for () {
    fn get_host_offset(&self) -> CalendarResult<UtcOffset> {
        Ok(UtcOffset::UTC)
    }
}

impl HostHooks for () {}
