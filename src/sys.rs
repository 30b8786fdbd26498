use crate::builtins::Now;
use crate::error::ErrorMessage;
use crate::host::{HostClock, HostHooks, HostTimeZone};
use crate::time::EpochNanoseconds;
use crate::{CalendarError, CalendarResult, UtcOffset};

use web_time::{SystemTime, UNIX_EPOCH};

/// The entry point for reading the current system time.
pub struct Clock;

impl Clock {
    /// Get a `Now` object with a [`UtcHostSystem`], which
    /// will use UTC as the fallback offset.
    pub fn utc_now() -> Now<UtcHostSystem> {
        Now::new(UtcHostSystem)
    }
}

/// A UTC host system implementation that will return the current time
/// with UTC as the fallback offset.
///
/// This implementation is backed by [`web_time::SystemTime`].
pub struct UtcHostSystem;

impl HostHooks for UtcHostSystem {}

impl HostClock for UtcHostSystem {
    fn get_host_epoch_nanoseconds(&self) -> CalendarResult<EpochNanoseconds> {
        get_system_nanoseconds()
    }
}

impl HostTimeZone for UtcHostSystem {
    fn get_host_offset(&self) -> CalendarResult<UtcOffset> {
        Ok(UtcOffset::UTC)
    }
}

/// Returns the system time in nanoseconds.
pub(crate) fn get_system_nanoseconds() -> CalendarResult<EpochNanoseconds> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_e| {
            #[cfg(feature = "log")]
            log::debug!("system clock is before the unix epoch: {_e}");
            CalendarError::general(ErrorMessage::SystemTimeUnavailable.to_str())
        })
        .map(|d| EpochNanoseconds::from(d.as_nanos() as i128))
}

#[cfg(test)]
mod tests {
    use super::{get_system_nanoseconds, Clock};

    #[test]
    fn system_clock_is_after_2024() {
        // 2024-01-01T00:00:00Z
        let nanos = get_system_nanoseconds().unwrap();
        assert!(nanos.as_i128() > 1_704_067_200_000_000_000);

        let today = Clock::utc_now().date(None).unwrap();
        assert!(today.year() >= 2024);
    }
}
