//! The `Now` component, which reads the current time from a host.

use crate::{
    builtins::core::{timezone::UtcOffset, CalendarDate, CalendarDateTime, TimeOfDay},
    host::HostHooks,
    iso::IsoDateTime,
    time::EpochNanoseconds,
    CalendarResult,
};

/// Builds calendar values for the current time of a host.
///
/// ```rust
/// use calendar_rs::{CalendarDate, Now, UtcOffset};
///
/// // The unit host is a clock stopped at the unix epoch in UTC.
/// let now = Now::new(());
/// assert_eq!(now.date(None).unwrap(), CalendarDate::new(1970, 1, 1));
///
/// let offset = UtcOffset::from_hours_minutes(-1, 0).unwrap();
/// assert_eq!(now.date(Some(offset)).unwrap(), CalendarDate::new(1969, 12, 31));
/// ```
pub struct Now<H: HostHooks> {
    host_hooks: H,
}

impl<H: HostHooks> Now<H> {
    /// Creates a new `Now` reading from `host_hooks`.
    pub const fn new(host_hooks: H) -> Self {
        Self { host_hooks }
    }

    /// Resolves the offset and reads the clock.
    ///
    /// ## Order of operations
    ///
    /// The host offset is resolved before the clock is read, so a slow
    /// offset lookup does not skew the returned time.
    fn system_datetime(&self, offset: Option<UtcOffset>) -> CalendarResult<IsoDateTime> {
        let offset = match offset {
            Some(offset) => offset,
            None => self.host_hooks.get_system_offset()?,
        };
        let epoch_nanoseconds = self.host_hooks.get_system_epoch_nanoseconds()?;
        IsoDateTime::from_epoch_nanoseconds(epoch_nanoseconds, offset.seconds().into())
    }

    /// Returns the current instant.
    pub fn epoch_nanoseconds(&self) -> CalendarResult<EpochNanoseconds> {
        let epoch_nanoseconds = self.host_hooks.get_system_epoch_nanoseconds()?;
        epoch_nanoseconds.check_validity()?;
        Ok(epoch_nanoseconds)
    }

    /// Returns the current date in `offset`, or in the host's offset when
    /// `offset` is `None`.
    pub fn date(&self, offset: Option<UtcOffset>) -> CalendarResult<CalendarDate> {
        let iso = self.system_datetime(offset)?;
        Ok(CalendarDate::new_unchecked(iso.date))
    }

    /// Returns the current time of day in `offset`, or in the host's offset
    /// when `offset` is `None`.
    pub fn time(&self, offset: Option<UtcOffset>) -> CalendarResult<TimeOfDay> {
        let iso = self.system_datetime(offset)?;
        Ok(TimeOfDay::new_unchecked(iso.time))
    }

    /// Returns the current date and time in `offset`, or in the host's
    /// offset when `offset` is `None`.
    pub fn date_time(&self, offset: Option<UtcOffset>) -> CalendarResult<CalendarDateTime> {
        self.system_datetime(offset)
            .map(CalendarDateTime::new_unchecked)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::cell::Cell;

    use super::Now;
    use crate::{
        error::ErrorKind,
        host::{HostClock, HostHooks, HostTimeZone},
        options::Unit,
        time::EpochNanoseconds,
        CalendarError, CalendarResult, UtcOffset,
    };

    // 2025-03-12T03:46:28.077363694Z
    const TIME_BASE: i128 = 1_741_751_188_077_363_694;

    struct MockHost {
        nanos: Cell<i128>,
        offset: UtcOffset,
    }

    impl MockHost {
        fn new(offset: UtcOffset) -> Self {
            Self {
                nanos: Cell::new(TIME_BASE),
                offset,
            }
        }

        fn advance_seconds(&self, seconds: i128) {
            self.nanos.set(self.nanos.get() + seconds * 1_000_000_000);
        }
    }

    impl HostClock for MockHost {
        fn get_host_epoch_nanoseconds(&self) -> CalendarResult<EpochNanoseconds> {
            Ok(EpochNanoseconds::from(self.nanos.get()))
        }
    }

    impl HostTimeZone for MockHost {
        fn get_host_offset(&self) -> CalendarResult<UtcOffset> {
            Ok(self.offset)
        }
    }

    impl HostHooks for MockHost {}

    struct BrokenClock;

    impl HostClock for BrokenClock {
        fn get_host_epoch_nanoseconds(&self) -> CalendarResult<EpochNanoseconds> {
            Err(CalendarError::general("clock unavailable"))
        }
    }

    impl HostTimeZone for BrokenClock {
        fn get_host_offset(&self) -> CalendarResult<UtcOffset> {
            Ok(UtcOffset::UTC)
        }
    }

    impl HostHooks for BrokenClock {}

    #[test]
    fn mocked_datetime() {
        let cdt = UtcOffset::from_hours_minutes(-5, 0).unwrap();
        let now = Now::new(MockHost::new(cdt));

        let dt = now.date_time(None).unwrap();
        assert_eq!(dt.year(), 2025);
        assert_eq!(dt.month(), 3);
        assert_eq!(dt.day(), 11);
        assert_eq!(dt.hour(), 22);
        assert_eq!(dt.minute(), 46);
        assert_eq!(dt.second(), 28);
        assert_eq!(dt.nanosecond(), 77_363_694);

        // An explicit offset wins over the host's.
        let utc = now.date_time(Some(UtcOffset::UTC)).unwrap();
        assert_eq!((utc.day(), utc.hour()), (12, 3));
        assert_eq!(now.date(Some(UtcOffset::UTC)).unwrap(), utc.date());
        assert_eq!(now.time(None).unwrap(), dt.time());

        now.host_hooks.advance_seconds(5);
        let later = now.date_time(None).unwrap();
        assert_eq!(later.second(), 33);
        assert_eq!(dt.until(&later, Unit::Second).unwrap(), 5);
        assert_eq!(dt.until(&later, Unit::Minute).unwrap(), 0);
        assert_eq!(
            now.epoch_nanoseconds().unwrap().as_i128(),
            TIME_BASE + 5_000_000_000
        );
    }

    #[test]
    fn unit_host_is_the_epoch() {
        let now = Now::new(());
        assert_eq!(now.epoch_nanoseconds().unwrap().as_i128(), 0);
        assert_eq!(now.date_time(None).unwrap().to_string(), "1970.01.01T00:00:00.000000000");
    }

    #[test]
    fn host_failures_are_reported() {
        let now = Now::new(BrokenClock);
        let err = now.date(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert!(now.epoch_nanoseconds().is_err());

        let host = MockHost::new(UtcOffset::UTC);
        host.nanos.set(crate::NS_MAX_INSTANT + 1);
        let now = Now::new(host);
        assert_eq!(now.time(None).unwrap_err().kind(), ErrorKind::Range);
    }
}
