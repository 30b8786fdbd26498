//! The core calendar value types.
//!
//! None of these types read the host clock or the host time zone. The
//! [`Now`] type is the only entry point that does, through the traits in
//! `crate::host`.

pub(crate) mod timezone;

mod date;
pub use date::CalendarDate;

mod datetime;
pub use datetime::CalendarDateTime;

mod now;
pub use now::Now;

mod period;
pub use period::CalendarPeriod;

mod time;
pub use time::TimeOfDay;
