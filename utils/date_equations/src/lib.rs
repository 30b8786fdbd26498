//! # Date Equations
//!
//! Date Equations is a library of small, allocation free calendar
//! calculations for the proleptic Gregorian calendar. Every equation
//! is a `const fn` over plain integers and stays exact across the
//! full year range of ±999,999,999.
//!
//! ``` rust
//! use date_equations::gregorian;
//!
//! let date = gregorian::ymd_from_epoch_days(0);
//! assert_eq!(date, (1970, 1, 1));
//!
//! let epoch_days = gregorian::epoch_days_from_date(2000, 1, 1);
//! assert_eq!(epoch_days, 10_957);
//! assert_eq!(gregorian::day_of_week(2000, 1, 1), 6);
//! ```
#![no_std]

pub mod gregorian;
