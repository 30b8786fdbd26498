//! The calendar value types.

pub mod core;

pub use self::core::*;
