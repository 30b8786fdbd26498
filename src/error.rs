//! This module implements `CalendarError`.

use alloc::borrow::Cow;
use core::fmt;

/// `CalendarError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error kind for any uncategorized failure.
    #[default]
    Generic,
    /// Error kind for a value outside of its supported range.
    Range,
    /// Error kind for text that could not be parsed.
    Syntax,
    /// Error kind for an internal assertion that did not hold.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "RangeError",
            Self::Syntax => "SyntaxError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `calendar_rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl CalendarError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a syntax error.
    #[inline]
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Creates an assertion error
    #[inline]
    #[must_use]
    pub(crate) const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Add one of the library's fixed messages to the error.
    #[inline]
    #[must_use]
    pub fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = Cow::Borrowed(msg.to_str());
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for CalendarError {}

/// The fixed error messages used across the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorMessage {
    // Unit errors
    UnsupportedUnit,
    // Range errors
    DateOutOfRange,
    InvalidDate,
    InstantOutOfRange,
    OffsetOutOfRange,
    // Host errors
    SystemTimeUnavailable,
    // Parser errors
    ParserNeedsDate,
    ParserNeedsTime,
    UtcDesignatorNotAllowed,
    InvalidFraction,
}

impl ErrorMessage {
    /// Returns the message as a static string.
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::UnsupportedUnit => "The provided unit is not supported for this operation.",
            Self::DateOutOfRange => "Date is outside of the supported year range.",
            Self::InvalidDate => "Date fields do not form a valid date.",
            Self::InstantOutOfRange => "Instant nanoseconds are not within a valid epoch range.",
            Self::OffsetOutOfRange => "UTC offset must be less than 24 hours in magnitude.",
            Self::SystemTimeUnavailable => "Error fetching system time.",
            Self::ParserNeedsDate => "Could not find a valid DateRecord node during parsing.",
            Self::ParserNeedsTime => "Could not find a valid TimeRecord node during parsing.",
            Self::UtcDesignatorNotAllowed => "UTC designator is not valid for a local value.",
            Self::InvalidFraction => "Fractional seconds could not be represented.",
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_includes_kind_and_message() {
        let err = CalendarError::range().with_enum(ErrorMessage::UnsupportedUnit);
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            err.to_string(),
            "RangeError: The provided unit is not supported for this operation."
        );
        assert_eq!(CalendarError::syntax().to_string(), "SyntaxError");
        assert_eq!(
            CalendarError::general("clock unavailable").to_string(),
            "Error: clock unavailable"
        );
    }
}
