//! This module implements date and time parsing and formatting.
//!
//! Parsing is delegated to [`ixdtf`], which reads RFC 9557 / ISO 8601
//! strings into records. Formatting writes the crate's two text layouts
//! through [`writeable`]:
//!
//!   - the dotted layout used by `Display`: `2024.02.29T13:05:09.000000001`
//!   - the ISO 8601 layout used by `to_ixdtf_string`: `2024-02-29T13:05:09.000000001`

use alloc::format;

use ixdtf::{
    encoding::Utf8,
    parsers::IxdtfParser,
    records::{IxdtfParseRecord, TimeRecord, UtcOffsetRecordOrZ},
    ParseError,
};
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{error::ErrorMessage, CalendarError, CalendarResult};

// ==== Parsing ====

fn map_parse_error(err: ParseError) -> CalendarError {
    CalendarError::syntax().with_message(format!("Parse error: {err:?}"))
}

/// A utility function for parsing a date or date-time string.
///
/// The string must contain a date. A `Z` designator is rejected because the
/// parsed value is a local value with no zone attached.
#[inline]
pub(crate) fn parse_date_time(source: &str) -> CalendarResult<IxdtfParseRecord<'_, Utf8>> {
    let record = IxdtfParser::from_utf8(source.as_bytes())
        .parse()
        .map_err(map_parse_error)?;

    if record.date.is_none() {
        return Err(CalendarError::syntax().with_enum(ErrorMessage::ParserNeedsDate));
    }
    if record.offset == Some(UtcOffsetRecordOrZ::Z) {
        return Err(CalendarError::syntax().with_enum(ErrorMessage::UtcDesignatorNotAllowed));
    }

    Ok(record)
}

/// A utility function for parsing a time string.
///
/// A bare time (`T13:05`, `13:05:09.5`) is tried first, then a full
/// date-time whose time part is returned.
#[inline]
pub(crate) fn parse_time(source: &str) -> CalendarResult<TimeRecord> {
    match IxdtfParser::from_utf8(source.as_bytes()).parse_time() {
        Ok(record) => check_time_record(record),
        Err(e) => match parse_date_time(source) {
            Ok(record) => check_time_record(record),
            Err(_) => Err(map_parse_error(e)),
        },
    }
}

// Ensures that a record was parsed with a time and without a `Z` designator.
fn check_time_record(record: IxdtfParseRecord<'_, Utf8>) -> CalendarResult<TimeRecord> {
    if record.offset == Some(UtcOffsetRecordOrZ::Z) {
        return Err(CalendarError::syntax().with_enum(ErrorMessage::UtcDesignatorNotAllowed));
    }
    record
        .time
        .ok_or(CalendarError::syntax().with_enum(ErrorMessage::ParserNeedsTime))
}

// ==== Formatting ====

/// The separator style used to write a date.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `YYYY.MM.DD`, with years padded to four digits.
    #[default]
    Dotted,
    /// `YYYY-MM-DD`, with years outside `0..=9999` written as `±YYYYYY`.
    Ixdtf,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precision {
    /// Write only as many fraction digits as needed.
    #[default]
    Auto,
    Minute,
    Digit(u8),
}

#[derive(Debug)]
pub struct FormattableDate {
    pub year: i64,
    pub month: u8,
    pub day: u8,
    pub style: DateStyle,
}

impl Writeable for FormattableDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let sep = match self.style {
            DateStyle::Dotted => {
                write_padded_year(self.year, 4, false, sink)?;
                '.'
            }
            DateStyle::Ixdtf => {
                write_ixdtf_year(self.year, sink)?;
                '-'
            }
        };
        sink.write_char(sep)?;
        write_padded_u8(self.month, sink)?;
        sink.write_char(sep)?;
        write_padded_u8(self.day, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::between(10, 17)
    }
}

#[derive(Debug)]
pub struct FormattableTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
    pub precision: Precision,
}

impl Writeable for FormattableTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        if self.precision == Precision::Minute {
            return Ok(());
        }
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)?;
        if (self.nanosecond == 0 && self.precision == Precision::Auto)
            || self.precision == Precision::Digit(0)
        {
            return Ok(());
        }
        sink.write_char('.')?;
        write_nanosecond(self.nanosecond, self.precision, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.precision == Precision::Minute {
            return LengthHint::exact(5);
        }
        let time_base = 8;
        if (self.nanosecond == 0 && self.precision == Precision::Auto)
            || self.precision == Precision::Digit(0)
        {
            return LengthHint::exact(time_base);
        }
        if let Precision::Digit(d) = self.precision {
            return LengthHint::exact(time_base + 1 + d.min(9) as usize);
        }
        LengthHint::between(time_base + 2, time_base + 10)
    }
}

/// A date, a time, or both joined by `T`.
#[derive(Debug, Default)]
pub struct FormattableDateTime {
    pub date: Option<FormattableDate>,
    pub time: Option<FormattableTime>,
}

impl Writeable for FormattableDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if let Some(date) = &self.date {
            date.write_to(sink)?;
        }
        if let Some(time) = &self.time {
            if self.date.is_some() {
                sink.write_char('T')?;
            }
            time.write_to(sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let date_length = self
            .date
            .as_ref()
            .map(Writeable::writeable_length_hint)
            .unwrap_or(LengthHint::exact(0));
        let time_length = self
            .time
            .as_ref()
            .map(|t| t.writeable_length_hint() + 1)
            .unwrap_or(LengthHint::exact(0));
        date_length + time_length
    }
}

/// A period written as an ISO 8601 duration, with each field carrying its own sign.
#[derive(Debug)]
pub struct FormattablePeriod {
    pub date: [i64; 3],
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl Writeable for FormattablePeriod {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_char('P')?;
        for (value, suffix) in self.date.iter().zip(['Y', 'M', 'D']) {
            checked_write_i64_with_suffix(*value, suffix, sink)?;
        }
        let has_time = self.hours != 0 || self.minutes != 0 || self.seconds != 0 || self.nanoseconds != 0;
        if !has_time {
            if self.date.iter().all(|v| *v == 0) {
                sink.write_str("T0S")?;
            }
            return Ok(());
        }
        sink.write_char('T')?;
        checked_write_i64_with_suffix(self.hours, 'H', sink)?;
        checked_write_i64_with_suffix(self.minutes, 'M', sink)?;
        if self.seconds != 0 || self.nanoseconds != 0 {
            self.seconds.write_to(sink)?;
            if self.nanoseconds != 0 {
                sink.write_char('.')?;
                write_nanosecond(self.nanoseconds, Precision::Auto, sink)?;
            }
            sink.write_char('S')?;
        }
        Ok(())
    }
}

impl_display_with_writeable!(FormattableDate);
impl_display_with_writeable!(FormattableTime);
impl_display_with_writeable!(FormattableDateTime);
impl_display_with_writeable!(FormattablePeriod);

fn checked_write_i64_with_suffix<W: core::fmt::Write + ?Sized>(
    value: i64,
    suffix: char,
    sink: &mut W,
) -> core::fmt::Result {
    if value == 0 {
        return Ok(());
    }
    value.write_to(sink)?;
    sink.write_char(suffix)
}

fn write_padded_u8<W: core::fmt::Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

fn write_nanosecond<W: core::fmt::Write + ?Sized>(
    nanoseconds: u32,
    precision: Precision,
    sink: &mut W,
) -> core::fmt::Result {
    let (digits, index) = u32_to_digits(nanoseconds);
    let precision = match precision {
        Precision::Digit(digit) if digit <= 9 => digit as usize,
        _ => index,
    };
    write_digit_slice_to_precision(&digits, 0, precision, sink)
}

/// Splits a value below 10^9 into its nine digits, returning the digits and
/// the count up to the last non zero digit.
pub fn u32_to_digits(mut value: u32) -> ([u8; 9], usize) {
    let mut output = [0; 9];
    let mut precision = 0;
    let mut i = 9;
    while i != 0 {
        let v = (value % 10) as u8;
        value /= 10;
        if precision == 0 && v != 0 {
            precision = i;
        }
        output[i - 1] = v;
        i -= 1;
    }

    (output, precision)
}

pub fn write_digit_slice_to_precision<W: core::fmt::Write + ?Sized>(
    digits: &[u8],
    base: usize,
    precision: usize,
    sink: &mut W,
) -> core::fmt::Result {
    for digit in digits.iter().take(precision).skip(base) {
        digit.write_to(sink)?;
    }
    Ok(())
}

fn write_ixdtf_year<W: core::fmt::Write + ?Sized>(year: i64, sink: &mut W) -> core::fmt::Result {
    if (0..=9999).contains(&year) {
        write_padded_year(year, 4, false, sink)
    } else {
        write_padded_year(year, 6, true, sink)
    }
}

fn write_padded_year<W: core::fmt::Write + ?Sized>(
    year: i64,
    width: usize,
    force_sign: bool,
    sink: &mut W,
) -> core::fmt::Result {
    if year < 0 {
        sink.write_char('-')?;
    } else if force_sign {
        sink.write_char('+')?;
    }
    let magnitude = year.unsigned_abs();
    let mut length = 1;
    let mut rest = magnitude / 10;
    while rest > 0 {
        length += 1;
        rest /= 10;
    }
    for _ in length..width {
        sink.write_char('0')?;
    }
    magnitude.write_to(sink)
}

#[cfg(test)]
mod tests {
    use super::{
        parse_date_time, parse_time, DateStyle, FormattableDate, FormattableDateTime,
        FormattablePeriod, FormattableTime, Precision,
    };
    use alloc::format;

    use crate::error::ErrorKind;
    use writeable::assert_writeable_eq;

    fn date(year: i64, month: u8, day: u8, style: DateStyle) -> FormattableDate {
        FormattableDate {
            year,
            month,
            day,
            style,
        }
    }

    #[test]
    fn dotted_dates() {
        assert_writeable_eq!(date(2024, 2, 29, DateStyle::Dotted), "2024.02.29");
        assert_writeable_eq!(date(5, 1, 1, DateStyle::Dotted), "0005.01.01");
        assert_writeable_eq!(date(-44, 3, 15, DateStyle::Dotted), "-0044.03.15");
        assert_writeable_eq!(
            date(999_999_999, 12, 31, DateStyle::Dotted),
            "999999999.12.31"
        );
    }

    #[test]
    fn ixdtf_dates() {
        assert_writeable_eq!(date(2024, 2, 29, DateStyle::Ixdtf), "2024-02-29");
        assert_writeable_eq!(date(-1, 12, 31, DateStyle::Ixdtf), "-000001-12-31");
        assert_writeable_eq!(date(10_000, 1, 1, DateStyle::Ixdtf), "+010000-01-01");
        assert_writeable_eq!(
            date(-999_999_999, 1, 1, DateStyle::Ixdtf),
            "-999999999-01-01"
        );
    }

    #[test]
    fn time_to_precision() {
        let time = FormattableTime {
            hour: 5,
            minute: 0,
            second: 0,
            nanosecond: 123_050_000,
            precision: Precision::Digit(9),
        };
        assert_writeable_eq!(time, "05:00:00.123050000");

        let time = FormattableTime {
            hour: 23,
            minute: 4,
            second: 9,
            nanosecond: 123_050_000,
            precision: Precision::Auto,
        };
        assert_writeable_eq!(time, "23:04:09.12305");

        let time = FormattableTime {
            hour: 23,
            minute: 4,
            second: 9,
            nanosecond: 0,
            precision: Precision::Auto,
        };
        assert_writeable_eq!(time, "23:04:09");
    }

    #[test]
    fn date_time_joins_with_t() {
        let dt = FormattableDateTime {
            date: Some(date(2024, 1, 31, DateStyle::Dotted)),
            time: Some(FormattableTime {
                hour: 1,
                minute: 2,
                second: 3,
                nanosecond: 4,
                precision: Precision::Digit(9),
            }),
        };
        assert_writeable_eq!(dt, "2024.01.31T01:02:03.000000004");
    }

    #[test]
    fn period_strings() {
        let period = FormattablePeriod {
            date: [1, 2, 3],
            hours: 4,
            minutes: 5,
            seconds: 6,
            nanoseconds: 700_000_000,
        };
        assert_writeable_eq!(period, "P1Y2M3DT4H5M6.7S");

        let period = FormattablePeriod {
            date: [0, 0, 0],
            hours: 0,
            minutes: 0,
            seconds: 0,
            nanoseconds: 0,
        };
        assert_writeable_eq!(period, "PT0S");

        let period = FormattablePeriod {
            date: [-1, 11, 30],
            hours: 0,
            minutes: 0,
            seconds: 0,
            nanoseconds: 0,
        };
        assert_writeable_eq!(period, "P-1Y11M30D");
    }

    #[test]
    fn parse_records() {
        let record = parse_date_time("2024-02-29").unwrap();
        let date = record.date.unwrap();
        assert_eq!((date.year, date.month, date.day), (2024, 2, 29));
        assert!(record.time.is_none());

        let record = parse_date_time("2024-02-29T13:05:09.5").unwrap();
        let time = record.time.unwrap();
        assert_eq!((time.hour, time.minute, time.second), (13, 5, 9));

        let err = parse_date_time("2024-02-29T13:05:09Z").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(parse_date_time("2024-13-01").is_err());
        assert!(parse_date_time("not a date").is_err());

        let time = parse_time("13:05:09").unwrap();
        assert_eq!((time.hour, time.minute, time.second), (13, 5, 9));
        let time = parse_time("2024-02-29T07:30").unwrap();
        assert_eq!((time.hour, time.minute), (7, 30));
        assert!(parse_time("2024-02-29").is_err());
    }
}
