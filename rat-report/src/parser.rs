//! Report line parser, for host-side tools reading the serial port.
//!
//! Accepts the lines produced by [`Serialize`](crate::Serialize) as well as
//! the looser form some firmware builds print: a trailing space after the
//! last value and `\r\n` line endings.

use heapless::Vec;

use crate::error::ParseError;
use crate::format::{parse_i16, parse_u8};
use crate::report::{StatusReport, MAX_AXES};

/// Parse one status report line.
///
/// # Example
///
/// ```
/// use rat_report::{parse_report, StatusReport};
///
/// assert_eq!(parse_report(b"BP 1\r\n"), Ok(StatusReport::ButtonPressed(1)));
/// ```
///
/// # Errors
///
/// See [`ParseError`].
pub fn parse_report(line: &[u8]) -> Result<StatusReport, ParseError> {
    let mut fields = line
        .split(|&b| b == b' ' || b == b'\r' || b == b'\n')
        .filter(|field| !field.is_empty());

    let tag = fields.next().ok_or(ParseError::Empty)?;

    match tag {
        b"AXES" => parse_axes(fields).map(StatusReport::Axes),
        b"NORM" => parse_axes(fields).map(StatusReport::Normalized),
        b"BP" => parse_button(fields).map(StatusReport::ButtonPressed),
        b"BR" => parse_button(fields).map(StatusReport::ButtonReleased),
        _ => Err(ParseError::UnknownTag),
    }
}

fn parse_axes<'a>(
    fields: impl Iterator<Item = &'a [u8]>,
) -> Result<Vec<i16, MAX_AXES>, ParseError> {
    let mut values = Vec::new();
    for field in fields {
        values
            .push(parse_i16(field)?)
            .map_err(|_| ParseError::TooManyValues)?;
    }
    Ok(values)
}

fn parse_button<'a>(mut fields: impl Iterator<Item = &'a [u8]>) -> Result<u8, ParseError> {
    let index = parse_u8(fields.next().ok_or(ParseError::Number)?)?;

    // Should have no more fields
    if fields.next().is_some() {
        return Err(ParseError::TooManyValues);
    }
    Ok(index)
}
