//! No-std decimal formatting and parsing for report fields.
//!
//! Numbers are written directly into byte buffers without heap
//! allocation or the standard library.

use crate::error::ParseError;

/// Write an i16 as a signed decimal string.
///
/// Returns the number of bytes written (1-6 bytes).
///
/// # Panics
///
/// Panics if `buf.len() < 6` (max size: "-32768").
#[inline]
pub fn write_i16(buf: &mut [u8], value: i16) -> usize {
    debug_assert!(buf.len() >= 6, "buffer too small for i16");

    let mut pos = 0;
    if value < 0 {
        buf[0] = b'-';
        pos = 1;
    }
    // widen so i16::MIN negates cleanly
    pos + write_digits(&mut buf[pos..], i32::from(value).unsigned_abs())
}

/// Write a u8 as an unsigned decimal string.
///
/// Returns the number of bytes written (1-3 bytes).
///
/// # Panics
///
/// Panics if `buf.len() < 3` (max size: "255").
#[inline]
pub fn write_u8(buf: &mut [u8], value: u8) -> usize {
    debug_assert!(buf.len() >= 3, "buffer too small for u8");
    write_digits(buf, u32::from(value))
}

fn write_digits(buf: &mut [u8], value: u32) -> usize {
    if value == 0 {
        buf[0] = b'0';
        return 1;
    }

    // Write digits in reverse order to temporary buffer
    let mut temp = [0u8; 10];
    let mut n = value;
    let mut len = 0;
    while n > 0 {
        temp[len] = b'0' + (n % 10) as u8;
        n /= 10;
        len += 1;
    }

    // Copy digits in correct order
    for i in 0..len {
        buf[i] = temp[len - 1 - i];
    }
    len
}

/// Parse a decimal string as i16, with an optional sign.
pub fn parse_i16(s: &[u8]) -> Result<i16, ParseError> {
    let (negative, digits) = match s.first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = parse_digits(digits)?;
    let value = if negative { -magnitude } else { magnitude };
    i16::try_from(value).map_err(|_| ParseError::Number)
}

/// Parse a decimal string as u8.
pub fn parse_u8(s: &[u8]) -> Result<u8, ParseError> {
    u8::try_from(parse_digits(s)?).map_err(|_| ParseError::Number)
}

fn parse_digits(s: &[u8]) -> Result<i32, ParseError> {
    if s.is_empty() {
        return Err(ParseError::Number);
    }

    let mut value: i32 = 0;
    for &b in s {
        if !b.is_ascii_digit() {
            return Err(ParseError::Number);
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as i32))
            .ok_or(ParseError::Number)?;
    }
    Ok(value)
}
