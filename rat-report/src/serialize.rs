//! Report serialization.
//!
//! # Line Format
//!
//! ```text
//! AXES 512 498 530 513\n
//! NORM 0 -3 12 100\n
//! BP 0\n
//! BR 0\n
//! ```
//!
//! # Example
//!
//! ```
//! use rat_report::{Serialize, StatusReport};
//!
//! let report = StatusReport::axes(&[512, 498, 530, 513]).unwrap();
//! let mut buf = [0u8; 64];
//! let len = report.serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], b"AXES 512 498 530 513\n");
//! ```

use crate::format::{write_i16, write_u8};
use crate::report::{StatusReport, MAX_AXES};

pub use crate::error::SerializeError;

/// Maximum size of a serialized report.
///
/// Breakdown: tag(4) + MAX_AXES * (space(1) + i16(6)) + \n(1) = 61
pub const MAX_REPORT_SIZE: usize = 4 + MAX_AXES * 7 + 1;

/// Cursor over the output buffer.
struct ReportBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ReportBuf<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn write_slice(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// Write a space-separated i16 field.
    #[inline]
    fn field_i16(&mut self, value: i16) {
        self.buf[self.pos] = b' ';
        self.pos += 1;
        self.pos += write_i16(&mut self.buf[self.pos..], value);
    }

    /// Write a space-separated u8 field.
    #[inline]
    fn field_u8(&mut self, value: u8) {
        self.buf[self.pos] = b' ';
        self.pos += 1;
        self.pos += write_u8(&mut self.buf[self.pos..], value);
    }

    /// Terminate the line and return its length.
    #[inline]
    fn finalize(self) -> usize {
        self.buf[self.pos] = b'\n';
        self.pos + 1
    }
}

/// Extension trait for serializing reports.
pub trait Serialize {
    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is shorter
    /// than [`MAX_REPORT_SIZE`].
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        // Resize to full capacity to allow serialize() to write
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Serialize to a `core::fmt::Write` implementation, e.g. `heapless::String`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_REPORT_SIZE];
        let len = self.serialize(&mut buf)?;

        let s = core::str::from_utf8(&buf[..len]).map_err(|_| SerializeError::WriteError)?;
        writer.write_str(s).map_err(|_| SerializeError::WriteError)
    }

    /// Serialize to an `embedded_io::Write` implementation such as a UART.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_REPORT_SIZE];
        let len = self.serialize(&mut buf)?;
        writer
            .write_all(&buf[..len])
            .map_err(|_| SerializeError::WriteError)
    }
}

impl Serialize for StatusReport {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        if buf.len() < MAX_REPORT_SIZE {
            return Err(SerializeError::BufferTooSmall);
        }

        let mut rb = ReportBuf::new(buf);
        rb.write_slice(self.tag());

        match self {
            Self::Axes(values) | Self::Normalized(values) => {
                for &value in values {
                    rb.field_i16(value);
                }
            }
            Self::ButtonPressed(index) | Self::ButtonReleased(index) => rb.field_u8(*index),
        }

        Ok(rb.finalize())
    }
}
