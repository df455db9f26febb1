//! Error types for building, serializing and parsing reports.

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized report.
    BufferTooSmall,
    /// A write operation failed (for I/O adapters).
    WriteError,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

/// Error type for parsing report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Blank line.
    Empty,
    /// Line does not start with a known tag.
    UnknownTag,
    /// A field is not a valid number for its report, or is missing.
    Number,
    /// More fields than the report can carry.
    TooManyValues,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty line"),
            Self::UnknownTag => write!(f, "unknown report tag"),
            Self::Number => write!(f, "invalid number"),
            Self::TooManyValues => write!(f, "too many values"),
        }
    }
}

/// Error type for building reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// More axes than [`MAX_AXES`](crate::MAX_AXES).
    TooManyAxes,
}

impl core::fmt::Display for ReportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooManyAxes => write!(f, "too many axes"),
        }
    }
}
