//! Configuration error type.

/// Error type for curve construction and mode lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A stick id or mode index outside the registered range.
    ///
    /// `count` is the number of valid indices at the failing level
    /// (2 for stick ids, the stick's mode count for mode indices).
    IndexOutOfRange { index: usize, count: usize },
    /// A curve entry does not fit in an `i16` once rounded.
    CurveOverflow,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, count } => {
                write!(f, "index {} out of range (count {})", index, count)
            }
            Self::CurveOverflow => write!(f, "curve entry exceeds i16 range"),
        }
    }
}
