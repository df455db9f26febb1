//! The StatusReport type.

use heapless::Vec;

use crate::error::ReportError;

/// Maximum number of axes carried by one `AXES` or `NORM` report.
pub const MAX_AXES: usize = 8;

/// One status line sent over the serial port.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusReport {
    /// `AXES a0 a1 ...` - raw ADC readings (0..1023).
    Axes(Vec<i16, MAX_AXES>),
    /// `NORM n0 n1 ...` - normalized axes in whole percent (-100..100).
    Normalized(Vec<i16, MAX_AXES>),
    /// `BP i` - button `i` was pressed.
    ButtonPressed(u8),
    /// `BR i` - button `i` was released.
    ButtonReleased(u8),
}

impl StatusReport {
    /// Raw axis report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TooManyAxes`] past [`MAX_AXES`] values.
    pub fn axes(values: &[i16]) -> Result<Self, ReportError> {
        Vec::from_slice(values)
            .map(Self::Axes)
            .map_err(|_| ReportError::TooManyAxes)
    }

    /// Normalized axis report; values are truncated to whole percent.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TooManyAxes`] past [`MAX_AXES`] values.
    pub fn normalized(values: &[f32]) -> Result<Self, ReportError> {
        let mut percent = Vec::new();
        for &value in values {
            percent
                .push(to_percent(value))
                .map_err(|_| ReportError::TooManyAxes)?;
        }
        Ok(Self::Normalized(percent))
    }

    /// Button edge report.
    #[must_use]
    pub const fn button(index: u8, pressed: bool) -> Self {
        if pressed {
            Self::ButtonPressed(index)
        } else {
            Self::ButtonReleased(index)
        }
    }

    /// Line tag, without the separator.
    #[must_use]
    pub const fn tag(&self) -> &'static [u8] {
        match self {
            Self::Axes(_) => b"AXES",
            Self::Normalized(_) => b"NORM",
            Self::ButtonPressed(_) => b"BP",
            Self::ButtonReleased(_) => b"BR",
        }
    }
}

#[inline]
fn to_percent(value: f32) -> i16 {
    // saturating cast, like the firmware's truncating int conversion
    (value * 100.0) as i16
}
