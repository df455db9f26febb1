//! Axis calibration: raw ADC readings to normalized deflection.

/// Calibrated extents of one analog axis in raw ADC units.
///
/// `normalize` maps `low..center` onto `-1..0` and `center..high` onto
/// `0..1` separately, so an off-center stick still reaches both ends, then
/// flips the sign so pushing a stick away from its pins reads positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisExtents {
    pub low: i16,
    pub center: i16,
    pub high: i16,
}

impl AxisExtents {
    #[must_use]
    pub const fn new(low: i16, center: i16, high: i16) -> Self {
        Self { low, center, high }
    }

    /// Record a resting reading as the center.
    #[inline]
    pub fn recenter(&mut self, raw: i16) {
        self.center = raw;
    }

    /// Normalize a raw reading to `[-1, 1]`.
    ///
    /// Readings past `low` or `high` widen the extents when `autocal` is
    /// set, and are clamped otherwise.
    pub fn normalize(&mut self, raw: i16, autocal: bool) -> f32 {
        let mut value = raw;
        let normalized = if value < self.center {
            if value < self.low {
                if autocal {
                    self.low = value;
                } else {
                    value = self.low;
                }
            }
            -1.0 + span(self.low, value, self.center)
        } else {
            if value > self.high {
                if autocal {
                    self.high = value;
                } else {
                    value = self.high;
                }
            }
            span(self.center, value, self.high)
        };

        -normalized
    }
}

/// Position of `val` within `low..high` as a fraction.
///
/// A collapsed range reads as zero rather than dividing by it.
#[inline]
fn span(low: i16, val: i16, high: i16) -> f32 {
    let range = f32::from(high) - f32::from(low);
    if range <= 0.0 {
        return 0.0;
    }
    (f32::from(val) - f32::from(low)) / range
}

/// Whether a stick sits inside the deadzone on both axes.
#[inline]
#[must_use]
pub fn in_deadzone(x: f32, y: f32, deadzone: f32) -> bool {
    magnitude(x) < deadzone && magnitude(y) < deadzone
}

#[inline]
fn magnitude(v: f32) -> f32 {
    if v < 0.0 {
        -v
    } else {
        v
    }
}
