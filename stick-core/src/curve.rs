//! Stick curves: fixed-resolution expo tables mapping deflection to speed.
//!
//! A [`StickCurve`] holds [`CURVE_LEN`] samples of `max_speed * x^expo` for
//! `x` evenly spaced over `[0, 1]`. Curves are built by the `const fn`
//! [`make_curve`], so a configuration like
//!
//! ```
//! use stick_core::{make_curve, StickCurve};
//!
//! static PAN: StickCurve = make_curve(25.0, 0.4);
//! assert_eq!(PAN[0], 0);
//! assert_eq!(PAN[9], 25);
//! ```
//!
//! is evaluated entirely at build time. An entry that overflows `i16`
//! aborts compilation when the curve is built in a const context.

use core::ops::Index;

use crate::error::ConfigError;

/// Number of entries in a stick curve.
///
/// The sticks aren't precise enough to benefit from a finer table.
pub const CURVE_LEN: usize = 10;

/// Expo coefficient used by [`StickCurve::new`].
pub const DEFAULT_EXPO: f32 = 0.4;

/// Lookup table of actuation magnitudes indexed by deflection bucket.
///
/// Index 0 is the centered stick, index `CURVE_LEN - 1` full deflection.
/// Units depend on the consumer: pixels per tick for pointer motion,
/// accumulator units per tick for scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickCurve(pub [i16; CURVE_LEN]);

impl StickCurve {
    /// A curve that never moves.
    pub const ZERO: Self = Self([0; CURVE_LEN]);

    /// Build a curve with the default expo coefficient.
    ///
    /// # Panics
    ///
    /// Panics (fails the build in const context) if `max_speed` rounds
    /// outside the `i16` range.
    #[must_use]
    pub const fn new(max_speed: f32) -> Self {
        make_curve(max_speed, DEFAULT_EXPO)
    }

    /// All entries, centered first.
    #[inline]
    #[must_use]
    pub const fn entries(&self) -> &[i16; CURVE_LEN] {
        &self.0
    }

    /// Entry for `bucket`, or `None` past the end of the table.
    #[inline]
    #[must_use]
    pub const fn get(&self, bucket: usize) -> Option<i16> {
        if bucket < CURVE_LEN {
            Some(self.0[bucket])
        } else {
            None
        }
    }

    /// Magnitude at full deflection.
    #[inline]
    #[must_use]
    pub const fn max_speed(&self) -> i16 {
        self.0[CURVE_LEN - 1]
    }

    /// Whether entries never decrease from center to full deflection.
    #[must_use]
    pub fn is_non_decreasing(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Sample the curve at a signed normalized axis position.
    ///
    /// The magnitude of `pos` is quantized down to a bucket (clamped to the
    /// last entry) and the result takes the sign of `pos`.
    #[inline]
    #[must_use]
    pub fn sample(&self, pos: f32) -> i32 {
        let value = i32::from(self.0[bucket_for(pos)]);
        if pos >= 0.0 {
            value
        } else {
            -value
        }
    }
}

impl Index<usize> for StickCurve {
    type Output = i16;

    #[inline]
    fn index(&self, bucket: usize) -> &i16 {
        &self.0[bucket]
    }
}

/// Deflection bucket for a signed normalized position.
#[inline]
#[must_use]
pub fn bucket_for(pos: f32) -> usize {
    let magnitude = if pos < 0.0 { -pos } else { pos };
    // saturating cast: NaN lands in bucket 0
    let bucket = (magnitude * (CURVE_LEN - 1) as f32) as usize;
    bucket.min(CURVE_LEN - 1)
}

/// Build a curve of the form `max_speed * x^exp_coef`.
///
/// This is the "expo" function found on RC transmitter sticks. Larger
/// coefficients make the low end of the stick more sensitive, smaller
/// ones flatten it into a soft deadzone. A negative `max_speed` inverts
/// the curve.
///
/// Entries are rounded half away from zero. With a non-integer exponent an
/// entry landing within an ULP of a `.5` tie may round the other way from
/// `powf`.
///
/// # Panics
///
/// Panics if any entry rounds outside the `i16` range. In a `const` or
/// `static` initializer this is a compile error.
#[must_use]
pub const fn make_curve(max_speed: f32, exp_coef: f32) -> StickCurve {
    match try_make_curve(max_speed, exp_coef) {
        Ok(curve) => curve,
        Err(_) => panic!("stick curve entry exceeds the i16 range"),
    }
}

/// Fallible form of [`make_curve`].
///
/// # Errors
///
/// Returns [`ConfigError::CurveOverflow`] if any entry rounds outside
/// the `i16` range or is not a finite number.
pub const fn try_make_curve(max_speed: f32, exp_coef: f32) -> Result<StickCurve, ConfigError> {
    let scale = max_speed as f64;
    let expo = exp_coef as f64;
    let mut entries = [0i16; CURVE_LEN];

    let mut i = 0;
    while i < CURVE_LEN {
        let x = i as f64 / (CURVE_LEN - 1) as f64;
        let value = scale * pow(x, expo);
        // rejects NaN as well
        if !(value > I16_ROUND_LOW && value < I16_ROUND_HIGH) {
            return Err(ConfigError::CurveOverflow);
        }
        entries[i] = round_half_away(value) as i16;
        i += 1;
    }

    Ok(StickCurve(entries))
}

// Open bounds of values that round (half away from zero) into i16.
const I16_ROUND_LOW: f64 = i16::MIN as f64 - 0.5;
const I16_ROUND_HIGH: f64 = i16::MAX as f64 + 0.5;

const LN_2: f64 = core::f64::consts::LN_2;

/// Round half away from zero, matching `f64::round`.
const fn round_half_away(value: f64) -> i64 {
    let whole = value as i64;
    let frac = value - whole as f64;
    if frac >= 0.5 {
        whole + 1
    } else if frac <= -0.5 {
        whole - 1
    } else {
        whole
    }
}

/// `x^e` for `x` in `[0, 1]`, usable in const context.
///
/// Within an ULP or so of `f64::powf`. Linear and flat curves are exact.
const fn pow(x: f64, e: f64) -> f64 {
    if e == 1.0 || x == 1.0 {
        return x;
    }
    if e == 0.0 {
        return 1.0;
    }
    if x == 0.0 {
        return if e > 0.0 {
            0.0
        } else if e == 0.0 {
            1.0
        } else {
            f64::INFINITY
        };
    }
    exp(e * ln(x))
}

/// Natural log for finite `x > 0`.
const fn ln(x: f64) -> f64 {
    // x = m * 2^k with m in [0.5, 1]
    let mut m = x;
    let mut k: i32 = 0;
    while m > 1.0 {
        m *= 0.5;
        k += 1;
    }
    while m < 0.5 {
        m *= 2.0;
        k -= 1;
    }

    // ln(m) = 2 * atanh(s), |s| <= 1/3
    let s = (m - 1.0) / (m + 1.0);
    let s2 = s * s;
    let mut term = s;
    let mut sum = 0.0;
    let mut n = 1;
    while n < 64 {
        sum += term / n as f64;
        term *= s2;
        n += 2;
    }

    2.0 * sum + k as f64 * LN_2
}

const fn exp(y: f64) -> f64 {
    if y != y {
        return y;
    }
    if y > 709.0 {
        return f64::INFINITY;
    }
    if y < -745.0 {
        return 0.0;
    }

    // y = n * ln2 + r with |r| <= ln2 / 2
    let mut n = round_half_away(y / LN_2);
    let r = y - n as f64 * LN_2;

    let mut sum = 1.0;
    let mut term = 1.0;
    let mut k = 1;
    while k < 32 {
        term *= r / k as f64;
        sum += term;
        k += 1;
    }

    while n > 0 {
        sum *= 2.0;
        n -= 1;
    }
    while n < 0 {
        sum *= 0.5;
        n += 1;
    }
    sum
}
