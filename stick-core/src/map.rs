//! Stick ids and the compile-time mode map.

use crate::error::ConfigError;
use crate::mode::StickMode;

/// One of the two physical sticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stick {
    /// Stick 0 (axes 0 and 1, button 0).
    A = 0,
    /// Stick 1 (axes 2 and 3, button 1).
    B = 1,
}

impl Stick {
    pub const ALL: [Stick; 2] = [Stick::A, Stick::B];
    pub const COUNT: usize = 2;

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stick for a raw id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IndexOutOfRange`] for any id other than 0 or 1.
    pub const fn from_index(index: usize) -> Result<Self, ConfigError> {
        match index {
            0 => Ok(Stick::A),
            1 => Ok(Stick::B),
            _ => Err(ConfigError::IndexOutOfRange {
                index,
                count: Self::COUNT,
            }),
        }
    }

    /// Index of this stick's X axis; Y follows it.
    #[inline]
    #[must_use]
    pub const fn x_axis(self) -> usize {
        self.index() * 2
    }

    #[inline]
    #[must_use]
    pub const fn y_axis(self) -> usize {
        self.index() * 2 + 1
    }
}

impl TryFrom<u8> for Stick {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value as usize)
    }
}

/// Fixed table of `A` modes for stick A followed by `B` modes for stick B.
///
/// Both runs sit back to back in one `repr(C)` block, in declaration
/// order. Build it with [`declare_mode_map`] in a `static`:
///
/// ```
/// use stick_core::{declare_mode_map, make_curve, ModeMap, MovementMode, Stick, StickCurve, StickMode};
///
/// static PAN: StickCurve = make_curve(25.0, 0.4);
/// static MODES: ModeMap<2, 1> = declare_mode_map(
///     [
///         StickMode::new(MovementMode::Rewind, &PAN),
///         StickMode::new(MovementMode::Stutter, &PAN),
///     ],
///     [StickMode::new(MovementMode::Scroll, &PAN)],
/// );
///
/// assert_eq!(MODES.count(Stick::A), 2);
/// assert_eq!(MODES.get_mode(Stick::B, 0).unwrap().movement, MovementMode::Scroll);
/// assert!(MODES.get_mode(Stick::B, 1).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct ModeMap<const A: usize, const B: usize> {
    stick_a: [StickMode; A],
    stick_b: [StickMode; B],
}

/// Bind the per-stick mode lists into a [`ModeMap`].
#[must_use]
pub const fn declare_mode_map<const A: usize, const B: usize>(
    a_modes: [StickMode; A],
    b_modes: [StickMode; B],
) -> ModeMap<A, B> {
    ModeMap {
        stick_a: a_modes,
        stick_b: b_modes,
    }
}

impl<const A: usize, const B: usize> ModeMap<A, B> {
    /// Total number of modes across both sticks.
    pub const LEN: usize = A + B;

    /// Number of modes registered for `stick`.
    #[inline]
    #[must_use]
    pub const fn count(&self, stick: Stick) -> usize {
        match stick {
            Stick::A => A,
            Stick::B => B,
        }
    }

    /// Mode `index` of `stick`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IndexOutOfRange`] if `index >= count(stick)`.
    pub fn get_mode(&self, stick: Stick, index: usize) -> Result<&StickMode, ConfigError> {
        self.modes(stick)
            .get(index)
            .ok_or(ConfigError::IndexOutOfRange {
                index,
                count: self.count(stick),
            })
    }

    /// All modes of `stick`, in declaration order.
    #[inline]
    #[must_use]
    pub fn modes(&self, stick: Stick) -> &[StickMode] {
        match stick {
            Stick::A => &self.stick_a,
            Stick::B => &self.stick_b,
        }
    }

    /// Every mode: stick A's first, then stick B's.
    pub fn iter(&self) -> impl Iterator<Item = (Stick, usize, &StickMode)> + '_ {
        Stick::ALL.into_iter().flat_map(move |stick| {
            self.modes(stick)
                .iter()
                .enumerate()
                .map(move |(index, mode)| (stick, index, mode))
        })
    }

    /// Index of the mode after `current`, wrapping to 0.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IndexOutOfRange`] if `stick` has no modes.
    pub fn next_index(&self, stick: Stick, current: usize) -> Result<usize, ConfigError> {
        match self.count(stick) {
            0 => Err(ConfigError::IndexOutOfRange { index: 0, count: 0 }),
            count => Ok((current + 1) % count),
        }
    }
}
