//! Stick modes: MovementMode, AxisDir, StickMode.

use crate::curve::StickCurve;
use crate::types::{KeyCode, Modifiers, Rgb};

/// How stick motion is turned into pointer or wheel output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MovementMode {
    /// Move, then unwind the cursor back to its start when the stick is released.
    Rewind,
    /// Move, unwind every `stutter_step` of travel, and repeat until released.
    Stutter,
    /// Move the cursor and never unwind.
    Simple,
    /// Move, then tap the chase key after each step and unwind.
    Chase,
    /// Stick motion drives the vertical and horizontal scroll wheels.
    Scroll,
}

impl MovementMode {
    /// Whether releasing the stick returns the cursor to its start.
    #[inline]
    #[must_use]
    pub const fn unwinds_on_release(self) -> bool {
        matches!(self, Self::Rewind | Self::Stutter)
    }
}

/// Per-axis direction multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i8)]
pub enum AxisDir {
    Invert = -1,
    Null = 0,
    NoInvert = 1,
}

pub const INVERT_AXIS: AxisDir = AxisDir::Invert;
pub const NO_INVERT_AXIS: AxisDir = AxisDir::NoInvert;
pub const NULL_AXIS: AxisDir = AxisDir::Null;

impl AxisDir {
    #[inline]
    #[must_use]
    pub const fn factor(self) -> i32 {
        self as i8 as i32
    }
}

impl TryFrom<i8> for AxisDir {
    type Error = i8;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Invert),
            0 => Ok(Self::Null),
            1 => Ok(Self::NoInvert),
            other => Err(other),
        }
    }
}

/// One operating mode for a stick.
///
/// Modes are built in `const` context and live in a
/// [`ModeMap`](crate::ModeMap); the curve is shared, never copied.
///
/// ```
/// use stick_core::{make_curve, AxisDir, KeyCode, MovementMode, StickCurve, StickMode};
///
/// static ORBIT: StickCurve = make_curve(10.0, 0.5);
/// static MODE: StickMode = StickMode::new(MovementMode::Rewind, &ORBIT)
///     .with_buttons([false, true, false])
///     .with_key(KeyCode::LEFT_SHIFT);
///
/// assert!(MODE.has_buttons());
/// assert!(MODE.has_key());
/// assert_eq!(MODE.hor_dir, AxisDir::Invert);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickMode {
    pub movement: MovementMode,
    pub curve: &'static StickCurve,
    pub indicator: Rgb,
    /// Pointer buttons held while moving: left, middle, right.
    pub active_buttons: [bool; 3],
    /// Key held while moving.
    pub active_key: KeyCode,
    pub hor_dir: AxisDir,
    pub vert_dir: AxisDir,
    /// Key tapped after each chase step (`Chase` only).
    pub chase_key: KeyCode,
    pub chase_mods: Modifiers,
    /// Accumulated pixels required before any motion is sent.
    pub motion_threshold: i32,
}

impl StickMode {
    /// Mode with defaults: red indicator, no buttons or keys, both axes
    /// inverted, threshold of one pixel.
    #[must_use]
    pub const fn new(movement: MovementMode, curve: &'static StickCurve) -> Self {
        Self {
            movement,
            curve,
            indicator: Rgb::RED,
            active_buttons: [false; 3],
            active_key: KeyCode::NONE,
            hor_dir: AxisDir::Invert,
            vert_dir: AxisDir::Invert,
            chase_key: KeyCode::NONE,
            chase_mods: Modifiers::NONE,
            motion_threshold: 1,
        }
    }

    #[must_use]
    pub const fn with_indicator(mut self, indicator: Rgb) -> Self {
        self.indicator = indicator;
        self
    }

    #[must_use]
    pub const fn with_buttons(mut self, buttons: [bool; 3]) -> Self {
        self.active_buttons = buttons;
        self
    }

    #[must_use]
    pub const fn with_key(mut self, key: KeyCode) -> Self {
        self.active_key = key;
        self
    }

    #[must_use]
    pub const fn with_dirs(mut self, hor_dir: AxisDir, vert_dir: AxisDir) -> Self {
        self.hor_dir = hor_dir;
        self.vert_dir = vert_dir;
        self
    }

    #[must_use]
    pub const fn with_chase(mut self, key: KeyCode, mods: Modifiers) -> Self {
        self.chase_key = key;
        self.chase_mods = mods;
        self
    }

    #[must_use]
    pub const fn with_threshold(mut self, motion_threshold: i32) -> Self {
        self.motion_threshold = motion_threshold;
        self
    }

    /// Whether any pointer button is held during motion.
    #[inline]
    #[must_use]
    pub const fn has_buttons(&self) -> bool {
        self.active_buttons[0] || self.active_buttons[1] || self.active_buttons[2]
    }

    /// Whether a key is held during motion.
    #[inline]
    #[must_use]
    pub const fn has_key(&self) -> bool {
        self.active_key.is_some()
    }
}
