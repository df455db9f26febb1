//! Small value types shared by stick modes: KeyCode, Modifiers, Rgb.

use core::ops::{BitAnd, BitOr, BitOrAssign};

/// Keyboard key as a HID usage id (page 0x07).
///
/// `KeyCode::NONE` (0) means "no key".
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const NONE: Self = Self(0);

    pub const A: Self = Self(0x04);
    pub const Z: Self = Self(0x1D);
    pub const ENTER: Self = Self(0x28);
    pub const ESC: Self = Self(0x29);
    pub const TAB: Self = Self(0x2B);
    pub const SPACE: Self = Self(0x2C);

    pub const LEFT_CTRL: Self = Self(0xE0);
    pub const LEFT_SHIFT: Self = Self(0xE1);
    pub const LEFT_ALT: Self = Self(0xE2);
    pub const LEFT_GUI: Self = Self(0xE3);

    /// Check if this is an actual key.
    #[inline]
    #[must_use]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// Get the raw usage id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Keyboard modifier bitmask, laid out like byte 0 of a HID boot keyboard report.
///
/// ```
/// use stick_core::Modifiers;
///
/// let mods = Modifiers::CTRL | Modifiers::SHIFT;
/// assert!(mods.contains(Modifiers::SHIFT));
/// assert!(!mods.contains(Modifiers::ALT));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const CTRL: Self = Self(1 << 0);
    pub const SHIFT: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    pub const GUI: Self = Self(1 << 3);
    pub const RIGHT_CTRL: Self = Self(1 << 4);
    pub const RIGHT_SHIFT: Self = Self(1 << 5);
    pub const RIGHT_ALT: Self = Self(1 << 6);
    pub const RIGHT_GUI: Self = Self(1 << 7);

    /// Check if the given modifier(s) are all set.
    #[inline]
    #[must_use]
    pub const fn contains(self, mods: Modifiers) -> bool {
        (self.0 & mods.0) == mods.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Const-friendly union, for use in `static` mode tables.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Modifiers) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Modifiers {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

/// Packed 24-bit indicator color.
///
/// Stored in the LED chain's wire order: green in bits 16..24, red in
/// 8..16, blue in 0..8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb(pub u32);

impl Rgb {
    pub const RED: Self = rgb(255, 0, 0);
    pub const GREEN: Self = rgb(0, 255, 0);
    pub const BLUE: Self = rgb(0, 0, 255);
    pub const OFF: Self = rgb(0, 0, 0);

    #[inline]
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Get the packed wire value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::RED
    }
}

/// Pack a color for the indicator LEDs.
#[inline]
#[must_use]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb(((g as u32) << 16) | ((r as u32) << 8) | b as u32)
}
