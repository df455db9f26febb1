//! Two-stick joystick to mouse remapper.
//!
//! Each analog stick runs one of several [`StickMode`]s from a compile-time
//! [`ModeMap`]. The [`Remapper`] normalizes raw readings, picks the active
//! stick and drives a [`PointerSink`] (a HID mouse/keyboard on the device,
//! a recording mock in tests).
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

mod fmt;

pub mod config;
pub mod motion;
pub mod output;
pub mod remapper;

#[cfg(test)]
mod testing;

pub use config::{RemapConfig, DEFAULT_CONFIG, DEFAULT_MODES, N_AXES};
pub use motion::StickState;
pub use output::{OutputError, PointerSink};
pub use remapper::{RemapError, Remapper};

pub use rat_report::{Serialize, StatusReport};
pub use stick_core::{
    declare_mode_map, make_curve, try_make_curve, AxisExtents, ConfigError, KeyCode, Modifiers,
    ModeMap, MovementMode, Rgb, Stick, StickCurve, StickMode,
};
