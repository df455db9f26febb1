//! Platform-agnostic stick configuration: curves, modes and the mode map.
//!
//! This crate describes how an analog stick drives the pointer, without
//! any platform-specific dependencies. Everything in it can be built in
//! `const` context, so a whole configuration compiles down to static
//! tables. It is used both on the device and on host for testing.
//!
//! # Overview
//!
//! - [`curve`]: Expo lookup tables ([`StickCurve`], [`make_curve`])
//! - [`mode`]: Per-stick behavior ([`StickMode`], [`MovementMode`], [`AxisDir`])
//! - [`map`]: Compile-time mode registry ([`ModeMap`], [`declare_mode_map`], [`Stick`])
//! - [`calibration`]: Raw axis normalization ([`AxisExtents`])
//! - [`types`]: Keys, modifiers and indicator colors
//!
//! # Example
//!
//! ```rust
//! use stick_core::{declare_mode_map, make_curve, ModeMap, MovementMode, Stick, StickCurve, StickMode};
//!
//! static PAN: StickCurve = make_curve(25.0, 0.4);
//! static ZOOM: StickCurve = make_curve(1400.0, 0.8);
//!
//! static MODES: ModeMap<1, 1> = declare_mode_map(
//!     [StickMode::new(MovementMode::Rewind, &PAN).with_buttons([false, true, false])],
//!     [StickMode::new(MovementMode::Scroll, &ZOOM)],
//! );
//!
//! let mode = MODES.get_mode(Stick::A, 0).unwrap();
//! assert_eq!(mode.curve.sample(1.0), 25);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod calibration;
pub mod curve;
pub mod error;
pub mod map;
pub mod mode;
pub mod types;

// Re-export main types at crate root
pub use calibration::{in_deadzone, AxisExtents};
pub use curve::{make_curve, try_make_curve, StickCurve, CURVE_LEN, DEFAULT_EXPO};
pub use error::ConfigError;
pub use map::{declare_mode_map, ModeMap, Stick};
pub use mode::{AxisDir, MovementMode, StickMode, INVERT_AXIS, NO_INVERT_AXIS, NULL_AXIS};
pub use types::{rgb, KeyCode, Modifiers, Rgb};
