//! Compiled-in configuration: motion tuning, calibration and stick modes.
//!
//! Customize at compile time by editing these constants or by passing your
//! own [`RemapConfig`] and [`ModeMap`] to [`Remapper::new`](crate::Remapper::new).

use stick_core::{
    declare_mode_map, make_curve, AxisExtents, KeyCode, ModeMap, MovementMode, StickCurve,
    StickMode, DEFAULT_EXPO, INVERT_AXIS, NULL_AXIS,
};

/// Number of sampled axes. Consecutive pairs form a stick: axes 0/1 are
/// stick A's X/Y, axes 2/3 stick B's.
pub const N_AXES: usize = 4;

/// Motion and calibration tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RemapConfig {
    /// Absolute normalized deflection a stick must exceed on either axis to
    /// count as active.
    pub deadzone: f32,
    /// Largest pointer step per report while unwinding.
    pub max_unwind_step: i32,
    /// Travel before stutter mode snaps back.
    pub stutter_step: i32,
    /// Travel between chase key taps.
    pub chase_step: i32,
    /// Scroll accumulator magnitude per wheel click.
    pub scroll_saturate: i32,
    /// Pause after button/key changes and after each motion tick.
    pub settle_ms: u32,
    /// Pause before stutter and chase unwind.
    pub stutter_pause_ms: u32,
    /// Widen the axis extents when a reading falls outside them.
    pub autocal: bool,
    /// Take the startup reading as each axis center.
    pub center_on_startup: bool,
    /// Produce `AXES`/`NORM`/`BP`/`BR` status reports.
    pub serial_status_reports: bool,
    /// Initial calibration: low, center, high per axis.
    pub axis_extents: [AxisExtents; N_AXES],
}

/// Default tuning for the OrbitRat hardware.
pub const DEFAULT_CONFIG: RemapConfig = RemapConfig {
    deadzone: 0.01,
    max_unwind_step: 100,
    stutter_step: 1000,
    chase_step: 25,
    scroll_saturate: 10_000,
    settle_ms: 10,
    stutter_pause_ms: 25,
    autocal: true,
    center_on_startup: true,
    serial_status_reports: true,
    axis_extents: [
        AxisExtents::new(10, 520, 1015),
        AxisExtents::new(10, 498, 1015),
        AxisExtents::new(10, 530, 1015),
        AxisExtents::new(10, 513, 1015),
    ],
};

impl RemapConfig {
    /// Copy with every step size raised to at least 1.
    ///
    /// Unwinding and scroll clicks consume their accumulators in these
    /// steps, so a zero or negative step would never drain them.
    #[must_use]
    pub const fn sanitized(self) -> Self {
        Self {
            max_unwind_step: at_least_one(self.max_unwind_step),
            stutter_step: at_least_one(self.stutter_step),
            chase_step: at_least_one(self.chase_step),
            scroll_saturate: at_least_one(self.scroll_saturate),
            ..self
        }
    }
}

const fn at_least_one(step: i32) -> i32 {
    if step < 1 {
        1
    } else {
        step
    }
}

impl Default for RemapConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

/// Pan: 25 px per tick at full deflection.
pub static PAN_CURVE: StickCurve = make_curve(25.0, DEFAULT_EXPO);

/// Orbit: slower, with a little expo.
pub static ORBIT_CURVE: StickCurve = make_curve(10.0, 0.5);

/// Zoom scrolling works in scroll accumulator units, an order of magnitude up.
pub static ZOOM_SCROLL_CURVE: StickCurve = make_curve(1400.0, 0.8);

const MIDDLE_BUTTON: [bool; 3] = [false, true, false];

/// Default modes, cycled with each stick's button.
///
/// Stick A pans (middle-drag, rewinding or stuttering); stick B zooms with
/// the vertical wheel or orbits with shift + middle-drag.
pub static DEFAULT_MODES: ModeMap<2, 2> = declare_mode_map(
    [
        StickMode::new(MovementMode::Rewind, &PAN_CURVE).with_buttons(MIDDLE_BUTTON),
        StickMode::new(MovementMode::Stutter, &PAN_CURVE)
            .with_buttons(MIDDLE_BUTTON)
            .with_threshold(25),
    ],
    [
        StickMode::new(MovementMode::Scroll, &ZOOM_SCROLL_CURVE).with_dirs(NULL_AXIS, INVERT_AXIS),
        StickMode::new(MovementMode::Rewind, &ORBIT_CURVE)
            .with_buttons(MIDDLE_BUTTON)
            .with_key(KeyCode::LEFT_SHIFT),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;
    use stick_core::Stick;

    #[test]
    fn test_default_curves() {
        assert_eq!(PAN_CURVE.max_speed(), 25);
        assert_eq!(ORBIT_CURVE.max_speed(), 10);
        assert_eq!(ZOOM_SCROLL_CURVE.max_speed(), 1400);
        assert!(PAN_CURVE.is_non_decreasing());
        assert!(ZOOM_SCROLL_CURVE.is_non_decreasing());
    }

    #[test]
    fn test_sanitized_raises_steps() {
        assert_eq!(DEFAULT_CONFIG.sanitized(), DEFAULT_CONFIG);

        let config = RemapConfig {
            max_unwind_step: 0,
            stutter_step: -5,
            chase_step: i32::MIN,
            scroll_saturate: 0,
            settle_ms: 3,
            ..DEFAULT_CONFIG
        }
        .sanitized();
        assert_eq!(config.max_unwind_step, 1);
        assert_eq!(config.stutter_step, 1);
        assert_eq!(config.chase_step, 1);
        assert_eq!(config.scroll_saturate, 1);
        assert_eq!(config.settle_ms, 3);
    }

    #[test]
    fn test_default_modes() {
        assert_eq!(DEFAULT_MODES.count(Stick::A), 2);
        assert_eq!(DEFAULT_MODES.count(Stick::B), 2);

        let stutter = DEFAULT_MODES.get_mode(Stick::A, 1).unwrap();
        assert_eq!(stutter.movement, MovementMode::Stutter);
        assert_eq!(stutter.motion_threshold, 25);

        let zoom = DEFAULT_MODES.get_mode(Stick::B, 0).unwrap();
        assert_eq!(zoom.movement, MovementMode::Scroll);
        assert_eq!(zoom.hor_dir, NULL_AXIS);
        assert!(!zoom.has_buttons());

        let orbit = DEFAULT_MODES.get_mode(Stick::B, 1).unwrap();
        assert!(orbit.has_key());
        assert!(core::ptr::eq(orbit.curve, &ORBIT_CURVE));
    }
}
