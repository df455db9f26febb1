//! Per-stick motion state machine.
//!
//! A [`StickState`] turns stick deflection into pointer or wheel output for
//! the stick's current [`StickMode`]. It owns the accumulators that carry
//! sub-threshold motion between ticks and the record of sent motion used
//! to put the cursor back where it started.

use stick_core::{MovementMode, Stick, StickMode};

use crate::config::RemapConfig;
use crate::output::{OutputError, PointerSink};

/// Motion state for one stick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickState {
    stick: Stick,
    mode_index: usize,
    /// Motion accumulated but not yet sent.
    move_accum: [i32; 2],
    /// Scroll accumulated toward the next wheel click.
    scroll_accum: [i32; 2],
    /// Motion sent since activation, undone by unwinding.
    unwind_accum: [i32; 2],
    /// Mode buttons and key are currently held.
    buttons_activated: bool,
}

impl StickState {
    #[must_use]
    pub const fn new(stick: Stick) -> Self {
        Self {
            stick,
            mode_index: 0,
            move_accum: [0; 2],
            scroll_accum: [0; 2],
            unwind_accum: [0; 2],
            buttons_activated: false,
        }
    }

    pub fn stick(&self) -> Stick {
        self.stick
    }

    /// Index of the current mode within this stick's modes.
    pub fn mode_index(&self) -> usize {
        self.mode_index
    }

    pub fn set_mode_index(&mut self, index: usize) {
        self.mode_index = index;
    }

    /// Sent motion not yet unwound.
    pub fn unwind_pending(&self) -> [i32; 2] {
        self.unwind_accum
    }

    /// Whether the mode's buttons and key are held down.
    pub fn is_holding(&self) -> bool {
        self.buttons_activated
    }

    /// Nothing held and nothing left to unwind.
    pub fn is_idle(&self) -> bool {
        !self.buttons_activated && self.unwind_accum == [0, 0]
    }

    /// Clear all motion accumulators.
    pub fn clear_motion(&mut self) {
        self.move_accum = [0; 2];
        self.scroll_accum = [0; 2];
        self.unwind_accum = [0; 2];
    }

    /// Start an active move.
    pub fn activate(&mut self) {
        self.clear_motion();
    }

    /// Finish an active move: release held buttons and key, then unwind
    /// if the mode asks for it.
    pub async fn deactivate<S: PointerSink>(
        &mut self,
        mode: &StickMode,
        config: &RemapConfig,
        sink: &mut S,
    ) -> Result<(), OutputError> {
        self.end_active_motion(mode, config, sink).await?;
        if mode.movement.unwinds_on_release() {
            self.unwind(config, sink).await?;
        }
        self.clear_motion();
        Ok(())
    }

    /// Advance one tick of motion for the stick at `pos` (x, y).
    ///
    /// `first_move` forces a scroll click on the first tick so a quick
    /// flick always scrolls at least once.
    pub async fn move_active_motion<S: PointerSink>(
        &mut self,
        mode: &StickMode,
        pos: [f32; 2],
        first_move: bool,
        config: &RemapConfig,
        sink: &mut S,
    ) -> Result<(), OutputError> {
        match mode.movement {
            MovementMode::Scroll => self.move_scroll(mode, pos, first_move, config, sink).await?,
            _ => self.move_pointer(mode, pos, config, sink).await?,
        }
        sink.settle(config.settle_ms).await;
        Ok(())
    }

    async fn move_pointer<S: PointerSink>(
        &mut self,
        mode: &StickMode,
        pos: [f32; 2],
        config: &RemapConfig,
        sink: &mut S,
    ) -> Result<(), OutputError> {
        accumulate(&mut self.move_accum, mode, pos);
        self.send_motion(mode, config, sink).await?;

        match mode.movement {
            MovementMode::Stutter if either_mag_above(self.unwind_accum, config.stutter_step) => {
                self.stutter_back(mode, config, sink).await?;
            }
            MovementMode::Chase if either_mag_above(self.unwind_accum, config.chase_step) => {
                if mode.chase_key.is_some() {
                    sink.tap_key(mode.chase_key, mode.chase_mods).await?;
                }
                self.stutter_back(mode, config, sink).await?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Send accumulated motion once it clears the mode's threshold.
    async fn send_motion<S: PointerSink>(
        &mut self,
        mode: &StickMode,
        config: &RemapConfig,
        sink: &mut S,
    ) -> Result<(), OutputError> {
        if !either_mag_above(self.move_accum, mode.motion_threshold) {
            return Ok(());
        }

        self.precede_active_motion(mode, config, sink).await?;

        let [dx, dy] = self.move_accum;
        sink.move_pointer(dx, dy).await?;
        self.unwind_accum[0] += dx;
        self.unwind_accum[1] += dy;
        self.move_accum = [0; 2];
        Ok(())
    }

    async fn move_scroll<S: PointerSink>(
        &mut self,
        mode: &StickMode,
        pos: [f32; 2],
        first_move: bool,
        config: &RemapConfig,
        sink: &mut S,
    ) -> Result<(), OutputError> {
        accumulate(&mut self.scroll_accum, mode, pos);

        let saturate = config.scroll_saturate;
        if first_move {
            for s in &mut self.scroll_accum {
                if *s < 0 {
                    *s -= saturate;
                } else if *s > 0 {
                    *s += saturate;
                }
            }
        }

        let horizontal = take_scroll_click(&mut self.scroll_accum[0], saturate);
        let vertical = take_scroll_click(&mut self.scroll_accum[1], saturate);
        if horizontal != 0 || vertical != 0 {
            sink.scroll(vertical, horizontal).await?;
        }
        Ok(())
    }

    /// Press the mode's key and buttons ahead of the first motion.
    async fn precede_active_motion<S: PointerSink>(
        &mut self,
        mode: &StickMode,
        config: &RemapConfig,
        sink: &mut S,
    ) -> Result<(), OutputError> {
        if self.buttons_activated {
            return Ok(());
        }

        if mode.has_key() {
            sink.press_key(mode.active_key).await?;
            sink.settle(config.settle_ms).await;
        }
        if mode.has_buttons() {
            sink.set_buttons(mode.active_buttons).await?;
            sink.settle(config.settle_ms).await;
        }
        self.buttons_activated = true;
        Ok(())
    }

    /// Release the mode's buttons, then its key.
    async fn end_active_motion<S: PointerSink>(
        &mut self,
        mode: &StickMode,
        config: &RemapConfig,
        sink: &mut S,
    ) -> Result<(), OutputError> {
        if !self.buttons_activated {
            return Ok(());
        }

        if mode.has_buttons() {
            sink.set_buttons([false; 3]).await?;
            sink.settle(config.settle_ms).await;
        }
        if mode.has_key() {
            sink.release_key(mode.active_key).await?;
            sink.settle(config.settle_ms).await;
        }
        self.buttons_activated = false;
        Ok(())
    }

    /// Let go and snap the cursor back, to continue a long move.
    async fn stutter_back<S: PointerSink>(
        &mut self,
        mode: &StickMode,
        config: &RemapConfig,
        sink: &mut S,
    ) -> Result<(), OutputError> {
        sink.settle(config.stutter_pause_ms).await;
        self.end_active_motion(mode, config, sink).await?;
        self.unwind(config, sink).await
    }

    /// Move the cursor back by everything sent since activation.
    async fn unwind<S: PointerSink>(
        &mut self,
        config: &RemapConfig,
        sink: &mut S,
    ) -> Result<(), OutputError> {
        while self.unwind_accum != [0, 0] {
            let dx = unwind_step(self.unwind_accum[0], config.max_unwind_step);
            let dy = unwind_step(self.unwind_accum[1], config.max_unwind_step);
            sink.move_pointer(dx, dy).await?;
            self.unwind_accum[0] += dx;
            self.unwind_accum[1] += dy;
        }
        Ok(())
    }
}

/// Integrate one tick of stick position into an accumulator.
fn accumulate(acc: &mut [i32; 2], mode: &StickMode, pos: [f32; 2]) {
    acc[0] += mode.curve.sample(pos[0]) * mode.hor_dir.factor();
    acc[1] += mode.curve.sample(pos[1]) * mode.vert_dir.factor();
}

#[inline]
fn either_mag_above(v: [i32; 2], threshold: i32) -> bool {
    v[0].abs() >= threshold || v[1].abs() >= threshold
}

/// Take one wheel click (+1/-1) out of a saturated scroll accumulator.
fn take_scroll_click(acc: &mut i32, saturate: i32) -> i32 {
    let saturate = saturate.max(1);
    let sign = if *acc >= 0 { 1 } else { -1 };
    if acc.abs() >= saturate {
        *acc -= sign * saturate;
        sign
    } else {
        0
    }
}

/// Largest step toward zero, bounded by `max_step` (at least 1).
fn unwind_step(acc: i32, max_step: i32) -> i32 {
    let max_step = max_step.max(1);
    if acc > 0 {
        -acc.min(max_step)
    } else if acc < 0 {
        max_step.min(-acc)
    } else {
        0
    }
}
