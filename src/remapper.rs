//! Remapper: drives both sticks from raw axis readings.

use rat_report::{ReportError, StatusReport};
use stick_core::{in_deadzone, AxisExtents, ConfigError, ModeMap, Rgb, Stick, StickMode};

use crate::config::{RemapConfig, N_AXES};
use crate::motion::StickState;
use crate::output::{OutputError, PointerSink};

/// Turns calibrated stick readings into pointer output.
///
/// Only one stick drives the pointer at a time: the first stick to leave
/// its deadzone becomes active and stays active until it returns. Each
/// stick's button cycles through that stick's modes.
///
/// The caller owns the sampling loop: read the ADCs, debounce buttons,
/// then call [`tick`](Self::tick) and [`on_button`](Self::on_button).
pub struct Remapper<'m, const A: usize, const B: usize> {
    modes: &'m ModeMap<A, B>,
    config: RemapConfig,
    extents: [AxisExtents; N_AXES],
    raw: [i16; N_AXES],
    axes: [f32; N_AXES],
    sticks: [StickState; 2],
    active: Option<Stick>,
}

impl<'m, const A: usize, const B: usize> Remapper<'m, A, B> {
    /// Create a remapper over a mode map; each stick starts in its first mode.
    ///
    /// Step sizes in `config` below 1 are raised to 1.
    pub fn new(modes: &'m ModeMap<A, B>, config: RemapConfig) -> Self {
        let config = config.sanitized();
        Self {
            modes,
            extents: config.axis_extents,
            config,
            raw: [0; N_AXES],
            axes: [0.0; N_AXES],
            sticks: [StickState::new(Stick::A), StickState::new(Stick::B)],
            active: None,
        }
    }

    /// Take the first reading after power-up; records the axis centers when
    /// `center_on_startup` is set.
    pub fn startup(&mut self, raw: [i16; N_AXES]) {
        if self.config.center_on_startup {
            for (extents, &value) in self.extents.iter_mut().zip(raw.iter()) {
                extents.recenter(value);
            }
            debug!("centered axes at {:?}", raw);
        }
        self.raw = raw;
    }

    /// Normalize one raw reading of every axis.
    pub fn normalize(&mut self, raw: [i16; N_AXES]) -> [f32; N_AXES] {
        for (i, &value) in raw.iter().enumerate() {
            self.axes[i] = self.extents[i].normalize(value, self.config.autocal);
        }
        self.raw = raw;
        self.axes
    }

    /// Process one sampling tick of raw readings.
    pub async fn tick<S: PointerSink>(
        &mut self,
        raw: [i16; N_AXES],
        sink: &mut S,
    ) -> Result<(), RemapError> {
        let axes = self.normalize(raw);
        self.update(axes, sink).await
    }

    /// Process one tick of already-normalized axes.
    pub async fn update<S: PointerSink>(
        &mut self,
        axes: [f32; N_AXES],
        sink: &mut S,
    ) -> Result<(), RemapError> {
        self.axes = axes;
        let modes = self.modes;

        if let Some(stick) = self.active {
            if self.in_deadzone(stick) {
                trace!("stick {:?} released", stick);
                return self.deactivate(stick, sink).await;
            }

            let pos = self.position(stick);
            let state = &mut self.sticks[stick.index()];
            let mode = modes.get_mode(stick, state.mode_index())?;
            state
                .move_active_motion(mode, pos, false, &self.config, sink)
                .await?;
            return Ok(());
        }

        // nothing new starts until the host is listening
        if !sink.is_ready() {
            return Ok(());
        }

        for stick in Stick::ALL {
            if self.in_deadzone(stick) || modes.count(stick) == 0 {
                continue;
            }

            let pos = self.position(stick);
            let state = &mut self.sticks[stick.index()];
            let mode = modes.get_mode(stick, state.mode_index())?;

            trace!("stick {:?} active", stick);
            self.active = Some(stick);
            state.activate();
            state
                .move_active_motion(mode, pos, true, &self.config, sink)
                .await?;
            break;
        }
        Ok(())
    }

    /// Handle a debounced button edge.
    ///
    /// Pressing button 0 or 1 advances that stick's mode. Returns the
    /// matching `BP`/`BR` status report when reports are enabled.
    pub async fn on_button<S: PointerSink>(
        &mut self,
        index: u8,
        pressed: bool,
        sink: &mut S,
    ) -> Result<Option<StatusReport>, RemapError> {
        if pressed {
            // other buttons have no action bound
            if let Ok(stick) = Stick::try_from(index) {
                self.advance_mode(stick, sink).await?;
            }
        }

        Ok(self
            .config
            .serial_status_reports
            .then(|| StatusReport::button(index, pressed)))
    }

    /// Switch `stick` to its next mode, wrapping around.
    ///
    /// A stick in the middle of a move is released with its old mode first,
    /// so buttons and keys are let go by the mode that pressed them.
    pub async fn advance_mode<S: PointerSink>(
        &mut self,
        stick: Stick,
        sink: &mut S,
    ) -> Result<&'m StickMode, RemapError> {
        if self.needs_release(stick) {
            self.deactivate(stick, sink).await?;
        }

        let modes = self.modes;
        let state = &mut self.sticks[stick.index()];
        let next = modes.next_index(stick, state.mode_index())?;
        state.set_mode_index(next);
        let mode = modes.get_mode(stick, next)?;
        info!("stick {:?} mode {} ({:?})", stick, next, mode.movement);
        Ok(mode)
    }

    /// Let go of everything: release any held buttons and keys and unwind
    /// pending motion. Call after an output error to avoid stuck buttons.
    pub async fn release<S: PointerSink>(&mut self, sink: &mut S) -> Result<(), RemapError> {
        for stick in Stick::ALL {
            if self.needs_release(stick) {
                warn!("releasing stick {:?}", stick);
                self.deactivate(stick, sink).await?;
            }
        }
        Ok(())
    }

    /// Deactivate `stick` with its current mode. It stays active until
    /// the sink has taken everything, so a failed release can be retried.
    async fn deactivate<S: PointerSink>(
        &mut self,
        stick: Stick,
        sink: &mut S,
    ) -> Result<(), RemapError> {
        let state = &mut self.sticks[stick.index()];
        let mode = self.modes.get_mode(stick, state.mode_index())?;
        state.deactivate(mode, &self.config, sink).await?;
        if self.active == Some(stick) {
            self.active = None;
        }
        Ok(())
    }

    fn needs_release(&self, stick: Stick) -> bool {
        self.active == Some(stick) || !self.sticks[stick.index()].is_idle()
    }

    /// `AXES` and `NORM` reports for the last reading, when enabled.
    pub fn status_reports(&self) -> Result<Option<[StatusReport; 2]>, RemapError> {
        if !self.config.serial_status_reports {
            return Ok(None);
        }
        Ok(Some([
            StatusReport::axes(&self.raw)?,
            StatusReport::normalized(&self.axes)?,
        ]))
    }

    /// Current mode of `stick`.
    pub fn mode(&self, stick: Stick) -> Result<&'m StickMode, ConfigError> {
        self.modes
            .get_mode(stick, self.sticks[stick.index()].mode_index())
    }

    /// Indicator color for `stick`'s current mode.
    pub fn indicator(&self, stick: Stick) -> Result<Rgb, ConfigError> {
        self.mode(stick).map(|mode| mode.indicator)
    }

    /// Stick currently driving the pointer.
    pub fn active_stick(&self) -> Option<Stick> {
        self.active
    }

    pub fn stick_state(&self, stick: Stick) -> &StickState {
        &self.sticks[stick.index()]
    }

    /// Last normalized axes.
    pub fn axes(&self) -> &[f32; N_AXES] {
        &self.axes
    }

    /// Live calibration, including any autocal widening.
    pub fn extents(&self) -> &[AxisExtents; N_AXES] {
        &self.extents
    }

    pub fn config(&self) -> &RemapConfig {
        &self.config
    }

    fn position(&self, stick: Stick) -> [f32; 2] {
        [self.axes[stick.x_axis()], self.axes[stick.y_axis()]]
    }

    fn in_deadzone(&self, stick: Stick) -> bool {
        let [x, y] = self.position(stick);
        in_deadzone(x, y, self.config.deadzone)
    }
}

/// Error type for remapper operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemapError {
    /// Error from the pointer sink.
    Output(OutputError),
    /// Mode lookup failed.
    Config(ConfigError),
    /// Status report could not be built.
    Report(ReportError),
}

impl From<OutputError> for RemapError {
    fn from(err: OutputError) -> Self {
        RemapError::Output(err)
    }
}

impl From<ConfigError> for RemapError {
    fn from(err: ConfigError) -> Self {
        RemapError::Config(err)
    }
}

impl From<ReportError> for RemapError {
    fn from(err: ReportError) -> Self {
        RemapError::Report(err)
    }
}

impl core::fmt::Display for RemapError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Output(e) => write!(f, "output: {}", e),
            Self::Config(e) => write!(f, "config: {}", e),
            Self::Report(e) => write!(f, "report: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::{DEFAULT_CONFIG, DEFAULT_MODES, PAN_CURVE};
    use crate::testing::{block_on, Event, MockSink};
    use std::vec;
    use stick_core::{declare_mode_map, KeyCode, MovementMode, Rgb, NO_INVERT_AXIS};

    const REST: [f32; 4] = [0.0; 4];

    fn remapper() -> Remapper<'static, 2, 2> {
        Remapper::new(&DEFAULT_MODES, DEFAULT_CONFIG)
    }

    #[test]
    fn test_first_stick_out_of_deadzone_becomes_active() {
        let mut remap = remapper();
        let mut sink = MockSink::new();

        block_on(remap.update(REST, &mut sink)).unwrap();
        assert_eq!(remap.active_stick(), None);
        assert!(sink.events().is_empty());

        // both sticks deflected: stick A wins
        block_on(remap.update([1.0, 0.0, 0.0, 1.0], &mut sink)).unwrap();
        assert_eq!(remap.active_stick(), Some(Stick::A));

        // stick A pans with the middle button, axes inverted
        assert_eq!(
            sink.events(),
            vec![Event::Buttons([false, true, false]), Event::Move(-25, 0)]
        );
    }

    #[test]
    fn test_active_stick_keeps_control_until_released() {
        let mut remap = remapper();
        let mut sink = MockSink::new();

        block_on(remap.update([0.0, 0.0, 0.0, 1.0], &mut sink)).unwrap();
        assert_eq!(remap.active_stick(), Some(Stick::B));

        // stick A moves but B is still out
        block_on(remap.update([1.0, 0.0, 0.0, 1.0], &mut sink)).unwrap();
        assert_eq!(remap.active_stick(), Some(Stick::B));
        assert!(sink.moves().is_empty());

        block_on(remap.update([1.0, 0.0, 0.0, 0.0], &mut sink)).unwrap();
        assert_eq!(remap.active_stick(), None);

        block_on(remap.update([1.0, 0.0, 0.0, 0.0], &mut sink)).unwrap();
        assert_eq!(remap.active_stick(), Some(Stick::A));
    }

    #[test]
    fn test_zoom_scrolls_on_first_move() {
        let mut remap = remapper();
        let mut sink = MockSink::new();

        block_on(remap.update([0.0, 0.0, 0.0, 0.5], &mut sink)).unwrap();
        assert_eq!(sink.events(), vec![Event::Scroll(-1, 0)]);
    }

    #[test]
    fn test_release_unwinds_rewind_mode() {
        let mut remap = remapper();
        let mut sink = MockSink::new();

        block_on(remap.update([1.0, 1.0, 0.0, 0.0], &mut sink)).unwrap();
        block_on(remap.update([1.0, 1.0, 0.0, 0.0], &mut sink)).unwrap();
        sink.clear();

        block_on(remap.update(REST, &mut sink)).unwrap();
        assert_eq!(
            sink.events(),
            vec![Event::Buttons([false, false, false]), Event::Move(50, 50)]
        );
        assert_eq!(remap.stick_state(Stick::A).unwind_pending(), [0, 0]);
    }

    #[test]
    fn test_button_cycles_modes() {
        let mut remap = remapper();
        let mut sink = MockSink::new();

        assert_eq!(remap.mode(Stick::B).unwrap().movement, MovementMode::Scroll);

        let report = block_on(remap.on_button(1, true, &mut sink)).unwrap();
        assert_eq!(report, Some(StatusReport::ButtonPressed(1)));
        assert_eq!(remap.mode(Stick::B).unwrap().active_key, KeyCode::LEFT_SHIFT);

        let report = block_on(remap.on_button(1, false, &mut sink)).unwrap();
        assert_eq!(report, Some(StatusReport::ButtonReleased(1)));
        assert_eq!(remap.stick_state(Stick::B).mode_index(), 1);

        block_on(remap.on_button(1, true, &mut sink)).unwrap();
        assert_eq!(remap.stick_state(Stick::B).mode_index(), 0);
        // stick A untouched
        assert_eq!(remap.stick_state(Stick::A).mode_index(), 0);
    }

    #[test]
    fn test_other_buttons_only_report() {
        let mut remap = remapper();
        let mut sink = MockSink::new();

        let report = block_on(remap.on_button(4, true, &mut sink)).unwrap();
        assert_eq!(report, Some(StatusReport::ButtonPressed(4)));
        assert_eq!(remap.stick_state(Stick::A).mode_index(), 0);
        assert_eq!(remap.stick_state(Stick::B).mode_index(), 0);
    }

    #[test]
    fn test_mode_switch_releases_active_stick() {
        let mut remap = remapper();
        let mut sink = MockSink::new();

        block_on(remap.update([0.0, 1.0, 0.0, 0.0], &mut sink)).unwrap();
        assert!(remap.stick_state(Stick::A).is_holding());
        sink.clear();

        block_on(remap.on_button(0, true, &mut sink)).unwrap();
        assert_eq!(remap.active_stick(), None);
        assert!(!remap.stick_state(Stick::A).is_holding());
        assert_eq!(
            sink.events(),
            vec![Event::Buttons([false, false, false]), Event::Move(0, 25)]
        );
        assert_eq!(remap.mode(Stick::A).unwrap().movement, MovementMode::Stutter);
    }

    #[test]
    fn test_tick_normalizes_raw_readings() {
        let mut remap = remapper();
        let mut sink = MockSink::new();

        remap.startup([500, 500, 500, 500]);
        assert!(remap.extents().iter().all(|e| e.center == 500));

        // axis 0 pulled to its low end reads +1, inverted by the pan mode
        block_on(remap.tick([10, 500, 500, 500], &mut sink)).unwrap();
        assert_eq!(remap.axes()[0], 1.0);
        assert_eq!(sink.moves(), vec![(-25, 0)]);
    }

    #[test]
    fn test_status_reports() {
        let mut remap = remapper();
        remap.startup([500, 500, 500, 500]);
        remap.normalize([10, 500, 1015, 500]);

        let [axes, norm] = remap.status_reports().unwrap().unwrap();
        assert_eq!(axes, StatusReport::axes(&[10, 500, 1015, 500]).unwrap());
        assert_eq!(norm, StatusReport::normalized(&[1.0, 0.0, -1.0, 0.0]).unwrap());

        let quiet = Remapper::new(
            &DEFAULT_MODES,
            RemapConfig {
                serial_status_reports: false,
                ..DEFAULT_CONFIG
            },
        );
        assert_eq!(quiet.status_reports(), Ok(None));
    }

    #[test]
    fn test_indicator() {
        static MODES: ModeMap<1, 1> = declare_mode_map(
            [StickMode::new(MovementMode::Simple, &PAN_CURVE).with_indicator(Rgb::BLUE)],
            [StickMode::new(MovementMode::Simple, &PAN_CURVE)],
        );
        let remap = Remapper::new(&MODES, DEFAULT_CONFIG);
        assert_eq!(remap.indicator(Stick::A), Ok(Rgb::BLUE));
        assert_eq!(remap.indicator(Stick::B), Ok(Rgb::RED));
    }

    #[test]
    fn test_stick_without_modes_is_ignored() {
        static MODES: ModeMap<0, 1> = declare_mode_map(
            [],
            [StickMode::new(MovementMode::Simple, &PAN_CURVE).with_dirs(NO_INVERT_AXIS, NO_INVERT_AXIS)],
        );
        let mut remap = Remapper::new(&MODES, DEFAULT_CONFIG);
        let mut sink = MockSink::new();

        block_on(remap.update([1.0, 1.0, 1.0, 0.0], &mut sink)).unwrap();
        assert_eq!(remap.active_stick(), Some(Stick::B));
        assert_eq!(sink.moves(), vec![(25, 0)]);

        assert!(matches!(remap.mode(Stick::A), Err(ConfigError::IndexOutOfRange { .. })));
        assert_eq!(
            block_on(remap.on_button(0, true, &mut sink)),
            Err(RemapError::Config(ConfigError::IndexOutOfRange { index: 0, count: 0 }))
        );
    }

    #[test]
    fn test_failed_return_to_rest_can_be_released() {
        let mut remap = remapper();
        let mut sink = MockSink::new();
        block_on(remap.update([1.0, 0.0, 0.0, 0.0], &mut sink)).unwrap();

        let mut broken = MockSink::failing(OutputError::Busy);
        assert_eq!(
            block_on(remap.update(REST, &mut broken)),
            Err(RemapError::Output(OutputError::Busy))
        );
        // still owns the held button until the sink takes the release
        assert_eq!(remap.active_stick(), Some(Stick::A));
        assert!(remap.stick_state(Stick::A).is_holding());

        sink.clear();
        block_on(remap.release(&mut sink)).unwrap();
        assert_eq!(remap.active_stick(), None);
        assert!(remap.stick_state(Stick::A).is_idle());
        assert_eq!(
            sink.events(),
            vec![Event::Buttons([false, false, false]), Event::Move(25, 0)]
        );

        // nothing left to let go of
        sink.clear();
        block_on(remap.release(&mut sink)).unwrap();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_failed_return_to_rest_retried_next_tick() {
        let mut remap = remapper();
        let mut sink = MockSink::new();
        block_on(remap.update([1.0, 0.0, 0.0, 0.0], &mut sink)).unwrap();

        let mut broken = MockSink::failing(OutputError::Dropped);
        assert!(block_on(remap.update(REST, &mut broken)).is_err());

        sink.clear();
        block_on(remap.update(REST, &mut sink)).unwrap();
        assert_eq!(remap.active_stick(), None);
        assert_eq!(
            sink.events(),
            vec![Event::Buttons([false, false, false]), Event::Move(25, 0)]
        );
    }

    #[test]
    fn test_failed_mode_switch_keeps_mode() {
        let mut remap = remapper();
        let mut sink = MockSink::new();
        block_on(remap.update([1.0, 0.0, 0.0, 0.0], &mut sink)).unwrap();

        let mut broken = MockSink::failing(OutputError::Io);
        assert_eq!(
            block_on(remap.on_button(0, true, &mut broken)),
            Err(RemapError::Output(OutputError::Io))
        );
        assert_eq!(remap.stick_state(Stick::A).mode_index(), 0);
        assert_eq!(remap.active_stick(), Some(Stick::A));

        block_on(remap.on_button(0, true, &mut sink)).unwrap();
        assert_eq!(remap.stick_state(Stick::A).mode_index(), 1);
        assert!(remap.stick_state(Stick::A).is_idle());
    }

    #[test]
    fn test_new_raises_zero_steps() {
        let config = RemapConfig {
            max_unwind_step: 0,
            scroll_saturate: -1,
            ..DEFAULT_CONFIG
        };
        let mut remap = Remapper::new(&DEFAULT_MODES, config);
        assert_eq!(remap.config().max_unwind_step, 1);
        assert_eq!(remap.config().scroll_saturate, 1);

        let mut sink = MockSink::new();
        block_on(remap.update([0.0, 1.0, 0.0, 0.0], &mut sink)).unwrap();
        sink.clear();
        block_on(remap.update(REST, &mut sink)).unwrap();

        // 25 px back, one pixel at a time
        assert_eq!(sink.moves().len(), 25);
        assert!(sink.moves().iter().all(|&m| m == (0, 1)));
    }

    #[test]
    fn test_no_activation_while_sink_not_ready() {
        let mut remap = remapper();
        let mut offline = MockSink::failing(OutputError::NotReady);

        block_on(remap.update([1.0, 0.0, 0.0, 0.0], &mut offline)).unwrap();
        assert_eq!(remap.active_stick(), None);
        assert!(remap.stick_state(Stick::A).is_idle());

        let mut sink = MockSink::new();
        block_on(remap.update([1.0, 0.0, 0.0, 0.0], &mut sink)).unwrap();
        assert_eq!(remap.active_stick(), Some(Stick::A));
    }

    #[test]
    fn test_output_error_propagates_and_release_recovers() {
        let mut remap = remapper();
        let mut sink = MockSink::new();
        block_on(remap.update([1.0, 0.0, 0.0, 0.0], &mut sink)).unwrap();

        let mut broken = MockSink::failing(OutputError::NotReady);
        assert_eq!(
            block_on(remap.update([1.0, 0.0, 0.0, 0.0], &mut broken)),
            Err(RemapError::Output(OutputError::NotReady))
        );

        sink.clear();
        block_on(remap.release(&mut sink)).unwrap();
        assert_eq!(remap.active_stick(), None);
        assert_eq!(
            sink.events(),
            vec![Event::Buttons([false, false, false]), Event::Move(25, 0)]
        );
    }
}
