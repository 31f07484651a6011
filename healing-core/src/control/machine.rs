//! Motor control state machine
//!
//! The gear pair has a 2:1 ratio and the magnet sits in the large gear, so
//! the sensor fires once per revolution of the display. Positions count
//! steps of the motor.
//!
//! - **Zero** is the step where the sensor shows a rising edge.
//! - **Full spin** is the number of steps between two zeros (~8100).
//! - **Home** is the rest position, `full spin - home offset` steps past
//!   zero.
//!
//! The gears only ever turn in one direction.

use healing_hal::ByteStorage;

use super::mode::{Mode, SensorHealth};
use super::SetupError;
use crate::config::MotorConfig;
use crate::layout::StepperSlots;
use crate::setting::DurableSetting;
use crate::traits::{StatusIndicator, StepEngine, EdgeSignal};

/// Control state machine for one stepper
///
/// Owns its step engine and sensor. The status indicator and durable
/// storage are usually shared between motors through `&RefCell` handles.
///
/// Call [`MotorControl::begin`] once, then [`MotorControl::update`] every
/// loop iteration. [`MotorControl::spin`] and [`MotorControl::calibrate`]
/// only change the mode; the next `update` acts on it.
pub struct MotorControl<E, G, I, S> {
    id: u8,
    engine: E,
    sensor: G,
    indicator: I,
    storage: S,
    config: MotorConfig,
    home_offset: DurableSetting<i32>,
    full_spin: DurableSetting<i32>,
    mode: Mode,
    enabled: bool,
    /// Sensor state at the previous poll
    prev_on: bool,
    /// Edges seen during the current rotation
    edge_count: u16,
    /// Rotations completed during calibration
    calibration_spins: u8,
    last_rotation: Option<SensorHealth>,
}

impl<E, G, I, S> MotorControl<E, G, I, S>
where
    E: StepEngine,
    G: EdgeSignal,
    I: StatusIndicator,
    S: ByteStorage,
{
    /// Create a motor control and load its calibration constants
    ///
    /// The constants live in the storage block derived from `id`; ids
    /// whose block collides with other data are rejected.
    pub fn new(
        id: u8,
        mut engine: E,
        sensor: G,
        indicator: I,
        mut storage: S,
        config: MotorConfig,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let slots = StepperSlots::for_stepper(id, storage.capacity())?;

        let full_spin = DurableSetting::new(&mut storage, slots.full_spin.offset, config.full_spin);
        let home_offset =
            DurableSetting::new(&mut storage, slots.home_offset.offset, config.home_offset);

        engine.disable_outputs();

        Ok(Self {
            id,
            engine,
            sensor,
            indicator,
            storage,
            config,
            home_offset,
            full_spin,
            mode: Mode::Locating,
            enabled: false,
            prev_on: false,
            edge_count: 0,
            calibration_spins: 0,
            last_rotation: None,
        })
    }

    /// First-time initialization: sample the sensor and start locating
    pub fn begin(&mut self) {
        self.sensor.begin();
        self.prev_on = self.sensor.is_on();

        info!(
            "Stepper {}: homeOffset={} fullSpin={}",
            self.id,
            self.home_offset.get(),
            self.full_spin.get()
        );

        self.set_mode(Mode::Locating);
    }

    /// Time-slice: poll the sensor, step the motor, evaluate the mode
    ///
    /// Releases the motor whenever it has nothing left to do.
    pub fn update(&mut self) {
        self.sensor.update();
        self.engine.run();

        let edge = self.poll_edge();

        match self.mode {
            Mode::Locating => {
                if edge && self.engine.current_position() > self.config.startup_fudge {
                    self.set_mode(Mode::Homing);
                }
            }
            Mode::Homing => {
                if self.engine.distance_to_go() == 0 {
                    self.set_mode(Mode::Waiting);
                }
            }
            Mode::Waiting | Mode::CalibrateWait => {}
            Mode::Spinning => {
                if edge {
                    let position = self.engine.current_position();
                    let correction = self.home_offset.get() - position;
                    debug!(
                        "Stepper {}: spinning edge at {}, correction={}",
                        self.id, position, correction
                    );
                    self.move_to(self.full_spin.get() - correction);
                    self.edge_count = self.edge_count.saturating_add(1);
                }
                if self.engine.distance_to_go() == 0 {
                    self.finish_rotation();
                    self.set_mode(Mode::Waiting);
                }
            }
            Mode::CalibrateZero => {
                if edge {
                    self.record_home_offset();
                    self.set_mode(Mode::CalibrateSpin);
                }
            }
            Mode::CalibrateSpin => {
                if edge {
                    self.calibration_spins = self.calibration_spins.saturating_add(1);
                    debug!(
                        "Stepper {}: calibration spin {}/{}",
                        self.id, self.calibration_spins, self.config.calibration_spins
                    );
                    if self.calibration_spins >= self.config.calibration_spins {
                        self.record_full_spin();
                        self.set_mode(Mode::Homing);
                    }
                }
            }
        }

        if self.enabled && self.engine.distance_to_go() == 0 {
            self.disable_outputs();
        }
    }

    /// Request one rotation; ignored unless waiting at home
    pub fn spin(&mut self) {
        if self.mode.accepts_spin() {
            self.set_mode(Mode::Spinning);
        } else {
            trace!("Stepper {}: spin ignored in {:?}", self.id, self.mode);
        }
    }

    /// Arm calibration, or start measuring if already armed
    pub fn calibrate(&mut self) {
        if self.mode == Mode::CalibrateWait {
            self.set_mode(Mode::CalibrateZero);
        } else {
            self.set_mode(Mode::CalibrateWait);
        }
    }

    /// Energize the motor
    pub fn enable_outputs(&mut self) {
        if !self.enabled {
            trace!("Stepper {}: enable outputs", self.id);
            self.engine.enable_outputs();
            self.enabled = true;
        }
    }

    /// Release the motor
    ///
    /// The step count means nothing while the coils are off, so the
    /// position reference is reset to zero.
    pub fn disable_outputs(&mut self) {
        if self.enabled {
            trace!("Stepper {}: disable outputs", self.id);
            self.engine.disable_outputs();
            self.engine.set_current_position(0);
            self.enabled = false;
        }
    }

    /// Check if the motor is energized
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Energize the motor and set a new target
    pub fn move_to(&mut self, target: i32) {
        trace!(
            "Stepper {}: moveTo({}) from {}",
            self.id,
            target,
            self.engine.current_position()
        );
        self.enable_outputs();
        self.engine.move_to(target);
    }

    /// Stepper id
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Calibrated home offset
    pub fn home_offset(&self) -> i32 {
        self.home_offset.get()
    }

    /// Calibrated full spin length
    pub fn full_spin(&self) -> i32 {
        self.full_spin.get()
    }

    /// Edges seen during the current or last rotation
    pub fn edge_count(&self) -> u16 {
        self.edge_count
    }

    /// Sensor health of the last completed rotation
    pub fn last_rotation(&self) -> Option<SensorHealth> {
        self.last_rotation
    }

    /// Motor configuration
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Step engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Edge signal
    pub fn sensor(&self) -> &G {
        &self.sensor
    }

    /// Mutable edge signal
    pub fn sensor_mut(&mut self) -> &mut G {
        &mut self.sensor
    }

    /// Status indicator
    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Durable storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Report a rising edge since the previous poll
    ///
    /// Falling edges are ignored.
    fn poll_edge(&mut self) -> bool {
        let on = self.sensor.is_on();
        if on == self.prev_on {
            return false;
        }
        self.prev_on = on;
        if on {
            trace!("Stepper {}: sensor edge", self.id);
        }
        on
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        info!("Stepper {}: mode {:?}", self.id, mode);

        if self.config.controls_indicator {
            if let Some(pattern) = mode.indicator_pattern() {
                self.indicator.set_pattern(pattern);
            }
        }

        match mode {
            Mode::Locating => {
                self.use_calibrate_speed();
                self.move_to(self.config.calibrate_steps);
            }
            Mode::Homing => {
                // Called at the sensor edge: home is one full spin minus
                // the offset further on
                let target = self.engine.current_position() + self.full_spin.get()
                    - self.home_offset.get();
                self.move_to(target);
            }
            Mode::Waiting => {
                self.engine.set_current_position(0);
            }
            Mode::Spinning => {
                self.engine.set_max_speed(self.config.normal_speed as f32);
                self.engine.set_acceleration(self.config.normal_acceleration as f32);
                self.move_to(self.full_spin.get());
                self.edge_count = 0;
            }
            Mode::CalibrateWait => {
                self.disable_outputs();
            }
            Mode::CalibrateZero => {
                self.use_calibrate_speed();
                self.engine.set_current_position(0);
                self.move_to(self.config.calibrate_steps);
            }
            Mode::CalibrateSpin => {
                self.calibration_spins = 0;
            }
        }
    }

    fn use_calibrate_speed(&mut self) {
        self.engine.set_max_speed(self.config.calibrate_speed as f32);
        self.engine
            .set_acceleration(self.config.calibrate_acceleration as f32);
    }

    fn finish_rotation(&mut self) {
        let health = SensorHealth::from_edge_count(self.edge_count);
        if let Some(pattern) = health.fault_pattern() {
            warn!(
                "Stepper {}: rotation saw {} sensor edges",
                self.id, self.edge_count
            );
            self.indicator.set_pattern(pattern);
        }
        self.last_rotation = Some(health);
    }

    fn record_home_offset(&mut self) {
        let old = self.home_offset.get();
        let measured = self.engine.current_position();
        if !self.home_offset.set(measured) {
            warn!(
                "Stepper {}: home offset {} out of range, keeping {}",
                self.id, measured, old
            );
        }
        if let Err(e) = self.home_offset.save(&mut self.storage) {
            error!("Stepper {}: saving home offset failed: {:?}", self.id, e);
        }
        info!(
            "Stepper {}: home offset old={} new={}",
            self.id,
            old,
            self.home_offset.get()
        );
    }

    fn record_full_spin(&mut self) {
        let old = self.full_spin.get();
        let travelled = self.engine.current_position() - self.home_offset.get();
        let measured = travelled / self.calibration_spins as i32;
        if !self.full_spin.set(measured) {
            warn!(
                "Stepper {}: full spin {} out of range, keeping {}",
                self.id, measured, old
            );
        }
        if let Err(e) = self.full_spin.save(&mut self.storage) {
            error!("Stepper {}: saving full spin failed: {:?}", self.id, e);
        }
        info!(
            "Stepper {}: calibration complete, full spin old={} new={}",
            self.id,
            old,
            self.full_spin.get()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SettingRange;
    use crate::testing::{FailingStorage, MockEngine, MockSensor, RecordingIndicator};
    use crate::traits::BlinkPattern;
    use healing_hal::MemoryEeprom;

    type Eeprom = MemoryEeprom<32>;
    type TestMotor<S = Eeprom> = MotorControl<MockEngine, MockSensor, RecordingIndicator, S>;

    fn motor_with<S: ByteStorage>(storage: S, config: MotorConfig) -> TestMotor<S> {
        MotorControl::new(
            1,
            MockEngine::default(),
            MockSensor::default(),
            RecordingIndicator::default(),
            storage,
            config,
        )
        .unwrap()
    }

    fn motor() -> TestMotor {
        motor_with(Eeprom::new(), MotorConfig::default().with_indicator(true))
    }

    /// Run until the engine stands at `position`, with the sensor off
    fn advance_to<S: ByteStorage>(m: &mut TestMotor<S>, position: i32) {
        m.sensor_mut().on = false;
        let mut guard = 0;
        while m.engine().current_position() != position {
            m.update();
            guard += 1;
            assert!(guard < 1_000_000, "never reached {}", position);
        }
    }

    /// Deliver a rising edge observed at exactly `position`
    ///
    /// The sensor is released on the following update, which moves the
    /// motor one more step.
    fn edge_at<S: ByteStorage>(m: &mut TestMotor<S>, position: i32) {
        advance_to(m, position - 1);
        m.sensor_mut().on = true;
        m.update();
        assert_eq!(m.engine().current_position(), position);
        m.sensor_mut().on = false;
        m.update();
    }

    /// Run until the motor leaves the current mode
    fn run_until_mode_changes<S: ByteStorage>(m: &mut TestMotor<S>) {
        let start = m.mode();
        let mut guard = 0;
        while m.mode() == start {
            m.update();
            guard += 1;
            assert!(guard < 1_000_000);
        }
    }

    fn waiting_motor() -> TestMotor {
        let mut m = motor();
        m.begin();
        edge_at(&mut m, 1500);
        assert_eq!(m.mode(), Mode::Homing);
        run_until_mode_changes(&mut m);
        assert_eq!(m.mode(), Mode::Waiting);
        m
    }

    fn store_i32(eeprom: &mut Eeprom, offset: usize, value: i32) {
        for (i, b) in value.to_le_bytes().iter().enumerate() {
            eeprom.update(offset + i, *b).unwrap();
        }
    }

    fn stored_i32(eeprom: &Eeprom, offset: usize) -> i32 {
        let b = eeprom.as_bytes();
        i32::from_le_bytes([b[offset], b[offset + 1], b[offset + 2], b[offset + 3]])
    }

    #[test]
    fn test_begin_starts_locating() {
        let mut m = motor();
        assert!(!m.is_enabled());

        m.begin();
        assert_eq!(m.mode(), Mode::Locating);
        assert!(m.is_enabled());
        assert_eq!(m.engine().target, 200_000);
        assert_eq!(m.engine().max_speed, 1000.0);
        assert_eq!(m.engine().acceleration, 2000.0);
        assert_eq!(m.indicator().last(), Some(BlinkPattern::SEEKING));
    }

    #[test]
    fn test_defaults_loaded_from_blank_storage() {
        let m = motor();
        assert_eq!(m.home_offset(), 0);
        assert_eq!(m.full_spin(), 8000);
    }

    #[test]
    fn test_locating_ignores_edge_before_fudge() {
        let mut m = motor();
        m.begin();

        edge_at(&mut m, 500);
        assert_eq!(m.mode(), Mode::Locating);

        // Exactly at the threshold is still too early
        edge_at(&mut m, 1000);
        assert_eq!(m.mode(), Mode::Locating);

        edge_at(&mut m, 1002);
        assert_eq!(m.mode(), Mode::Homing);
    }

    #[test]
    fn test_locating_without_edge_stays_locating() {
        let mut m = motor();
        m.begin();
        advance_to(&mut m, 5000);
        assert_eq!(m.mode(), Mode::Locating);
    }

    #[test]
    fn test_sensor_resting_on_magnet_is_not_an_edge() {
        let mut m = motor();
        m.sensor_mut().on = true;
        m.begin();

        // Stays on past the fudge: no transition
        for _ in 0..1200 {
            m.update();
        }
        assert_eq!(m.mode(), Mode::Locating);

        // Falling edge is ignored too
        m.sensor_mut().on = false;
        m.update();
        assert_eq!(m.mode(), Mode::Locating);
    }

    #[test]
    fn test_homing_target_and_waiting() {
        let mut eeprom = Eeprom::new();
        store_i32(&mut eeprom, 8, 8100);
        store_i32(&mut eeprom, 12, 700);
        let mut m = motor_with(eeprom, MotorConfig::default());
        assert_eq!(m.full_spin(), 8100);
        assert_eq!(m.home_offset(), 700);

        m.begin();
        edge_at(&mut m, 2000);
        assert_eq!(m.mode(), Mode::Homing);
        assert_eq!(m.engine().target, 2000 + 8100 - 700);

        run_until_mode_changes(&mut m);
        assert_eq!(m.mode(), Mode::Waiting);
        assert_eq!(m.engine().current_position(), 0);
        assert!(!m.is_enabled());
        assert!(!m.engine().enabled);
    }

    #[test]
    fn test_home_offset_beyond_full_spin_never_homes_backwards() {
        let mut eeprom = Eeprom::new();
        store_i32(&mut eeprom, 8, 6000);
        store_i32(&mut eeprom, 12, 9000);
        let mut m = motor_with(eeprom, MotorConfig::default());
        assert_eq!(m.full_spin(), 6000);
        // Above the accepted range, so the default applies
        assert_eq!(m.home_offset(), 0);

        m.begin();
        edge_at(&mut m, 2000);
        assert_eq!(m.mode(), Mode::Homing);
        assert_eq!(m.engine().target, 2000 + 6000);
        assert!(m.engine().target > m.engine().current_position());
    }

    #[test]
    fn test_spin_only_from_waiting() {
        let mut m = motor();
        m.begin();
        m.spin();
        assert_eq!(m.mode(), Mode::Locating);

        let mut m = waiting_motor();
        m.spin();
        assert_eq!(m.mode(), Mode::Spinning);
        assert!(m.is_enabled());
        assert_eq!(m.engine().target, 8000);
        assert_eq!(m.engine().max_speed, 300.0);
        assert_eq!(m.engine().acceleration, 100.0);

        // Second request mid-rotation is ignored
        m.spin();
        assert_eq!(m.mode(), Mode::Spinning);
        assert_eq!(m.engine().target, 8000);
    }

    #[test]
    fn test_spin_ignored_while_calibrating() {
        let mut m = waiting_motor();
        m.calibrate();
        m.spin();
        assert_eq!(m.mode(), Mode::CalibrateWait);
    }

    #[test]
    fn test_spinning_edge_corrects_target() {
        let mut m = waiting_motor();
        m.spin();

        edge_at(&mut m, 300);
        // fullSpin - (homeOffset - X) = 8000 - (0 - 300)
        assert_eq!(m.engine().target, 8300);
        assert_eq!(m.edge_count(), 1);

        run_until_mode_changes(&mut m);
        assert_eq!(m.mode(), Mode::Waiting);
        assert_eq!(m.last_rotation(), Some(SensorHealth::Ok));
        assert_eq!(m.engine().current_position(), 0);
        assert!(!m.is_enabled());
    }

    #[test]
    fn test_spinning_each_edge_recomputes_target() {
        let mut m = waiting_motor();
        m.spin();

        edge_at(&mut m, 300);
        edge_at(&mut m, 900);
        assert_eq!(m.engine().target, 8900);
        assert_eq!(m.edge_count(), 2);

        run_until_mode_changes(&mut m);
        assert_eq!(m.mode(), Mode::Waiting);
        assert_eq!(m.last_rotation(), Some(SensorHealth::MultipleEdges));
        assert_eq!(m.indicator().last(), Some(BlinkPattern::MULTIPLE_EDGES));
    }

    #[test]
    fn test_spinning_without_edge_still_completes() {
        let mut m = waiting_motor();
        m.spin();

        run_until_mode_changes(&mut m);
        assert_eq!(m.mode(), Mode::Waiting);
        assert_eq!(m.last_rotation(), Some(SensorHealth::NoEdge));
        assert_eq!(m.indicator().last(), Some(BlinkPattern::NO_EDGE));
    }

    #[test]
    fn test_calibrate_arms_and_releases_motor() {
        let mut m = waiting_motor();
        m.spin();
        advance_to(&mut m, 100);
        assert!(m.is_enabled());

        m.calibrate();
        assert_eq!(m.mode(), Mode::CalibrateWait);
        assert!(!m.is_enabled());
        assert_eq!(m.engine().current_position(), 0);
        assert_eq!(m.indicator().last(), Some(BlinkPattern::CALIBRATE_WAIT));

        // Nothing happens until confirmed
        for _ in 0..100 {
            m.update();
        }
        assert_eq!(m.mode(), Mode::CalibrateWait);
        assert_eq!(m.engine().current_position(), 0);
    }

    #[test]
    fn test_full_calibration_sequence() {
        let mut m = waiting_motor();

        m.calibrate();
        assert_eq!(m.mode(), Mode::CalibrateWait);
        m.calibrate();
        assert_eq!(m.mode(), Mode::CalibrateZero);
        assert_eq!(m.engine().target, 200_000);
        assert_eq!(m.engine().max_speed, 1000.0);

        edge_at(&mut m, 700);
        assert_eq!(m.mode(), Mode::CalibrateSpin);
        assert_eq!(m.home_offset(), 700);
        assert_eq!(stored_i32(m.storage(), 12), 700);

        edge_at(&mut m, 8800);
        assert_eq!(m.mode(), Mode::Homing);
        assert_eq!(m.full_spin(), 8100);
        assert_eq!(stored_i32(m.storage(), 8), 8100);
        assert_eq!(m.engine().target, 8800 + 8100 - 700);

        run_until_mode_changes(&mut m);
        assert_eq!(m.mode(), Mode::Waiting);

        // Survives a power cycle
        let restarted = motor_with(m.storage().clone(), MotorConfig::default());
        assert_eq!(restarted.home_offset(), 700);
        assert_eq!(restarted.full_spin(), 8100);
    }

    #[test]
    fn test_calibration_averages_multiple_spins() {
        let config = MotorConfig {
            calibration_spins: 3,
            ..Default::default()
        };
        let mut m = motor_with(Eeprom::new(), config);
        m.begin();
        m.calibrate();
        m.calibrate();

        edge_at(&mut m, 500);
        edge_at(&mut m, 8600);
        edge_at(&mut m, 16_700);
        assert_eq!(m.mode(), Mode::CalibrateSpin);
        edge_at(&mut m, 24_800);

        assert_eq!(m.mode(), Mode::Homing);
        assert_eq!(m.full_spin(), (24_800 - 500) / 3);
    }

    #[test]
    fn test_out_of_range_measurement_keeps_old_value() {
        let mut m = waiting_motor();
        m.calibrate();
        m.calibrate();

        edge_at(&mut m, 400);
        // 4000 steps is below the 6000 minimum
        edge_at(&mut m, 4400);
        assert_eq!(m.mode(), Mode::Homing);
        assert_eq!(m.full_spin(), 8000);
        assert_eq!(stored_i32(m.storage(), 8), 8000);
    }

    #[test]
    fn test_calibration_continues_when_storage_fails() {
        let mut m = motor_with(FailingStorage::default(), MotorConfig::default());
        m.begin();
        m.calibrate();
        m.calibrate();
        assert_eq!(m.mode(), Mode::CalibrateZero);

        edge_at(&mut m, 600);
        assert_eq!(m.mode(), Mode::CalibrateSpin);
        assert_eq!(m.home_offset(), 600);

        edge_at(&mut m, 8750);
        assert_eq!(m.mode(), Mode::Homing);
        assert_eq!(m.full_spin(), 8150);
        assert_eq!(m.storage().failed_commits, 2);

        run_until_mode_changes(&mut m);
        assert_eq!(m.mode(), Mode::Waiting);
    }

    #[test]
    fn test_rotation_faults_reported_without_indicator_ownership() {
        let mut m = motor_with(Eeprom::new(), MotorConfig::default());
        m.begin();
        edge_at(&mut m, 1500);
        run_until_mode_changes(&mut m);
        assert_eq!(m.mode(), Mode::Waiting);
        assert!(m.indicator().patterns.is_empty());

        m.spin();
        run_until_mode_changes(&mut m);
        assert_eq!(m.last_rotation(), Some(SensorHealth::NoEdge));
        assert_eq!(m.indicator().patterns, [BlinkPattern::NO_EDGE]);

        m.spin();
        edge_at(&mut m, 200);
        edge_at(&mut m, 700);
        run_until_mode_changes(&mut m);
        assert_eq!(m.last_rotation(), Some(SensorHealth::MultipleEdges));
        assert_eq!(m.indicator().last(), Some(BlinkPattern::MULTIPLE_EDGES));
    }

    #[test]
    fn test_calibrate_from_any_mode_rearms() {
        let mut m = motor();
        m.begin();
        m.calibrate();
        m.calibrate();
        assert_eq!(m.mode(), Mode::CalibrateZero);

        // Pressing again mid-measurement starts over
        m.calibrate();
        assert_eq!(m.mode(), Mode::CalibrateWait);
    }

    #[test]
    fn test_enable_disable_idempotent() {
        let mut m = motor();
        let baseline = m.engine().disable_calls;

        m.disable_outputs();
        assert_eq!(m.engine().disable_calls, baseline);

        m.move_to(50);
        assert!(m.is_enabled());
        m.enable_outputs();
        assert!(m.engine().enabled);

        m.update();
        assert_eq!(m.engine().current_position(), 1);
        m.disable_outputs();
        m.disable_outputs();
        assert_eq!(m.engine().disable_calls, baseline + 1);
        assert_eq!(m.engine().current_position(), 0);
        assert!(!m.is_enabled());
    }

    #[test]
    fn test_indicator_modes_only_for_owner() {
        let mut m = motor_with(Eeprom::new(), MotorConfig::default());
        m.begin();
        m.calibrate();
        assert!(m.indicator().patterns.is_empty());
    }

    #[test]
    fn test_rejects_colliding_id() {
        let result = MotorControl::new(
            0,
            MockEngine::default(),
            MockSensor::default(),
            RecordingIndicator::default(),
            Eeprom::new(),
            MotorConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SetupError::Layout(crate::layout::LayoutError::Overlap))
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = MotorConfig {
            home_offset: SettingRange::new(100, 0, 50),
            ..Default::default()
        };
        let result = MotorControl::new(
            1,
            MockEngine::default(),
            MockSensor::default(),
            RecordingIndicator::default(),
            Eeprom::new(),
            config,
        );
        assert!(matches!(result, Err(SetupError::Config(_))));
    }
}
