//! Half-step driver for four-wire unipolar steppers
//!
//! Drives the four coil outputs of a ULN2003-style board directly through
//! the eight-phase half-step sequence. Step timing follows the classic
//! AccelStepper trapezoid (D. Austin, "Generate stepper-motor speed
//! profiles in real time", 2005): every step recomputes the next step
//! interval from the previous one, accelerating up to the maximum speed and
//! decelerating so the motor stops on the target.
//!
//! # Timing
//!
//! `run()` must be called at least once per step interval. At the
//! calibration speed of 1000 steps/s that is once per millisecond.

use embedded_hal::digital::OutputPin;
use healing_core::traits::StepEngine;
use healing_hal::Clock;

/// Coil pattern per phase, bit 0 = coil 1
pub const HALF_STEP_SEQUENCE: [u8; 8] = [
    0b0001, 0b0101, 0b0100, 0b0110, 0b0010, 0b1010, 0b1000, 0b1001,
];

/// First-step interval correction factor from the Austin paper
const C0_FACTOR: f32 = 0.676;

const US_PER_S: f32 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Half-step engine over four output pins
pub struct HalfStepEngine<P, C> {
    coils: [P; 4],
    clock: C,
    current: i32,
    target: i32,
    /// Signed speed in steps/s
    speed: f32,
    max_speed: f32,
    acceleration: f32,
    /// Interval until the next step, 0 when stopped
    step_interval_us: u64,
    last_step_us: u64,
    /// Step counter within the current ramp (negative while decelerating)
    n: i32,
    /// Initial step interval
    c0: f32,
    /// Last step interval
    cn: f32,
    /// Step interval at maximum speed
    cmin: f32,
    direction: Direction,
    energized: bool,
}

impl<P: OutputPin, C: Clock> HalfStepEngine<P, C> {
    /// Create an engine at position 0 with coils released
    ///
    /// Speed and acceleration start at 1 step/s and 1 step/s², so callers
    /// normally set both before the first move.
    pub fn new(coils: [P; 4], clock: C) -> Self {
        let mut engine = Self {
            coils,
            clock,
            current: 0,
            target: 0,
            speed: 0.0,
            max_speed: 1.0,
            acceleration: 0.0,
            step_interval_us: 0,
            last_step_us: 0,
            n: 0,
            c0: 0.0,
            cn: 0.0,
            cmin: US_PER_S,
            direction: Direction::Forward,
            energized: false,
        };
        engine.set_acceleration(1.0);
        engine.release_coils();
        engine
    }

    /// Current signed speed in steps per second
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Check if the coils are energized
    pub fn is_energized(&self) -> bool {
        self.energized
    }

    /// Coil outputs, for inspection
    pub fn coils(&self) -> &[P; 4] {
        &self.coils
    }

    /// Emit a step if one is due at the current speed
    fn run_speed(&mut self) -> bool {
        if self.step_interval_us == 0 {
            return false;
        }

        let now = self.clock.now_us();
        if now.wrapping_sub(self.last_step_us) < self.step_interval_us {
            return false;
        }

        match self.direction {
            Direction::Forward => self.current += 1,
            Direction::Backward => self.current -= 1,
        }
        self.write_phase();
        self.last_step_us = now;
        true
    }

    /// Recompute the interval to the next step
    fn compute_new_speed(&mut self) {
        let distance = self.distance_to_go();
        let steps_to_stop = ((self.speed * self.speed) / (2.0 * self.acceleration)) as i32;

        if distance == 0 && steps_to_stop <= 1 {
            self.step_interval_us = 0;
            self.speed = 0.0;
            self.n = 0;
            return;
        }

        if distance > 0 {
            if self.n > 0 {
                if steps_to_stop >= distance || self.direction == Direction::Backward {
                    self.n = -steps_to_stop;
                }
            } else if self.n < 0 && steps_to_stop < distance && self.direction == Direction::Forward
            {
                self.n = -self.n;
            }
        } else if distance < 0 {
            if self.n > 0 {
                if steps_to_stop >= -distance || self.direction == Direction::Forward {
                    self.n = -steps_to_stop;
                }
            } else if self.n < 0
                && steps_to_stop < -distance
                && self.direction == Direction::Backward
            {
                self.n = -self.n;
            }
        }

        if self.n == 0 {
            self.cn = self.c0;
            self.direction = if distance > 0 {
                Direction::Forward
            } else {
                Direction::Backward
            };
        } else {
            self.cn -= (2.0 * self.cn) / ((4 * self.n + 1) as f32);
            self.cn = self.cn.max(self.cmin);
        }
        self.n += 1;
        self.step_interval_us = self.cn as u64;
        self.speed = US_PER_S / self.cn;
        if self.direction == Direction::Backward {
            self.speed = -self.speed;
        }
    }

    fn write_phase(&mut self) {
        if !self.energized {
            return;
        }
        let pattern = HALF_STEP_SEQUENCE[self.current.rem_euclid(8) as usize];
        self.write_coils(pattern);
    }

    fn release_coils(&mut self) {
        self.write_coils(0);
    }

    fn write_coils(&mut self, pattern: u8) {
        let mut failed = false;
        for (i, coil) in self.coils.iter_mut().enumerate() {
            let result = if pattern & (1 << i) != 0 {
                coil.set_high()
            } else {
                coil.set_low()
            };
            failed |= result.is_err();
        }
        if failed {
            warn!("Stepper coil write failed");
        }
    }
}

impl<P: OutputPin, C: Clock> StepEngine for HalfStepEngine<P, C> {
    fn move_to(&mut self, target: i32) {
        if self.target != target {
            self.target = target;
            self.compute_new_speed();
        }
    }

    fn target_position(&self) -> i32 {
        self.target
    }

    fn current_position(&self) -> i32 {
        self.current
    }

    fn set_current_position(&mut self, position: i32) {
        self.current = position;
        self.target = position;
        self.n = 0;
        self.step_interval_us = 0;
        self.speed = 0.0;
    }

    fn run(&mut self) -> bool {
        if self.run_speed() {
            self.compute_new_speed();
        }
        self.speed != 0.0 || self.distance_to_go() != 0
    }

    fn set_max_speed(&mut self, steps_per_s: f32) {
        let speed = libm::fabsf(steps_per_s);
        if speed == 0.0 || speed == self.max_speed {
            return;
        }
        self.max_speed = speed;
        self.cmin = US_PER_S / speed;
        if self.n > 0 {
            // Re-enter the ramp at the step matching the current speed
            self.n = ((self.speed * self.speed) / (2.0 * self.acceleration)) as i32;
            self.compute_new_speed();
        }
    }

    fn set_acceleration(&mut self, steps_per_s2: f32) {
        let acceleration = libm::fabsf(steps_per_s2);
        if acceleration == 0.0 || acceleration == self.acceleration {
            return;
        }
        if self.acceleration > 0.0 {
            self.n = (self.n as f32 * (self.acceleration / acceleration)) as i32;
        }
        self.c0 = C0_FACTOR * libm::sqrtf(2.0 / acceleration) * US_PER_S;
        self.acceleration = acceleration;
        self.compute_new_speed();
    }

    fn enable_outputs(&mut self) {
        self.energized = true;
        self.write_phase();
    }

    fn disable_outputs(&mut self) {
        self.release_coils();
        self.energized = false;
    }
}
