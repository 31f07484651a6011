//! Step engine trait
//!
//! A step engine turns an absolute target position into step pulses with
//! its own speed and acceleration profile. The control logic only sets
//! targets and gives the engine a time-slice.

/// Position-controlled stepper motor
///
/// Positions are in (half-)steps. The engine advances toward the target
/// only when [`StepEngine::run`] is called, so the caller must call it
/// every control cycle.
pub trait StepEngine {
    /// Set a new absolute target position
    fn move_to(&mut self, target: i32);

    /// Most recently set target position
    fn target_position(&self) -> i32;

    /// Current position, counted from emitted steps
    fn current_position(&self) -> i32;

    /// Redefine the current position
    ///
    /// The engine comes to rest here: target becomes `position` and the
    /// current speed drops to zero.
    fn set_current_position(&mut self, position: i32);

    /// Signed distance remaining to the target; zero means arrived
    fn distance_to_go(&self) -> i32 {
        self.target_position() - self.current_position()
    }

    /// Advance one time-slice, emitting at most one step
    ///
    /// Returns `true` while the motor is still moving.
    fn run(&mut self) -> bool;

    /// Set the maximum speed in steps per second
    fn set_max_speed(&mut self, steps_per_s: f32);

    /// Set the acceleration in steps per second squared
    fn set_acceleration(&mut self, steps_per_s2: f32);

    /// Energize the coils
    fn enable_outputs(&mut self);

    /// De-energize the coils
    fn disable_outputs(&mut self);
}
