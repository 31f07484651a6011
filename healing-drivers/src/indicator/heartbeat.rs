//! Heartbeat LED
//!
//! Blinks an LED with the last requested on/off pattern. The pattern is
//! only stored by `set_pattern`; the LED changes on `update`.

use embedded_hal::digital::OutputPin;
use healing_core::traits::{BlinkPattern, StatusIndicator};
use healing_hal::Clock;

/// Blinking status LED
pub struct Heartbeat<P, C> {
    pin: P,
    clock: C,
    pattern: BlinkPattern,
    lit: bool,
    /// Time of the last LED change
    changed_ms: u64,
}

impl<P: OutputPin, C: Clock> Heartbeat<P, C> {
    /// Create a heartbeat with the normal pattern, LED off
    pub fn new(pin: P, clock: C) -> Self {
        let changed_ms = clock.now_ms();
        let mut heartbeat = Self {
            pin,
            clock,
            pattern: BlinkPattern::NORMAL,
            lit: false,
            changed_ms,
        };
        heartbeat.write();
        heartbeat
    }

    /// Toggle the LED when the current phase has elapsed
    pub fn update(&mut self) {
        let now = self.clock.now_ms();
        let phase_ms = if self.lit {
            self.pattern.on_ms
        } else {
            self.pattern.off_ms
        };
        if now.saturating_sub(self.changed_ms) >= u64::from(phase_ms) {
            self.lit = !self.lit;
            self.changed_ms = now;
            self.write();
        }
    }

    /// Active pattern
    pub fn pattern(&self) -> BlinkPattern {
        self.pattern
    }

    /// Check if the LED is lit
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn write(&mut self) {
        let result = if self.lit {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_err() {
            warn!("Heartbeat LED write failed");
        }
    }
}

impl<P: OutputPin, C: Clock> StatusIndicator for Heartbeat<P, C> {
    fn set_pattern(&mut self, pattern: BlinkPattern) {
        if pattern != self.pattern {
            debug!("Heartbeat {}/{} ms", pattern.on_ms, pattern.off_ms);
            self.pattern = pattern;
        }
    }
}
