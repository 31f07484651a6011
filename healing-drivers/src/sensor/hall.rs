//! Hall effect sensor
//!
//! Reads a digital Hall switch (A3144 or similar) and debounces it by
//! sample count: a new level is only accepted once the pin has read the
//! same value for `stable_samples` consecutive updates.

use embedded_hal::digital::InputPin;
use healing_core::traits::EdgeSignal;

/// Hall sensor configuration
#[derive(Debug, Clone, Copy)]
pub struct HallConfig {
    /// Consecutive identical samples needed to accept a level
    pub stable_samples: u8,
    /// Magnet present reads as a low pin (open-collector switches)
    pub active_low: bool,
}

impl Default for HallConfig {
    fn default() -> Self {
        Self {
            stable_samples: 5,
            active_low: true,
        }
    }
}

/// Debounced Hall sensor
pub struct HallSensor<P> {
    pin: P,
    config: HallConfig,
    /// Accepted state (true = magnet present)
    on: bool,
    /// Raw state being counted
    candidate: bool,
    count: u8,
}

impl<P: InputPin> HallSensor<P> {
    pub fn new(pin: P, config: HallConfig) -> Self {
        Self {
            pin,
            config,
            on: false,
            candidate: false,
            count: 0,
        }
    }

    /// Sample the pin, `None` if it could not be read
    fn sample(&mut self) -> Option<bool> {
        match self.pin.is_high() {
            Ok(high) => Some(high != self.config.active_low),
            Err(_) => {
                warn!("Hall sensor read failed");
                None
            }
        }
    }
}

impl<P: InputPin> EdgeSignal for HallSensor<P> {
    /// Adopt the current pin level without debouncing
    fn begin(&mut self) {
        if let Some(raw) = self.sample() {
            self.on = raw;
            self.candidate = raw;
            self.count = self.config.stable_samples;
        }
    }

    fn update(&mut self) {
        let Some(raw) = self.sample() else {
            return;
        };

        if raw != self.candidate {
            self.candidate = raw;
            self.count = 0;
        }
        self.count = self.count.saturating_add(1);

        if self.count >= self.config.stable_samples && self.on != raw {
            self.on = raw;
            trace!("Hall sensor {}", if raw { "on" } else { "off" });
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
