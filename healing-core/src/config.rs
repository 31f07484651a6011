//! Motor configuration types
//!
//! Mechanical constants and speeds for one stepper. The defaults match the
//! stock 28BYJ-48 build in half-step mode with a 2:1 gear pair.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bounds and fallback for a durable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SettingRange<T> {
    /// Smallest accepted value
    pub min: T,
    /// Largest accepted value
    pub max: T,
    /// Value used when storage holds something out of range
    pub default: T,
}

impl<T: PartialOrd + Copy> SettingRange<T> {
    /// Create a range
    pub const fn new(min: T, max: T, default: T) -> Self {
        Self { min, max, default }
    }

    /// Check if a value lies within the bounds
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check that the bounds are ordered and the default lies within them
    pub fn is_valid(&self) -> bool {
        self.min <= self.max && self.contains(self.default)
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Home offset bounds are inverted or exclude the default
    HomeOffsetRange,
    /// Full spin bounds are inverted or exclude the default
    FullSpinRange,
    /// Calibration must measure at least one rotation
    NoCalibrationSpins,
    /// Speeds and accelerations must be non-zero
    ZeroSpeed,
    /// Calibration travel must exceed the startup fudge
    TravelTooShort,
    /// Every accepted home offset must stay below every accepted full spin
    RangesOverlap,
}

/// Configuration for one motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotorConfig {
    /// Travel required before an edge is accepted while locating
    ///
    /// About 1/8th of a turn; moves the magnet off the sensor in the
    /// common case where it rests on it.
    pub startup_fudge: i32,
    /// Target for open-ended moves (locating, calibration), well in
    /// excess of two full spins
    pub calibrate_steps: i32,
    /// Rotations measured to average the full spin
    pub calibration_spins: u8,
    /// Speed for scheduled rotations (steps/s)
    pub normal_speed: u16,
    /// Acceleration for scheduled rotations (steps/s²)
    pub normal_acceleration: u16,
    /// Speed while locating and calibrating (steps/s)
    pub calibrate_speed: u16,
    /// Acceleration while locating and calibrating (steps/s²)
    pub calibrate_acceleration: u16,
    /// Steps from the sensor edge to the rest position, counted back
    /// from a full spin
    ///
    /// Must lie entirely below `full_spin`; homing would otherwise turn
    /// the gears backwards.
    pub home_offset: SettingRange<i32>,
    /// Steps per full rotation between sensor edges
    pub full_spin: SettingRange<i32>,
    /// This motor drives the mode patterns of the status LED
    pub controls_indicator: bool,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            startup_fudge: 1000,
            calibrate_steps: 200_000,
            calibration_spins: 1,
            normal_speed: 300,
            normal_acceleration: 100,
            calibrate_speed: 1000,
            calibrate_acceleration: 2000,
            home_offset: SettingRange::new(0, 5999, 0),
            full_spin: SettingRange::new(6000, 10_000, 8000),
            controls_indicator: false,
        }
    }
}

impl MotorConfig {
    /// Builder-style toggle for the status LED
    pub const fn with_indicator(mut self, controls_indicator: bool) -> Self {
        self.controls_indicator = controls_indicator;
        self
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.home_offset.is_valid() {
            return Err(ConfigError::HomeOffsetRange);
        }
        if !self.full_spin.is_valid() {
            return Err(ConfigError::FullSpinRange);
        }
        if self.home_offset.max >= self.full_spin.min {
            return Err(ConfigError::RangesOverlap);
        }
        if self.calibration_spins == 0 {
            return Err(ConfigError::NoCalibrationSpins);
        }
        if self.normal_speed == 0
            || self.normal_acceleration == 0
            || self.calibrate_speed == 0
            || self.calibrate_acceleration == 0
        {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.calibrate_steps <= self.startup_fudge {
            return Err(ConfigError::TravelTooShort);
        }
        Ok(())
    }
}
