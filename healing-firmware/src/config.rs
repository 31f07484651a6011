//! Board configuration
//!
//! Constants generated by `build.rs` from `healing.toml`.

use healing_core::{MotorConfig, SettingRange};
use healing_drivers::sensor::HallConfig;

include!(concat!(env!("OUT_DIR"), "/healing_config.rs"));

/// Motor configuration for a stepper
///
/// Stepper 1 owns the status LED mode patterns.
pub fn motor_config(stepper_id: u8) -> MotorConfig {
    MOTOR_CONFIG.with_indicator(stepper_id == 1)
}
