//! Per-motor control
//!
//! One [`MotorControl`] drives one stepper: it finds the sensor edge at
//! startup, parks at the home position, spins on request while correcting
//! drift against the sensor, and runs the manual calibration sequence.

pub mod machine;
pub mod mode;

pub use machine::MotorControl;
pub use mode::{Mode, SensorHealth};

use crate::config::ConfigError;
use crate::layout::LayoutError;

/// Errors constructing a [`MotorControl`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// The configuration is inconsistent
    Config(ConfigError),
    /// The stepper id does not map to free storage
    Layout(LayoutError),
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        SetupError::Config(e)
    }
}

impl From<LayoutError> for SetupError {
    fn from(e: LayoutError) -> Self {
        SetupError::Layout(e)
    }
}
