//! Status indicator trait
//!
//! A single blinking LED tells the operator what the board is doing and
//! whether the last rotation saw the sensor as expected.

use core::cell::RefCell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// On/off blink timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlinkPattern {
    /// LED on time in milliseconds
    pub on_ms: u16,
    /// LED off time in milliseconds
    pub off_ms: u16,
}

impl BlinkPattern {
    /// Create a pattern
    pub const fn new(on_ms: u16, off_ms: u16) -> Self {
        Self { on_ms, off_ms }
    }

    /// Normal idle heartbeat
    pub const NORMAL: Self = Self::new(50, 950);

    /// Searching for the sensor edge (startup and calibration zeroing)
    pub const SEEKING: Self = Self::new(50, 1500);

    /// Motors released, waiting for the operator to confirm calibration
    pub const CALIBRATE_WAIT: Self = Self::new(1500, 50);

    /// Last rotation finished without seeing the sensor
    pub const NO_EDGE: Self = Self::new(50, 250);

    /// Last rotation saw the sensor more than once
    pub const MULTIPLE_EDGES: Self = Self::new(250, 50);
}

/// Output that can show a blink pattern
pub trait StatusIndicator {
    /// Switch to a new pattern
    fn set_pattern(&mut self, pattern: BlinkPattern);
}

impl<T: StatusIndicator + ?Sized> StatusIndicator for &mut T {
    fn set_pattern(&mut self, pattern: BlinkPattern) {
        (**self).set_pattern(pattern);
    }
}

/// Shared handle for an LED that several motors report to
impl<T: StatusIndicator> StatusIndicator for &RefCell<T> {
    fn set_pattern(&mut self, pattern: BlinkPattern) {
        self.borrow_mut().set_pattern(pattern);
    }
}
