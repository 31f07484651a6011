//! Mock pins and clock for driver tests

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use healing_hal::Clock;

/// Output pin remembering its level
#[derive(Debug, Default)]
pub struct MockOutput {
    pub high: bool,
    pub toggles: usize,
}

impl ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.toggles += 1;
        }
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.high {
            self.toggles += 1;
        }
        self.high = false;
        Ok(())
    }
}

/// Input pin whose level the test sets
#[derive(Debug, Default)]
pub struct MockInput {
    pub high: bool,
}

impl ErrorType for MockInput {
    type Error = Infallible;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

/// Manually advanced clock
#[derive(Debug, Default)]
pub struct MockClock {
    pub us: Cell<u64>,
}

impl MockClock {
    pub fn advance_us(&self, us: u64) {
        self.us.set(self.us.get() + us);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u64 {
        self.us.get()
    }
}
