//! Simulated collaborators for host tests

use std::vec::Vec;

use healing_hal::{ByteStorage, MemoryEeprom, StorageError};

use crate::traits::{BlinkPattern, EdgeSignal, StatusIndicator, StepEngine};

/// Step engine that moves one step per `run()` at any speed
#[derive(Debug, Default)]
pub struct MockEngine {
    pub position: i32,
    pub target: i32,
    pub enabled: bool,
    pub max_speed: f32,
    pub acceleration: f32,
    pub disable_calls: usize,
}

impl StepEngine for MockEngine {
    fn move_to(&mut self, target: i32) {
        self.target = target;
    }

    fn target_position(&self) -> i32 {
        self.target
    }

    fn current_position(&self) -> i32 {
        self.position
    }

    fn set_current_position(&mut self, position: i32) {
        self.position = position;
        self.target = position;
    }

    fn run(&mut self) -> bool {
        let delta = (self.target - self.position).signum();
        self.position += delta;
        delta != 0
    }

    fn set_max_speed(&mut self, steps_per_s: f32) {
        self.max_speed = steps_per_s;
    }

    fn set_acceleration(&mut self, steps_per_s2: f32) {
        self.acceleration = steps_per_s2;
    }

    fn enable_outputs(&mut self) {
        self.enabled = true;
    }

    fn disable_outputs(&mut self) {
        self.enabled = false;
        self.disable_calls += 1;
    }
}

/// Sensor whose level the test sets directly
#[derive(Debug, Default)]
pub struct MockSensor {
    pub on: bool,
    pub updates: usize,
}

impl EdgeSignal for MockSensor {
    fn update(&mut self) {
        self.updates += 1;
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

/// Indicator remembering every pattern it was given
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    pub patterns: Vec<BlinkPattern>,
}

impl RecordingIndicator {
    pub fn last(&self) -> Option<BlinkPattern> {
        self.patterns.last().copied()
    }
}

impl StatusIndicator for RecordingIndicator {
    fn set_pattern(&mut self, pattern: BlinkPattern) {
        self.patterns.push(pattern);
    }
}

/// Storage whose commits always fail, as a worn-out flash sector would
#[derive(Debug, Default)]
pub struct FailingStorage {
    pub inner: MemoryEeprom<32>,
    pub failed_commits: usize,
}

impl ByteStorage for FailingStorage {
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        self.inner.read(offset, buf)
    }

    fn update(&mut self, offset: usize, value: u8) -> Result<bool, StorageError> {
        self.inner.update(offset, value)
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        self.failed_commits += 1;
        Err(StorageError::Write)
    }
}
