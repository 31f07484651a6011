//! Sensor driver implementations

pub mod hall;

pub use hall::{HallConfig, HallSensor};
