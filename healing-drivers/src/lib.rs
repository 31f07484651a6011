//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in healing-core on top of `embedded-hal` pins:
//!
//! - Hall sensor with debouncing
//! - Half-step driver for four-wire unipolar steppers (28BYJ-48 class)
//! - Heartbeat status LED

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod indicator;
pub mod sensor;
pub mod stepper;

#[cfg(test)]
pub(crate) mod mock;
