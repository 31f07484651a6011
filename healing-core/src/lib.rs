//! Board-agnostic control logic for the Healing Time display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Capability traits (step engine, edge signal, status indicator)
//! - Durable settings with range validation and write-minimized saves
//! - Storage layout for the per-stepper calibration constants
//! - The per-motor control state machine
//! - Command dispatch to the addressed motors

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod board;
pub mod config;
pub mod control;
pub mod dispatch;
pub mod layout;
pub mod setting;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use board::BoardId;
pub use config::{ConfigError, MotorConfig, SettingRange};
pub use control::{Mode, MotorControl, SensorHealth, SetupError};
pub use dispatch::{Addressable, Dispatcher};
pub use layout::{LayoutError, Slot, StepperSlots};
pub use setting::{DurableSetting, Persist};
