//! RP2040-specific HAL for the Healing Time firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `healing-hal` traits:
//!
//! - EEPROM emulation in the last flash sector (implements
//!   `healing_hal::ByteStorage`)
//! - Embassy time driver as a `healing_hal::Clock`

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod flash;

pub use clock::EmbassyClock;
pub use flash::{open_eeprom, Eeprom, EEPROM_SIZE};

// Re-export shared traits from healing-hal for convenience
pub use healing_hal::{ByteStorage, Clock, StorageError};
