//! Healing Time Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the control logic
//! is written against. Chip-specific crates (RP2040 today) implement them,
//! and host tests use the in-memory implementations provided here.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (healing-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  healing-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ healing-hal-  │       │ MemoryEeprom  │
//! │    rp2040     │       │ (host / sim)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`eeprom::ByteStorage`] - Byte-addressable durable storage
//! - [`clock::Clock`] - Monotonic microsecond time source
//!
//! [`flash::FlashEeprom`] adapts any `embedded-storage` NOR flash into a
//! [`ByteStorage`] by mirroring one erase sector in RAM.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod eeprom;
pub mod flash;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use eeprom::{ByteStorage, MemoryEeprom, StorageError};
pub use flash::FlashEeprom;
