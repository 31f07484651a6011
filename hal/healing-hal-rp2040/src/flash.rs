//! Flash-backed EEPROM for RP2040
//!
//! The calibration constants and board id live in the last 4KB erase
//! sector of the 2MB QSPI flash, mirrored in RAM by
//! `healing_hal::FlashEeprom`.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use healing_hal::{FlashEeprom, StorageError};

/// Flash size on the Raspberry Pi Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Offset of the EEPROM sector
pub const EEPROM_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// Emulated EEPROM bytes (one flash page)
pub const EEPROM_SIZE: usize = 256;

/// Blocking flash driver over the whole chip
pub type Rp2040Flash<'d> = Flash<'d, FLASH, Blocking, FLASH_SIZE>;

/// EEPROM emulation used by the firmware
pub type Eeprom<'d> = FlashEeprom<Rp2040Flash<'d>, EEPROM_SIZE>;

/// Open the EEPROM sector and load it into RAM
pub fn open_eeprom<'d>(flash: Peri<'d, FLASH>) -> Result<Eeprom<'d>, StorageError> {
    let flash = Flash::new_blocking(flash);
    FlashEeprom::new(flash, EEPROM_OFFSET)
}
