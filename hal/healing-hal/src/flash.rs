//! EEPROM emulation on NOR flash
//!
//! Flash can only be erased a whole sector at a time, so the window is
//! mirrored in RAM. Updates change the mirror; `commit` erases the sector
//! and writes the mirror back, and only when something changed.

use embedded_storage::nor_flash::NorFlash;

use crate::eeprom::{ByteStorage, StorageError};

/// `N` bytes of EEPROM kept in one flash erase sector
pub struct FlashEeprom<F, const N: usize> {
    flash: F,
    /// Flash offset of the sector
    offset: u32,
    mirror: [u8; N],
    dirty: bool,
}

impl<F: NorFlash, const N: usize> FlashEeprom<F, N> {
    /// Open the window at `offset` and load it into RAM
    ///
    /// `offset` must start an erase sector and `N` must fit in one sector
    /// in whole write units.
    pub fn new(mut flash: F, offset: u32) -> Result<Self, StorageError> {
        let sector = F::ERASE_SIZE as u32;
        if N > F::ERASE_SIZE
            || N % F::WRITE_SIZE != 0
            || N % F::READ_SIZE != 0
            || offset % sector != 0
            || offset as usize + F::ERASE_SIZE > flash.capacity()
        {
            return Err(StorageError::Geometry);
        }

        let mut mirror = [0u8; N];
        flash
            .read(offset, &mut mirror)
            .map_err(|_| StorageError::Read)?;

        Ok(Self {
            flash,
            offset,
            mirror,
            dirty: false,
        })
    }

    /// Check for updates not yet committed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Release the flash driver
    pub fn into_inner(self) -> F {
        self.flash
    }

    fn check_range(&self, offset: usize, len: usize) -> Result<(), StorageError> {
        match offset.checked_add(len) {
            Some(end) if end <= N => Ok(()),
            _ => Err(StorageError::OutOfBounds),
        }
    }
}

impl<F: NorFlash, const N: usize> ByteStorage for FlashEeprom<F, N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        self.check_range(offset, buf.len())?;
        buf.copy_from_slice(&self.mirror[offset..offset + buf.len()]);
        Ok(())
    }

    fn update(&mut self, offset: usize, value: u8) -> Result<bool, StorageError> {
        self.check_range(offset, 1)?;
        if self.mirror[offset] == value {
            return Ok(false);
        }
        self.mirror[offset] = value;
        self.dirty = true;
        Ok(true)
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        if !self.dirty {
            return Ok(());
        }
        let end = self.offset + F::ERASE_SIZE as u32;
        self.flash
            .erase(self.offset, end)
            .map_err(|_| StorageError::Write)?;
        self.flash
            .write(self.offset, &self.mirror)
            .map_err(|_| StorageError::Write)?;
        self.dirty = false;
        Ok(())
    }
}
