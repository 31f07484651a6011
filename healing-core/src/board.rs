//! Board identity
//!
//! Each board on the shared serial line has a persisted id (`0`-`9`) that
//! commands are filtered by.

use healing_hal::{ByteStorage, StorageError};
use healing_protocol::MAX_BOARD_ID;

use crate::config::SettingRange;
use crate::layout::BOARD_ID_SLOT;
use crate::setting::DurableSetting;

/// Bounds of the board id
pub const BOARD_ID_RANGE: SettingRange<u8> = SettingRange::new(0, MAX_BOARD_ID, 0);

/// Persisted board id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardId {
    setting: DurableSetting<u8>,
}

impl BoardId {
    /// Load the board id from storage (`0` when unset or invalid)
    pub fn load<S: ByteStorage>(storage: &mut S) -> Self {
        Self {
            setting: DurableSetting::new(storage, BOARD_ID_SLOT.offset, BOARD_ID_RANGE),
        }
    }

    /// Current id
    pub fn get(&self) -> u8 {
        self.setting.get()
    }

    /// Change and persist the id
    ///
    /// Ids above [`MAX_BOARD_ID`] are rejected and leave the id unchanged.
    ///
    /// # Returns
    /// `Ok(true)` if the id was accepted and saved
    pub fn assign<S: ByteStorage>(&mut self, storage: &mut S, id: u8) -> Result<bool, StorageError> {
        if !self.setting.set(id) {
            warn!("Board id {} out of range, keeping {}", id, self.get());
            return Ok(false);
        }
        self.setting.save(storage)?;
        info!("Board id set to {}", id);
        Ok(true)
    }
}
