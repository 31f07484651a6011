//! Durable settings
//!
//! A [`DurableSetting`] is a bounded value with a fixed home in durable
//! storage. It is loaded once at construction, changed in RAM with
//! [`DurableSetting::set`] and persisted explicitly with
//! [`DurableSetting::save`], which only rewrites bytes that changed.

use healing_hal::{ByteStorage, StorageError};

use crate::config::SettingRange;

/// Largest supported encoded value size in bytes
pub const MAX_SETTING_SIZE: usize = 8;

/// A value type with a fixed-size little-endian encoding
pub trait Persist: Copy + PartialOrd {
    /// Encoded size in bytes (at most [`MAX_SETTING_SIZE`])
    const SIZE: usize;

    /// Encode into the first `SIZE` bytes of `out`
    fn write_le(self, out: &mut [u8]);

    /// Decode from the first `SIZE` bytes of `bytes`
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_persist {
    ($($t:ty),* $(,)?) => {
        $(
            impl Persist for $t {
                const SIZE: usize = core::mem::size_of::<$t>();

                fn write_le(self, out: &mut [u8]) {
                    out[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
                }

                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$t>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$t>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_persist!(u8, i8, u16, i16, u32, i32);

/// Bounded value persisted at a fixed storage offset
///
/// The cached value always lies within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurableSetting<T> {
    offset: usize,
    range: SettingRange<T>,
    value: T,
}

impl<T: Persist> DurableSetting<T> {
    /// Create a setting and load its value from storage
    pub fn new<S: ByteStorage>(storage: &mut S, offset: usize, range: SettingRange<T>) -> Self {
        debug_assert!(T::SIZE <= MAX_SETTING_SIZE);
        debug_assert!(range.is_valid());

        let mut setting = Self {
            offset,
            range,
            value: range.default,
        };
        setting.load(storage);
        setting
    }

    /// Reload the value from storage
    ///
    /// Out-of-range contents and failed reads yield the default.
    pub fn load<S: ByteStorage>(&mut self, storage: &mut S) -> T {
        let mut raw = [0u8; MAX_SETTING_SIZE];
        self.value = match storage.read(self.offset, &mut raw[..T::SIZE]) {
            Ok(()) => {
                let stored = T::read_le(&raw);
                if self.range.contains(stored) {
                    stored
                } else {
                    debug!("Setting @{}: stored value out of range, using default", self.offset);
                    self.range.default
                }
            }
            Err(e) => {
                warn!("Setting @{}: read failed ({:?}), using default", self.offset, e);
                self.range.default
            }
        };
        self.value
    }

    /// Current in-RAM value
    pub fn get(&self) -> T {
        self.value
    }

    /// Change the in-RAM value
    ///
    /// Values outside `[min, max]` are rejected and leave the setting
    /// unchanged. Does not persist; call [`DurableSetting::save`].
    ///
    /// # Returns
    /// `true` if the value was accepted
    #[must_use]
    pub fn set(&mut self, value: T) -> bool {
        if self.range.contains(value) {
            self.value = value;
            true
        } else {
            false
        }
    }

    /// Persist the in-RAM value
    ///
    /// Bytes already holding the right value are not rewritten, to spare
    /// the storage from wear.
    ///
    /// # Returns
    /// The number of bytes actually written
    pub fn save<S: ByteStorage>(&self, storage: &mut S) -> Result<usize, StorageError> {
        let mut raw = [0u8; MAX_SETTING_SIZE];
        self.value.write_le(&mut raw);

        let mut written = 0;
        for (i, &byte) in raw[..T::SIZE].iter().enumerate() {
            if storage.update(self.offset + i, byte)? {
                written += 1;
            }
        }
        storage.commit()?;

        debug!("Setting @{}: saved, {} of {} bytes written", self.offset, written, T::SIZE);
        Ok(written)
    }
}
