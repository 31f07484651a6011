//! Durable byte storage abstractions
//!
//! Models an EEPROM-style store: byte addressable, every byte individually
//! rewritable, and subject to wear. Writers go through [`ByteStorage::update`],
//! which leaves bytes that already hold the requested value untouched.

use core::cell::RefCell;

/// Value of a byte that has never been written
pub const ERASED_BYTE: u8 = 0xFF;

/// Errors from durable storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Address range extends past the end of the storage
    OutOfBounds,
    /// The backing medium rejected a read
    Read,
    /// The backing medium rejected a write or erase
    Write,
    /// The storage window does not match the medium's geometry
    Geometry,
}

/// Byte-addressable durable storage
///
/// Implementations may buffer updates; [`ByteStorage::commit`] makes every
/// update issued so far durable. Stores that write through can rely on the
/// default no-op `commit`.
pub trait ByteStorage {
    /// Total number of addressable bytes
    fn capacity(&self) -> usize;

    /// Read `buf.len()` bytes starting at `offset`
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Store `value` at `offset` unless the byte already holds it
    ///
    /// # Returns
    /// `true` if the medium was written, `false` if the byte already matched.
    fn update(&mut self, offset: usize, value: u8) -> Result<bool, StorageError>;

    /// Flush buffered updates to the medium
    fn commit(&mut self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Read a single byte
    fn read_byte(&mut self, offset: usize) -> Result<u8, StorageError> {
        let mut buf = [0u8; 1];
        self.read(offset, &mut buf)?;
        Ok(buf[0])
    }
}

impl<S: ByteStorage + ?Sized> ByteStorage for &mut S {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        (**self).read(offset, buf)
    }

    fn update(&mut self, offset: usize, value: u8) -> Result<bool, StorageError> {
        (**self).update(offset, value)
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        (**self).commit()
    }
}

/// Shared handle, so several owners in one single-threaded loop can use
/// the same store. Each call holds the borrow only for its own duration.
impl<S: ByteStorage> ByteStorage for &RefCell<S> {
    fn capacity(&self) -> usize {
        self.borrow().capacity()
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        self.borrow_mut().read(offset, buf)
    }

    fn update(&mut self, offset: usize, value: u8) -> Result<bool, StorageError> {
        self.borrow_mut().update(offset, value)
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        self.borrow_mut().commit()
    }
}

/// In-memory storage of `N` bytes
///
/// Starts fully erased. Counts the bytes actually written so callers can
/// check how much wear an operation caused.
#[derive(Debug, Clone)]
pub struct MemoryEeprom<const N: usize> {
    bytes: [u8; N],
    writes: usize,
}

impl<const N: usize> Default for MemoryEeprom<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MemoryEeprom<N> {
    /// Create an erased store
    pub const fn new() -> Self {
        Self {
            bytes: [ERASED_BYTE; N],
            writes: 0,
        }
    }

    /// Create a store holding the given image
    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self { bytes, writes: 0 }
    }

    /// Raw contents
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Number of bytes written since creation
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn check_range(offset: usize, len: usize) -> Result<(), StorageError> {
        match offset.checked_add(len) {
            Some(end) if end <= N => Ok(()),
            _ => Err(StorageError::OutOfBounds),
        }
    }
}

impl<const N: usize> ByteStorage for MemoryEeprom<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        Self::check_range(offset, buf.len())?;
        buf.copy_from_slice(&self.bytes[offset..offset + buf.len()]);
        Ok(())
    }

    fn update(&mut self, offset: usize, value: u8) -> Result<bool, StorageError> {
        Self::check_range(offset, 1)?;
        if self.bytes[offset] == value {
            return Ok(false);
        }
        self.bytes[offset] = value;
        self.writes += 1;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_erased() {
        let mut store = MemoryEeprom::<16>::new();
        let mut buf = [0u8; 16];
        store.read(0, &mut buf).unwrap();
        assert!(buf.iter().all(|&b| b == ERASED_BYTE));
        assert_eq!(store.capacity(), 16);
    }

    #[test]
    fn test_update_skips_matching_bytes() {
        let mut store = MemoryEeprom::<8>::new();

        assert_eq!(store.update(3, 0x42), Ok(true));
        assert_eq!(store.update(3, 0x42), Ok(false));
        assert_eq!(store.writes(), 1);
        assert_eq!(store.read_byte(3), Ok(0x42));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut store = MemoryEeprom::<8>::new();
        let mut buf = [0u8; 4];

        assert_eq!(store.read(6, &mut buf), Err(StorageError::OutOfBounds));
        assert_eq!(store.update(8, 0), Err(StorageError::OutOfBounds));
        assert_eq!(store.read(usize::MAX, &mut buf), Err(StorageError::OutOfBounds));
        assert!(store.read(4, &mut buf).is_ok());
    }

    #[test]
    fn test_shared_handle() {
        let cell = RefCell::new(MemoryEeprom::<8>::new());
        let mut a = &cell;
        let mut b = &cell;

        a.update(0, 1).unwrap();
        b.update(1, 2).unwrap();
        a.commit().unwrap();

        assert_eq!(b.read_byte(0), Ok(1));
        assert_eq!(cell.borrow().writes(), 2);
    }
}
