//! Durable storage layout
//!
//! The board id and every stepper's calibration constants share one
//! storage space. Offsets are derived from the stepper id so that stored
//! data stays put across firmware updates:
//!
//! ```text
//! offset  0      1 .. 7      8 .. 11     12 .. 15    16 .. 19    20 .. 23
//!       ┌──────┬─────────┬───────────┬───────────┬───────────┬───────────┐
//!       │ board│ (free)  │ full spin │ home off. │ full spin │ home off. │
//!       │  id  │         │ stepper 1 │ stepper 1 │ stepper 2 │ stepper 2 │
//!       └──────┴─────────┴───────────┴───────────┴───────────┴───────────┘
//! ```
//!
//! Derived slots are checked rather than trusted: a stepper id whose
//! block would collide with the board id or run past the end of storage
//! is rejected.

use heapless::Vec;

/// Encoded size of one calibration constant (`i32`)
pub const CONSTANT_SIZE: usize = 4;

/// Bytes reserved per stepper id
pub const STEPPER_BLOCK_SIZE: usize = 2 * CONSTANT_SIZE;

/// Storage used by the board id
pub const BOARD_ID_SLOT: Slot = Slot::new(0, 1);

/// Most slots [`check_layout`] can verify at once
pub const MAX_LAYOUT_SLOTS: usize = 16;

/// Layout errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Two slots share storage bytes
    Overlap,
    /// A slot extends past the end of storage
    OutOfCapacity,
    /// More slots than can be checked
    TooManySlots,
}

/// A contiguous byte range in durable storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot {
    /// First byte
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
}

impl Slot {
    /// Create a slot
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// One past the last byte
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Check if two slots share any byte
    pub const fn overlaps(&self, other: &Slot) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }

    /// Check if the slot fits in storage of the given capacity
    pub const fn fits(&self, capacity: usize) -> bool {
        self.end() <= capacity
    }
}

/// Storage slots of one stepper's calibration constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperSlots {
    /// Full spin length
    pub full_spin: Slot,
    /// Home offset
    pub home_offset: Slot,
}

impl StepperSlots {
    /// Derive and check the slots for a stepper id
    pub fn for_stepper(id: u8, capacity: usize) -> Result<Self, LayoutError> {
        let base = id as usize * STEPPER_BLOCK_SIZE;
        let slots = Self {
            full_spin: Slot::new(base, CONSTANT_SIZE),
            home_offset: Slot::new(base + CONSTANT_SIZE, CONSTANT_SIZE),
        };

        for slot in slots.slots() {
            if !slot.fits(capacity) {
                return Err(LayoutError::OutOfCapacity);
            }
            if slot.overlaps(&BOARD_ID_SLOT) {
                return Err(LayoutError::Overlap);
            }
        }
        if slots.full_spin.overlaps(&slots.home_offset) {
            return Err(LayoutError::Overlap);
        }

        Ok(slots)
    }

    /// Both slots
    pub fn slots(&self) -> [Slot; 2] {
        [self.full_spin, self.home_offset]
    }
}

/// Check the complete layout for a set of stepper ids
///
/// Verifies that the board id and every stepper's slots fit in storage
/// and are pairwise disjoint. Duplicate ids count as overlap.
pub fn check_layout(stepper_ids: &[u8], capacity: usize) -> Result<(), LayoutError> {
    let mut slots: Vec<Slot, MAX_LAYOUT_SLOTS> = Vec::new();
    slots
        .push(BOARD_ID_SLOT)
        .map_err(|_| LayoutError::TooManySlots)?;

    for &id in stepper_ids {
        let stepper = StepperSlots::for_stepper(id, capacity)?;
        for slot in stepper.slots() {
            slots.push(slot).map_err(|_| LayoutError::TooManySlots)?;
        }
    }

    if !BOARD_ID_SLOT.fits(capacity) {
        return Err(LayoutError::OutOfCapacity);
    }

    for (i, a) in slots.iter().enumerate() {
        if slots[i + 1..].iter().any(|b| a.overlaps(b)) {
            return Err(LayoutError::Overlap);
        }
    }
    Ok(())
}
