//! Word-addressed data segment.
//!
//! Backing store for the reference machine's data memory: a contiguous run of 32-bit words
//! starting at a configurable byte address.

use crate::common::constants::{WORD_ALIGN_MASK, WORD_BYTES};
use crate::common::error::MemoryError;

/// A contiguous block of words mapped at `base`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    base: u32,
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates a zero-filled segment.
    ///
    /// # Arguments
    ///
    /// * `base` - Byte address of the first word.
    /// * `size` - Size in bytes; a trailing partial word is dropped.
    pub fn new(base: u32, size: u32) -> Self {
        Self {
            base,
            words: vec![0; (size / WORD_BYTES) as usize],
        }
    }

    /// Byte address of the first word.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Size of the segment in bytes.
    pub const fn size(&self) -> u32 {
        self.words.len() as u32 * WORD_BYTES
    }

    /// Maps a byte address to a word slot.
    fn slot(&self, addr: u32) -> Result<usize, MemoryError> {
        if addr & WORD_ALIGN_MASK != 0 {
            return Err(MemoryError::Unaligned(addr));
        }
        let offset = addr.checked_sub(self.base).ok_or(MemoryError::OutOfRange(addr))?;
        let idx = (offset / WORD_BYTES) as usize;
        if idx < self.words.len() {
            Ok(idx)
        } else {
            Err(MemoryError::OutOfRange(addr))
        }
    }

    /// Reads the word at `addr`.
    ///
    /// # Errors
    ///
    /// [`MemoryError::Unaligned`] for a misaligned address, [`MemoryError::OutOfRange`] for
    /// an address outside the segment.
    pub fn read(&self, addr: u32) -> Result<i32, MemoryError> {
        self.slot(addr).map(|idx| self.words[idx])
    }

    /// Writes the word at `addr`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`read`](Self::read); nothing is written on error.
    pub fn write(&mut self, addr: u32, val: i32) -> Result<(), MemoryError> {
        let idx = self.slot(addr)?;
        self.words[idx] = val;
        Ok(())
    }
}
