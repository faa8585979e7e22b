//! General-Purpose Register File.
//!
//! This module implements the 32-entry register file used by the reference host. It performs
//! the following:
//! 1. **Storage:** Maintains 32 signed 32-bit registers (`$0`-`$31`).
//! 2. **Invariant Enforcement:** Ensures that register `$zero` is hardwired to zero.
//! 3. **Debugging:** Provides utilities for dumping the register state.

use super::constants::{NUM_REGS, REG_ZERO};

/// General-purpose register file.
///
/// Register `$zero` is hardwired to zero and cannot be modified. Flag bits are stored inside
/// the same words as ordinary values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [i32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    ///
    /// # Returns
    ///
    /// A new `RegisterFile` instance with all registers set to 0.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The value stored in the register. Register `$zero` always returns 0.
    pub const fn read(&self, idx: usize) -> i32 {
        if idx == REG_ZERO { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `$zero` are ignored.
    /// * `val` - The value to write.
    pub const fn write(&mut self, idx: usize, val: i32) {
        if idx != REG_ZERO {
            self.regs[idx] = val;
        }
    }

    /// Iterates over `(index, value)` pairs for every register holding a non-zero value.
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.regs
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, val)| val != 0)
    }

    /// Dumps the contents of all registers to stdout.
    ///
    /// Displays registers in pairs with hexadecimal formatting for debugging purposes.
    pub fn dump(&self) {
        for i in (0..NUM_REGS).step_by(2) {
            println!(
                "${:<2}={:#010x} ${:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}
