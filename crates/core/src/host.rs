//! Host collaborator traits.
//!
//! The extension owns no machine state. Every semantics function receives a `&mut dyn Host`
//! and performs all of its effects through these traits. It provides:
//! 1. **Registers:** `RegisterAccess` for the 32 general-purpose registers.
//! 2. **Memory:** `MemoryAccess` for word reads and writes at byte addresses.
//! 3. **Flow Control:** `ControlTransfer` to request the next fetch location.
//! 4. **Output:** `Diagnostics` for announcement lines.
//! 5. **Names:** `CanonicalNames` for the host's own register-name table.
//!
//! The host must serialize dispatch calls against one register file and memory; the extension
//! assumes exclusive access for the duration of one call and does no locking.

use crate::common::error::MemoryError;

/// Read/write access to the general-purpose registers.
///
/// Indices are validated to 0-31 by the codec before they reach the host.
pub trait RegisterAccess {
    /// Returns the value of register `idx`.
    fn get(&self, idx: usize) -> i32;
    /// Writes `val` to register `idx`.
    fn set(&mut self, idx: usize, val: i32);
}

/// Word access to host memory at byte addresses.
///
/// Alignment is checked by the semantics functions before either method is called.
pub trait MemoryAccess {
    /// Reads the word at `addr`.
    ///
    /// # Errors
    ///
    /// Returns a [`MemoryError`] if the host cannot serve the read.
    fn read_word(&mut self, addr: u32) -> Result<i32, MemoryError>;

    /// Writes `val` to the word at `addr`.
    ///
    /// # Errors
    ///
    /// Returns a [`MemoryError`] if the host cannot perform the write.
    fn write_word(&mut self, addr: u32, val: i32) -> Result<(), MemoryError>;
}

/// Requests to redirect the next instruction fetch.
///
/// Both requests are advisory: the extension never touches a program counter itself.
pub trait ControlTransfer {
    /// Requests a PC-relative branch by `offset` words, as decoded from a BRANCH encoding.
    fn branch_to(&mut self, offset: i32);
    /// Requests a jump to the 26-bit absolute word `target` of a J encoding.
    fn jump_to(&mut self, target: u32);
}

/// Best-effort, unbuffered text output.
pub trait Diagnostics {
    /// Emits one line of text (without a trailing newline).
    fn emit(&mut self, line: &str);
}

/// The host simulator's canonical register-name table.
pub trait CanonicalNames {
    /// Returns the index of `name`, or `None` if the host does not know it.
    fn register_number(&self, name: &str) -> Option<usize>;
}

/// Everything a semantics function may touch.
///
/// Implemented automatically for every type providing the four collaborator traits.
pub trait Host: RegisterAccess + MemoryAccess + ControlTransfer + Diagnostics {}

impl<T: RegisterAccess + MemoryAccess + ControlTransfer + Diagnostics + ?Sized> Host for T {}
