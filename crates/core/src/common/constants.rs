//! Constants shared across the extension.
//!
//! Status flags are not a separate register: they are bit positions inside the same 32-bit
//! general-purpose register word used for arithmetic. Every flag update must be a
//! read-modify-write with bitwise OR.

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 32;

/// Index of the hardwired zero register.
pub const REG_ZERO: usize = 0;

/// Width of a memory word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Mask of the low address bits that must be clear for a word access.
pub const WORD_ALIGN_MASK: u32 = WORD_BYTES - 1;

/// Bit 0: the character wears a daylight ring.
pub const DAYLIGHT_IMMUNE: i32 = 1 << 0;

/// Bit 1: the character carries vervain and cannot be compelled.
pub const COMPULSION_IMMUNE: i32 = 1 << 1;

/// Bit 2: the character is under compulsion.
pub const COMPELLED: i32 = 1 << 2;

/// Bit 8: the character has been killed.
pub const TERMINATED: i32 = 1 << 8;

/// Multiplier applied by the `hybrid` instruction.
pub const HYBRID_FACTOR: i32 = 100;
