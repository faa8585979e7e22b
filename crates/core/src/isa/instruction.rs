//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions for the classic MIPS field layout and the decoded
//! operand vector handed to semantics functions.
//!
//! ```text
//!  31    26 25   21 20   16 15   11 10    6 5     0
//! | opcode |  rs   |  rt   |  rd   | shamt | funct |   R
//! | opcode |  rs   |  rt   |       imm16           |   I / BRANCH
//! | opcode |            target26                   |   J
//! ```

use super::format::Format;

/// Bit shift of the opcode field (bits 26-31).
pub const OPCODE_SHIFT: u32 = 26;
/// Bit mask for the opcode field after shifting.
pub const OPCODE_MASK: u32 = 0x3F;
/// Bit shift of the `rs` field (bits 21-25).
pub const RS_SHIFT: u32 = 21;
/// Bit shift of the `rt` field (bits 16-20).
pub const RT_SHIFT: u32 = 16;
/// Bit shift of the `rd` field (bits 11-15).
pub const RD_SHIFT: u32 = 11;
/// Bit shift of the shift-amount field (bits 6-10).
pub const SHAMT_SHIFT: u32 = 6;
/// Bit mask for any 5-bit register field after shifting.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the function field (bits 0-5).
pub const FUNCT_MASK: u32 = 0x3F;
/// Bit mask for the 16-bit immediate field (bits 0-15).
pub const IMM16_MASK: u32 = 0xFFFF;
/// Bit mask for the 26-bit jump target field (bits 0-25).
pub const TARGET_MASK: u32 = 0x03FF_FFFF;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 26-31).
    fn opcode(&self) -> u32;
    /// Extracts the first source register field (bits 21-25).
    fn rs(&self) -> usize;
    /// Extracts the second source / immediate destination field (bits 16-20).
    fn rt(&self) -> usize;
    /// Extracts the R-format destination register field (bits 11-15).
    fn rd(&self) -> usize;
    /// Extracts the shift-amount field (bits 6-10).
    fn shamt(&self) -> u32;
    /// Extracts the function field (bits 0-5).
    fn funct(&self) -> u32;
    /// Extracts the raw, unextended 16-bit immediate (bits 0-15).
    fn imm16(&self) -> u32;
    /// Extracts the 26-bit jump target (bits 0-25).
    fn target26(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> RS_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> RT_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn shamt(&self) -> u32 {
        (self >> SHAMT_SHIFT) & REG_MASK
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & FUNCT_MASK
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        self & IMM16_MASK
    }

    #[inline(always)]
    fn target26(&self) -> u32 {
        self & TARGET_MASK
    }
}

/// Decoded operand vector.
///
/// The variant is fixed by the format of the encoding; field order matches the ordered
/// operand sequence of each format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operands {
    /// `[dest, src-a, src-b]`.
    R {
        /// Destination register.
        rd: usize,
        /// First source register.
        rs: usize,
        /// Second source register.
        rt: usize,
    },
    /// `[dest/src, base, imm]`.
    I {
        /// Destination (or stored source) register.
        rt: usize,
        /// Base / secondary register.
        rs: usize,
        /// Sign-extended immediate.
        imm: i32,
    },
    /// `[src-a, src-b, offset]`.
    Branch {
        /// First compared register.
        rs: usize,
        /// Second compared register.
        rt: usize,
        /// Sign-extended word offset.
        offset: i32,
    },
    /// `[target]`.
    J {
        /// Unsigned 26-bit absolute word target.
        target: u32,
    },
}

impl Operands {
    /// Returns the format this operand vector was decoded for.
    pub const fn format(&self) -> Format {
        match self {
            Self::R { .. } => Format::R,
            Self::I { .. } => Format::I,
            Self::Branch { .. } => Format::Branch,
            Self::J { .. } => Format::J,
        }
    }

    /// Returns the operands as an ordered integer sequence.
    pub fn to_vec(&self) -> Vec<i32> {
        match *self {
            Self::R { rd, rs, rt } => vec![rd as i32, rs as i32, rt as i32],
            Self::I { rt, rs, imm } => vec![rt as i32, rs as i32, imm],
            Self::Branch { rs, rt, offset } => vec![rs as i32, rt as i32, offset],
            Self::J { target } => vec![target as i32],
        }
    }
}
