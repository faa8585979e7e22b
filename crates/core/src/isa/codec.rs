//! Operand Codec.
//!
//! This module converts between 32-bit encodings and decoded operand vectors. It extracts
//! register indices, sign-extends 16-bit immediates and branch offsets, and takes 26-bit jump
//! targets as unsigned absolute values. Both directions are pure functions.

use thiserror::Error;

use super::descriptor::InstructionDescriptor;
use super::format::Format;
use super::instruction::{
    IMM16_MASK, InstructionBits, Operands, RD_SHIFT, RS_SHIFT, RT_SHIFT, TARGET_MASK,
};

/// Width of the immediate field sign-extended for I and BRANCH formats.
const IMM_BITS: u32 = 16;

/// Error produced when an operand vector cannot be packed into a descriptor's template.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Operands were built for a different format than the descriptor declares.
    #[error("{mnemonic}: {found} operands cannot be encoded as {expected} format")]
    FormatMismatch {
        /// Mnemonic of the descriptor.
        mnemonic: &'static str,
        /// Format of the descriptor.
        expected: Format,
        /// Format of the operands.
        found: Format,
    },

    /// An operand does not fit its slot or contradicts a fixed field of the template.
    #[error("{mnemonic}: operands {operands:?} are not representable by `{pattern}`")]
    Unrepresentable {
        /// Mnemonic of the descriptor.
        mnemonic: &'static str,
        /// Template that rejected the operands.
        pattern: &'static str,
        /// Operand vector that was rejected.
        operands: Operands,
    },
}

/// Decodes the operand fields of `word` according to `format`.
///
/// # Arguments
///
/// * `word` - The 32-bit encoding.
/// * `format` - Field layout to apply.
///
/// # Returns
///
/// The operand vector: `[rd, rs, rt]` for R, `[rt, rs, imm]` for I, `[rs, rt, offset]` for
/// BRANCH and `[target]` for J.
pub fn decode(word: u32, format: Format) -> Operands {
    match format {
        Format::R => Operands::R {
            rd: word.rd(),
            rs: word.rs(),
            rt: word.rt(),
        },
        Format::I => Operands::I {
            rt: word.rt(),
            rs: word.rs(),
            imm: sign_extend16(word.imm16()),
        },
        Format::Branch => Operands::Branch {
            rs: word.rs(),
            rt: word.rt(),
            offset: sign_extend16(word.imm16()),
        },
        Format::J => Operands::J {
            target: word.target26(),
        },
    }
}

/// Packs `operands` into the slots of `descriptor`'s template.
///
/// Fields are laid out at their standard positions over the template's fixed bits. The
/// result is accepted only if it decodes back to exactly `operands`, so a register index
/// above 31, an immediate outside the slot's range, or a value for a field the template
/// hard-codes differently is rejected.
///
/// # Errors
///
/// Returns [`EncodeError::FormatMismatch`] if the operands are of another format, or
/// [`EncodeError::Unrepresentable`] if they do not survive the round trip.
pub fn encode(descriptor: &InstructionDescriptor, operands: &Operands) -> Result<u32, EncodeError> {
    let format = descriptor.format();
    if operands.format() != format {
        return Err(EncodeError::FormatMismatch {
            mnemonic: descriptor.mnemonic(),
            expected: format,
            found: operands.format(),
        });
    }

    let raw = match *operands {
        Operands::R { rd, rs, rt } => register_fields(rs, rt, rd),
        Operands::I { rt, rs, imm } => register_fields(rs, rt, 0) | (imm as u32 & IMM16_MASK),
        Operands::Branch { rs, rt, offset } => {
            register_fields(rs, rt, 0) | (offset as u32 & IMM16_MASK)
        }
        Operands::J { target } => target & TARGET_MASK,
    };
    let template = descriptor.template();
    let word = template.expected() | (raw & !template.mask());

    if decode(word, format) == *operands {
        Ok(word)
    } else {
        Err(EncodeError::Unrepresentable {
            mnemonic: descriptor.mnemonic(),
            pattern: template.pattern(),
            operands: *operands,
        })
    }
}

/// Places register indices at their standard positions; out-of-range indices spill into
/// neighbouring fields and are caught by the round-trip check.
const fn register_fields(rs: usize, rt: usize, rd: usize) -> u32 {
    (rs as u32) << RS_SHIFT | (rt as u32) << RT_SHIFT | (rd as u32) << RD_SHIFT
}

/// Sign-extends a 16-bit field to 32 bits (shift left then arithmetic shift right by 16).
#[inline]
pub const fn sign_extend16(field: u32) -> i32 {
    ((field << IMM_BITS) as i32) >> IMM_BITS
}
