//! Instruction format classes.
//!
//! The format of a descriptor fixes the field layout of its encoding and the length and
//! meaning of the operand vector handed to its semantics function.

use std::fmt;

/// Field-layout class of an encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Register-only: `rd`, `rs`, `rt` as 5-bit fields.
    R,
    /// Immediate: `rt`, `rs` and a sign-extended 16-bit immediate.
    I,
    /// Jump: unsigned 26-bit absolute word target.
    J,
    /// Conditional branch: `rs`, `rt` and a sign-extended 16-bit word offset.
    Branch,
}

impl Format {
    /// Width in bits of the `i` slot for this format, or `None` when the format has none.
    pub const fn immediate_width(self) -> Option<u32> {
        match self {
            Self::R => None,
            Self::I | Self::Branch => Some(16),
            Self::J => Some(26),
        }
    }

    /// Number of operands the codec produces for this format.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::R | Self::I | Self::Branch => 3,
            Self::J => 1,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::R => "R",
            Self::I => "I",
            Self::J => "J",
            Self::Branch => "BRANCH",
        };
        f.write_str(name)
    }
}
