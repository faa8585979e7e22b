//! Bit-encoding templates.
//!
//! Every instruction is described by a 32-character pattern such as
//! `"000000 sssss ttttt ddddd 00000 100010"`, read from bit 31 down to bit 0. ASCII
//! whitespace and `_` are separators. `0`/`1` are fixed bits; `s`, `t`, `d` and `i` name the
//! variable slots:
//!
//! * `s` - source-a register (bits 21-25)
//! * `t` - source-b or destination register (bits 16-20)
//! * `d` - R-format destination register (bits 11-15)
//! * `i` - immediate/offset (bits 0-15) or jump target (bits 0-25)
//!
//! Templates are parsed in const context, so a malformed pattern in the catalog is a
//! compile error rather than a runtime failure.

use std::fmt;

use thiserror::Error;

use super::format::Format;
use super::instruction::{IMM16_MASK, RD_SHIFT, REG_MASK, RS_SHIFT, RT_SHIFT, TARGET_MASK};

/// Number of bits described by a template.
pub const TEMPLATE_BITS: u32 = 32;

/// Variable slot of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Source-a register field.
    S,
    /// Source-b or destination register field.
    T,
    /// R-format destination register field.
    D,
    /// Immediate, offset, or jump target field.
    I,
}

impl Slot {
    /// All slots, in template-letter order.
    pub const ALL: [Self; 4] = [Self::S, Self::T, Self::D, Self::I];

    /// The pattern letter naming this slot.
    pub const fn letter(self) -> char {
        match self {
            Self::S => 's',
            Self::T => 't',
            Self::D => 'd',
            Self::I => 'i',
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::S => 0,
            Self::T => 1,
            Self::D => 2,
            Self::I => 3,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Violation of the template layout rules for a given format.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Fixed bits and slots do not cover all 32 bits exactly once.
    #[error("template `{0}` does not partition all 32 bits")]
    NotPartitioned(&'static str),

    /// A slot's bits are not one contiguous run.
    #[error("template `{pattern}`: slot `{slot}` is not contiguous")]
    NonContiguous {
        /// Offending template.
        pattern: &'static str,
        /// Offending slot.
        slot: Slot,
    },

    /// A slot is present but not at the position (or width) the format expects.
    #[error(
        "template `{pattern}`: slot `{slot}` occupies {found:#010x}, expected {expected:#010x}"
    )]
    Misplaced {
        /// Offending template.
        pattern: &'static str,
        /// Offending slot.
        slot: Slot,
        /// Bits the slot occupies.
        found: u32,
        /// Bits the format assigns to the slot.
        expected: u32,
    },

    /// The format has no field for this slot.
    #[error("template `{pattern}`: slot `{slot}` is not allowed in {format} format")]
    UnexpectedSlot {
        /// Offending template.
        pattern: &'static str,
        /// Offending slot.
        slot: Slot,
        /// Format of the descriptor.
        format: Format,
    },
}

/// A parsed 32-bit encoding template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitTemplate {
    pattern: &'static str,
    mask: u32,
    expected: u32,
    slots: [u32; 4],
}

impl BitTemplate {
    /// Parses a pattern string.
    ///
    /// # Panics
    ///
    /// Panics if the pattern contains a character other than `0`, `1`, `s`, `t`, `d`, `i`
    /// or a separator, or does not describe exactly 32 bits. In a `static` initializer this
    /// is reported at compile time.
    pub const fn parse(pattern: &'static str) -> Self {
        let bytes = pattern.as_bytes();
        let mut mask = 0u32;
        let mut expected = 0u32;
        let mut slots = [0u32; 4];
        let mut count = 0u32;
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];
            i += 1;
            if c.is_ascii_whitespace() || c == b'_' {
                continue;
            }
            assert!(
                count < TEMPLATE_BITS,
                "template describes more than 32 bits"
            );
            let bit = 1u32 << (TEMPLATE_BITS - 1 - count);
            count += 1;
            match c {
                b'0' => mask |= bit,
                b'1' => {
                    mask |= bit;
                    expected |= bit;
                }
                b's' => slots[0] |= bit,
                b't' => slots[1] |= bit,
                b'd' => slots[2] |= bit,
                b'i' => slots[3] |= bit,
                _ => panic!("invalid character in template"),
            }
        }
        assert!(
            count == TEMPLATE_BITS,
            "template describes fewer than 32 bits"
        );
        Self {
            pattern,
            mask,
            expected,
            slots,
        }
    }

    /// The source pattern string.
    pub const fn pattern(&self) -> &'static str {
        self.pattern
    }

    /// Mask of the fixed bits.
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// Values of the fixed bits (zero outside [`mask`](Self::mask)).
    pub const fn expected(&self) -> u32 {
        self.expected
    }

    /// Mask of the bits occupied by `slot`; zero when the template has no such slot.
    pub const fn slot_mask(&self, slot: Slot) -> u32 {
        self.slots[slot.index()]
    }

    /// Returns `true` if the template has a `slot` field.
    pub const fn has_slot(&self, slot: Slot) -> bool {
        self.slot_mask(slot) != 0
    }

    /// Returns `true` if every fixed bit of `word` equals the template's; slot bits are
    /// ignored.
    #[inline]
    pub const fn matches(&self, word: u32) -> bool {
        word & self.mask == self.expected
    }

    /// Returns `true` if every word matching `other` also matches `self`.
    pub const fn covers(&self, other: &Self) -> bool {
        self.mask & other.mask == self.mask && other.expected & self.mask == self.expected
    }

    /// Extracts the raw value of `slot` from `word`, or `None` if the slot is absent.
    pub const fn extract(&self, word: u32, slot: Slot) -> Option<u32> {
        let m = self.slot_mask(slot);
        if m == 0 {
            None
        } else {
            Some((word & m) >> m.trailing_zeros())
        }
    }

    /// Checks the template against the field layout of `format`.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the bits are not partitioned exactly once, a slot is
    /// split, a slot sits outside its standard field, or the format has no such field.
    pub fn validate(&self, format: Format) -> Result<(), TemplateError> {
        let pattern = self.pattern;
        let covered = self.slots.iter().fold(self.mask, |acc, m| acc | m);
        let overlapping = self
            .slots
            .iter()
            .enumerate()
            .any(|(n, a)| a & self.mask != 0 || self.slots[n + 1..].iter().any(|b| a & b != 0));
        if covered != u32::MAX || overlapping {
            return Err(TemplateError::NotPartitioned(pattern));
        }

        for slot in Slot::ALL {
            let found = self.slot_mask(slot);
            if found == 0 {
                continue;
            }
            let run = found >> found.trailing_zeros();
            if run & run.wrapping_add(1) != 0 {
                return Err(TemplateError::NonContiguous { pattern, slot });
            }
            let Some(expected) = standard_field(slot, format) else {
                return Err(TemplateError::UnexpectedSlot {
                    pattern,
                    slot,
                    format,
                });
            };
            if found != expected {
                return Err(TemplateError::Misplaced {
                    pattern,
                    slot,
                    found,
                    expected,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for BitTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern)
    }
}

/// Bits a slot must occupy under `format`, or `None` if the format has no such field.
const fn standard_field(slot: Slot, format: Format) -> Option<u32> {
    match (slot, format) {
        (Slot::S, Format::R | Format::I | Format::Branch) => Some(REG_MASK << RS_SHIFT),
        (Slot::T, Format::R | Format::I | Format::Branch) => Some(REG_MASK << RT_SHIFT),
        (Slot::D, Format::R) => Some(REG_MASK << RD_SHIFT),
        (Slot::I, Format::I | Format::Branch) => Some(IMM16_MASK),
        (Slot::I, Format::J) => Some(TARGET_MASK),
        _ => None,
    }
}
