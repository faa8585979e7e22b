//! Register names.
//!
//! Maps symbolic register names to indices. The extension's themed aliases (characters and
//! locations of Mystic Falls) are consulted first; anything else falls back to the host's
//! canonical resolver. [`MipsNames`] provides the standard MIPS table for hosts without one.
//!
//! Resolution is case-sensitive.

use crate::common::constants::NUM_REGS;
use crate::common::error::Fault;
use crate::host::CanonicalNames;

/// Register `$0` (zero register, always zero).
pub const REG_ZERO: usize = 0;
/// Register `$8` (`$Elena`).
pub const REG_ELENA: usize = 8;
/// Register `$9` (`$Stefan`).
pub const REG_STEFAN: usize = 9;
/// Register `$10` (`$Damon`).
pub const REG_DAMON: usize = 10;

/// Custom aliases, in lookup order. `$zero` precedes `$cure` so reverse lookups of index 0
/// yield the canonical name.
pub const ALIASES: [(&str, usize); 22] = [
    ("$zero", REG_ZERO),
    ("$cure", REG_ZERO),
    ("$Elena", REG_ELENA),
    ("$Stefan", REG_STEFAN),
    ("$Damon", REG_DAMON),
    ("$Bonnie", 11),
    ("$Elijah", 12),
    ("$Caroline", 13),
    ("$Tyler", 14),
    ("$Klaus", 15),
    ("$Katherine", 16),
    ("$Jeremy", 17),
    ("$Salvatore_House", 18),
    ("$Mystic_Grill", 19),
    ("$Woods", 20),
    ("$The_Gilbert_House", 21),
    ("$The_Mikaelson_House", 22),
    ("$Lockwood_Mansion", 23),
    ("$Mystic_Falls_Town_Square", 24),
    ("$Mystic_Falls_High_School", 25),
    ("$Whitmore_College", 26),
    ("$Wickery_Bridge", 27),
];

/// Standard MIPS register names for `$0`-`$31`.
pub const MIPS_NAMES: [&str; NUM_REGS] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3", "$t0", "$t1", "$t2", "$t3", "$t4",
    "$t5", "$t6", "$t7", "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7", "$t8", "$t9",
    "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];

/// Canonical MIPS name table: `$zero`, `$at`, ..., `$ra` and numeric `$0`-`$31`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MipsNames;

impl CanonicalNames for MipsNames {
    fn register_number(&self, name: &str) -> Option<usize> {
        if let Some(idx) = MIPS_NAMES.iter().position(|&n| n == name) {
            return Some(idx);
        }
        let digits = name.strip_prefix('$')?;
        // Reject "+5", "05" and other spellings `parse` would accept.
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || (digits.len() > 1 && digits.starts_with('0'))
        {
            return None;
        }
        digits.parse::<usize>().ok().filter(|&idx| idx < NUM_REGS)
    }
}

/// Looks `name` up in the custom alias table only.
pub fn alias(name: &str) -> Option<usize> {
    ALIASES
        .iter()
        .find(|&&(n, _)| n == name)
        .map(|&(_, idx)| idx)
}

/// Resolves a register name: custom aliases first, then `canonical`.
///
/// # Arguments
///
/// * `name` - Register name including the `$` sigil.
/// * `canonical` - The host's own name table.
///
/// # Errors
///
/// Returns [`Fault::UnknownRegister`] if neither table knows `name` or the canonical table
/// answers with an index outside 0-31.
pub fn resolve(name: &str, canonical: &dyn CanonicalNames) -> Result<usize, Fault> {
    alias(name)
        .or_else(|| canonical.register_number(name))
        .filter(|&idx| idx < NUM_REGS)
        .ok_or_else(|| Fault::UnknownRegister(name.to_owned()))
}

/// Display name of register `idx`: its first custom alias, else its MIPS name.
pub fn display_name(idx: usize) -> &'static str {
    ALIASES
        .iter()
        .find(|&&(_, i)| i == idx)
        .map(|&(name, _)| name)
        .or_else(|| MIPS_NAMES.get(idx).copied())
        .unwrap_or("$??")
}
