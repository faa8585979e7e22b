//! Execution semantics of the Mystic Falls instructions.
//!
//! Each function implements one catalog entry. All state lives in the host: registers,
//! memory, control transfers and announcements go through the [`Host`] traits. The functions
//! are deterministic and total except for the faults they explicitly raise.
//!
//! Status flags share the register word with the character's power value, so every flag
//! update is a read-modify-write OR against that word.

use tracing::debug;

use crate::common::constants::{
    COMPELLED, COMPULSION_IMMUNE, DAYLIGHT_IMMUNE, HYBRID_FACTOR, TERMINATED, WORD_ALIGN_MASK,
};
use crate::common::error::Fault;
use crate::host::Host;
use crate::isa::format::Format;
use crate::isa::instruction::Operands;

const fn mismatch(mnemonic: &'static str, expected: Format, ops: &Operands) -> Fault {
    Fault::OperandMismatch {
        mnemonic,
        expected,
        found: ops.format(),
    }
}

/// Unpacks `[rd, rs, rt]`.
const fn r_type(mnemonic: &'static str, ops: &Operands) -> Result<(usize, usize, usize), Fault> {
    match *ops {
        Operands::R { rd, rs, rt } => Ok((rd, rs, rt)),
        _ => Err(mismatch(mnemonic, Format::R, ops)),
    }
}

/// Unpacks `[rt, rs, imm]`.
const fn i_type(mnemonic: &'static str, ops: &Operands) -> Result<(usize, usize, i32), Fault> {
    match *ops {
        Operands::I { rt, rs, imm } => Ok((rt, rs, imm)),
        _ => Err(mismatch(mnemonic, Format::I, ops)),
    }
}

/// Unpacks `[rs, rt, offset]`.
const fn branch_type(mnemonic: &'static str, ops: &Operands) -> Result<(usize, usize, i32), Fault> {
    match *ops {
        Operands::Branch { rs, rt, offset } => Ok((rs, rt, offset)),
        _ => Err(mismatch(mnemonic, Format::Branch, ops)),
    }
}

/// Computes `base + offset` and checks word alignment.
fn word_address(
    mnemonic: &'static str,
    host: &dyn Host,
    base: usize,
    offset: i32,
) -> Result<u32, Fault> {
    let addr = host.get(base).wrapping_add(offset) as u32;
    if addr & WORD_ALIGN_MASK != 0 {
        debug!(
            mnemonic,
            addr = format_args!("{addr:#010x}"),
            "misaligned word access"
        );
        return Err(Fault::Misaligned { mnemonic, addr });
    }
    Ok(addr)
}

/// `summon $t, imm`: loads the sign-extended immediate into `$t`.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an I-format vector.
pub fn summon(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rt, _, imm) = i_type("summon", ops)?;
    host.set(rt, imm);
    Ok(())
}

/// `drain $d, $s, $t`: `$d := $s - $t` with 32-bit wraparound.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an R-format vector.
pub fn drain(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rd, rs, rt) = r_type("drain", ops)?;
    host.set(rd, host.get(rs).wrapping_sub(host.get(rt)));
    Ok(())
}

/// `feed $d, $s, $t`: `$d := $s + $t` with 32-bit wraparound.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an R-format vector.
pub fn feed(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rd, rs, rt) = r_type("feed", ops)?;
    host.set(rd, host.get(rs).wrapping_add(host.get(rt)));
    Ok(())
}

/// `older $d, $s, $t`: low 32 bits of the 64-bit product `$s * $t`.
///
/// Overflow truncates; it never faults.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an R-format vector.
pub fn older(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rd, rs, rt) = r_type("older", ops)?;
    let product = i64::from(host.get(rs)) * i64::from(host.get(rt));
    host.set(rd, product as i32);
    Ok(())
}

/// `blood_bag $t, offset($s)`: stores `$t` to the word at `$s + offset`.
///
/// # Errors
///
/// [`Fault::Misaligned`] (memory untouched) if the address is not a multiple of 4,
/// [`Fault::MemoryAccess`] if the host write fails.
pub fn blood_bag(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    const MNEMONIC: &str = "blood_bag";
    let (rt, rs, imm) = i_type(MNEMONIC, ops)?;
    let addr = word_address(MNEMONIC, host, rs, imm)?;
    let value = host.get(rt);
    host.write_word(addr, value).map_err(|source| Fault::MemoryAccess {
        mnemonic: MNEMONIC,
        addr,
        source,
    })
}

/// `drink $t, offset($s)`: loads the word at `$s + offset` into `$t`.
///
/// # Errors
///
/// [`Fault::Misaligned`] if the address is not a multiple of 4, [`Fault::MemoryAccess`] if
/// the host read fails. `$t` is left unchanged in both cases.
pub fn drink(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    const MNEMONIC: &str = "drink";
    let (rt, rs, imm) = i_type(MNEMONIC, ops)?;
    let addr = word_address(MNEMONIC, host, rs, imm)?;
    let value = host.read_word(addr).map_err(|source| Fault::MemoryAccess {
        mnemonic: MNEMONIC,
        addr,
        source,
    })?;
    host.set(rt, value);
    Ok(())
}

/// `fangs $s, $t, label`: branches iff `$s == $t`.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not a BRANCH-format vector.
pub fn fangs(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rs, rt, offset) = branch_type("fangs", ops)?;
    if host.get(rs) == host.get(rt) {
        host.branch_to(offset);
    }
    Ok(())
}

/// `sprint $s, $t, label`: branches iff `$s != $t`.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not a BRANCH-format vector.
pub fn sprint(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rs, rt, offset) = branch_type("sprint", ops)?;
    if host.get(rs) != host.get(rt) {
        host.branch_to(offset);
    }
    Ok(())
}

/// `disappear target`: unconditional jump.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not a J-format vector.
pub fn disappear(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    match *ops {
        Operands::J { target } => {
            host.jump_to(target);
            Ok(())
        }
        _ => Err(mismatch("disappear", Format::J, ops)),
    }
}

/// `mystic_falls $d, $s`: copies `$s` into `$d` (moves a character to a location).
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an R-format vector.
pub fn mystic_falls(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rd, rs, _) = r_type("mystic_falls", ops)?;
    host.set(rd, host.get(rs));
    Ok(())
}

/// `cure $d`: clears `$d` to zero.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an R-format vector.
pub fn cure(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rd, _, _) = r_type("cure", ops)?;
    host.set(rd, 0);
    Ok(())
}

/// `daylight_ring $t`: sets the daylight-immune flag (bit 0).
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an I-format vector.
pub fn daylight_ring(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rt, _, _) = i_type("daylight_ring", ops)?;
    host.set(rt, host.get(rt) | DAYLIGHT_IMMUNE);
    Ok(())
}

/// `daytime $t, imm`: subtracts `imm` from `$t` unless the daylight-immune flag is set.
///
/// The subtraction is a plain wrapping subtract of the whole word.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an I-format vector.
pub fn daytime(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rt, _, imm) = i_type("daytime", ops)?;
    let value = host.get(rt);
    if value & DAYLIGHT_IMMUNE == 0 {
        host.set(rt, value.wrapping_sub(imm));
    }
    Ok(())
}

/// `vervain_ring $t`: sets the compulsion-immune flag (bit 1).
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an I-format vector.
pub fn vervain_ring(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rt, _, _) = i_type("vervain_ring", ops)?;
    host.set(rt, host.get(rt) | COMPULSION_IMMUNE);
    Ok(())
}

/// `compel $t`: sets the compelled flag (bit 2) unless the register value carries the
/// compulsion-immune flag.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an I-format vector.
pub fn compel(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rt, _, _) = i_type("compel", ops)?;
    let value = host.get(rt);
    if value & COMPULSION_IMMUNE == 0 {
        host.set(rt, value | COMPELLED);
    }
    Ok(())
}

/// `hybrid $d`: multiplies `$d` by 100 with 32-bit wraparound.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an R-format vector.
pub fn hybrid(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rd, _, _) = r_type("hybrid", ops)?;
    host.set(rd, host.get(rd).wrapping_mul(HYBRID_FACTOR));
    Ok(())
}

/// `stake $d, $s`: sets the terminated flag (bit 8) on `$d` and announces that `$d` was
/// staked by `$s`.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an R-format vector.
pub fn stake(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rd, rs, _) = r_type("stake", ops)?;
    host.set(rd, host.get(rd) | TERMINATED);
    debug!(victim = rd, killer = rs, "stake");
    host.emit(&format!("{rd} staked by {rs}"));
    Ok(())
}

/// `grimoire $t, $s, imm`: the witch in `$s` deals `imm` damage to `$t`.
///
/// If the remaining health drops below zero the register is overwritten with the bare
/// terminated pattern (256): the negative magnitude and every other flag are discarded. The
/// death is announced.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an I-format vector.
pub fn grimoire(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rt, rs, imm) = i_type("grimoire", ops)?;
    let mut health = host.get(rt).wrapping_sub(imm);
    if health < 0 {
        health = TERMINATED;
        debug!(victim = rt, witch = rs, "grimoire kill");
        host.emit(&format!("{rt} killed by {rs} by grimoire spell"));
    }
    host.set(rt, health);
    Ok(())
}

/// `swap_bodies $d, $s`: exchanges the values of `$d` and `$s`.
///
/// # Errors
///
/// [`Fault::OperandMismatch`] if `ops` is not an R-format vector.
pub fn swap_bodies(ops: &Operands, host: &mut dyn Host) -> Result<(), Fault> {
    let (rd, rs, _) = r_type("swap_bodies", ops)?;
    let temp = host.get(rd);
    host.set(rd, host.get(rs));
    host.set(rs, temp);
    Ok(())
}
