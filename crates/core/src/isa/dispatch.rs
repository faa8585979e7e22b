//! Dispatch engine.
//!
//! Given a descriptor (already matched by the host decoder) and its decoded operands, invokes
//! the descriptor's semantics against the host state and propagates the result unchanged.

use tracing::{debug, trace};

use super::codec;
use super::descriptor::InstructionDescriptor;
use super::instruction::Operands;
use crate::common::error::Fault;
use crate::host::Host;

/// Executes one instruction.
///
/// # Arguments
///
/// * `descriptor` - The matched instruction.
/// * `operands` - Operands decoded with the descriptor's format.
/// * `host` - Exclusive handle to the host state for the duration of the call.
///
/// # Errors
///
/// Returns [`Fault::OperandMismatch`] if `operands` were decoded for another format,
/// otherwise whatever fault the semantics function raises.
pub fn dispatch(
    descriptor: &InstructionDescriptor,
    operands: &Operands,
    host: &mut dyn Host,
) -> Result<(), Fault> {
    let mnemonic = descriptor.mnemonic();
    if operands.format() != descriptor.format() {
        return Err(Fault::OperandMismatch {
            mnemonic,
            expected: descriptor.format(),
            found: operands.format(),
        });
    }

    trace!(mnemonic, ?operands, "dispatch");
    let result = (descriptor.semantics())(operands, host);
    if let Err(fault) = &result {
        debug!(mnemonic, %fault, "instruction faulted");
    }
    result
}

/// Decodes `word` with `descriptor`'s format and dispatches it.
///
/// # Errors
///
/// Returns whatever fault the semantics function raises.
pub fn execute(
    descriptor: &InstructionDescriptor,
    word: u32,
    host: &mut dyn Host,
) -> Result<(), Fault> {
    let operands = codec::decode(word, descriptor.format());
    dispatch(descriptor, &operands, host)
}
