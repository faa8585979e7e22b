//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the encoding templates, operand codec, instruction descriptors, catalog and
//! execution semantics of the Mystic Falls extension.
//!
//! # Data flow
//!
//! encoded word → [`codec::decode`] (field extraction per format) →
//! [`dispatch::dispatch`] → semantics function (state mutation through the host, or a
//! fault).

/// Register aliases and canonical MIPS register names.
pub mod abi;

/// The process-wide instruction catalog.
pub mod catalog;

/// Operand extraction and packing for every instruction format.
pub mod codec;

/// Instruction descriptor records.
pub mod descriptor;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Dispatch engine invoking semantics functions.
pub mod dispatch;

/// Instruction format classes.
pub mod format;

/// Instruction field extraction and the decoded operand vector.
pub mod instruction;

/// Execution semantics of every instruction.
pub mod semantics;

/// Bit-encoding templates.
pub mod template;

pub use catalog::{Catalog, catalog};
pub use codec::{decode, encode};
pub use descriptor::InstructionDescriptor;
pub use dispatch::dispatch;
pub use format::Format;
pub use instruction::Operands;
