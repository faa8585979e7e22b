//! Fault and memory error definitions.
//!
//! This module defines the error handling used while executing custom instructions. It provides:
//! 1. **Fault Representation:** The typed abort conditions a semantics function may raise.
//! 2. **Host Memory Errors:** The opaque failure reported by a host memory implementation.
//! 3. **Classification:** A payload-free `FaultKind` for hosts that branch on the fault class.
//!
//! A fault aborts the remaining effects of the current instruction. Register writes made
//! earlier in the same semantics call are not rolled back.

use std::fmt;

use thiserror::Error;

use crate::isa::format::Format;

/// Failure reported by a host memory implementation.
///
/// The extension treats the reason as opaque; it only wraps it in [`Fault::MemoryAccess`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The address lies outside every mapped region.
    #[error("address {0:#010x} is outside mapped memory")]
    OutOfRange(u32),

    /// The backing store rejected a misaligned word access.
    #[error("address {0:#010x} is not word aligned")]
    Unaligned(u32),
}

/// Abort condition raised while executing one instruction.
///
/// Faults are non-retryable at this layer and are always propagated to the host, which
/// decides whether to halt, report, or abort the run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// Effective address of a word access is not a multiple of 4.
    ///
    /// Raised before the host memory is touched, so no memory mutation occurs.
    #[error("{mnemonic}: word address {addr:#010x} is not aligned")]
    Misaligned {
        /// Mnemonic of the faulting instruction.
        mnemonic: &'static str,
        /// Effective byte address.
        addr: u32,
    },

    /// The host memory read or write failed.
    #[error("{mnemonic}: memory access failed at {addr:#010x}")]
    MemoryAccess {
        /// Mnemonic of the faulting instruction.
        mnemonic: &'static str,
        /// Effective byte address.
        addr: u32,
        /// Host-side reason.
        #[source]
        source: MemoryError,
    },

    /// Name is neither a custom alias nor a canonical register name.
    #[error("unknown register name `{0}`")]
    UnknownRegister(String),

    /// Dispatch received operands decoded for a different format than the descriptor's.
    #[error("{mnemonic}: expected {expected} operands, got {found}")]
    OperandMismatch {
        /// Mnemonic of the descriptor being dispatched.
        mnemonic: &'static str,
        /// Format declared by the descriptor.
        expected: Format,
        /// Format of the operands supplied.
        found: Format,
    },
}

/// Payload-free classification of a [`Fault`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// See [`Fault::Misaligned`].
    Misaligned,
    /// See [`Fault::MemoryAccess`].
    MemoryAccess,
    /// See [`Fault::UnknownRegister`].
    UnknownRegister,
    /// See [`Fault::OperandMismatch`].
    OperandMismatch,
}

impl Fault {
    /// Returns the classification of this fault.
    pub const fn kind(&self) -> FaultKind {
        match self {
            Self::Misaligned { .. } => FaultKind::Misaligned,
            Self::MemoryAccess { .. } => FaultKind::MemoryAccess,
            Self::UnknownRegister(_) => FaultKind::UnknownRegister,
            Self::OperandMismatch { .. } => FaultKind::OperandMismatch,
        }
    }

    /// Returns the human-readable context string of this fault.
    ///
    /// For memory faults the host-side reason is appended.
    pub fn context(&self) -> String {
        match self {
            Self::MemoryAccess { source, .. } => format!("{self}: {source}"),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Misaligned => "Misaligned",
            Self::MemoryAccess => "MemoryAccess",
            Self::UnknownRegister => "UnknownRegister",
            Self::OperandMismatch => "OperandMismatch",
        };
        f.write_str(name)
    }
}
