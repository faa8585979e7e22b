//! Common utilities and types shared by the ISA and the reference host.
//!
//! This module provides:
//! 1. **Constants:** Register-file geometry and the flag bits packed into register values.
//! 2. **Error Handling:** The `Fault` raised by semantics functions and the host-side
//!    memory error.
//! 3. **Register Management:** A 32-entry register file with a hardwired zero register.

/// Common constants (register geometry, flag masks).
pub mod constants;

/// Fault and memory error definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{COMPELLED, COMPULSION_IMMUNE, DAYLIGHT_IMMUNE, NUM_REGS, TERMINATED};
pub use error::{Fault, FaultKind, MemoryError};
pub use reg::RegisterFile;
