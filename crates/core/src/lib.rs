//! Mystic Falls instruction-set extension.
//!
//! This crate implements a themed, MIPS-style custom instruction catalog that plugs into a
//! host instruction-set simulator. It provides:
//! 1. **ISA:** Bit templates, operand codec, instruction descriptors, catalog, and the
//!    execution semantics of every instruction.
//! 2. **Registers:** Custom register aliases layered over the canonical MIPS names.
//! 3. **Host interface:** The narrow register/memory/control-transfer/diagnostics traits the
//!    semantics run against.
//! 4. **Simulation:** A small reference host (`Machine`) and program loader used by the CLI
//!    and the test suite.

/// Common types and constants (faults, flag bits, register file).
pub mod common;
/// Reference host configuration (defaults and JSON loading).
pub mod config;
/// Host collaborator traits consumed by the semantics functions.
pub mod host;
/// Instruction set (templates, codec, descriptors, catalog, semantics, dispatch, aliases).
pub mod isa;
/// Reference host machine and program loader.
pub mod sim;

/// Fault raised by a semantics function.
pub use crate::common::Fault;
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Host trait bundle handed to every semantics call.
pub use crate::host::Host;
/// The process-wide instruction catalog.
pub use crate::isa::catalog::{Catalog, catalog};
/// Reference host machine.
pub use crate::sim::Machine;
