//! Reference host and program loading.
//!
//! Provides a minimal host for the extension: a register file, a word-addressed data segment,
//! a program counter and a diagnostics buffer, plus a loader for hex program listings. The
//! CLI and the test suite run programs through it.

/// Hex program listing loader.
pub mod loader;

/// The reference machine implementing every host trait.
pub mod machine;

/// Word-addressed data segment.
pub mod memory;

pub use loader::{LoadError, load_file, parse_assignment, parse_program, parse_word};
pub use machine::{Machine, RunSummary, SimError, StepOutcome};
pub use memory::DataMemory;
