//! # Common Type Tests
//!
//! Tests for the flag constants, faults and the register file.

/// Flag bit layout.
pub mod constants;
