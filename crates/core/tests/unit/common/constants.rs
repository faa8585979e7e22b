//! # Flag Constant Tests
//!
//! The flag bits share the register word with the power value; they must be distinct single
//! bits at the documented positions.

use mystic_core::common::constants::{HYBRID_FACTOR, NUM_REGS, WORD_ALIGN_MASK, WORD_BYTES};
use mystic_core::common::{COMPELLED, COMPULSION_IMMUNE, DAYLIGHT_IMMUNE, TERMINATED};

#[test]
fn test_flag_positions() {
    assert_eq!(DAYLIGHT_IMMUNE, 1);
    assert_eq!(COMPULSION_IMMUNE, 2);
    assert_eq!(COMPELLED, 4);
    assert_eq!(TERMINATED, 256);
}

#[test]
fn test_flags_are_disjoint_single_bits() {
    let flags = [DAYLIGHT_IMMUNE, COMPULSION_IMMUNE, COMPELLED, TERMINATED];
    for (n, a) in flags.iter().enumerate() {
        assert_eq!(a.count_ones(), 1);
        for b in &flags[n + 1..] {
            assert_eq!(a & b, 0);
        }
    }
}

#[test]
fn test_geometry() {
    assert_eq!(NUM_REGS, 32);
    assert_eq!(WORD_BYTES, 4);
    assert_eq!(WORD_ALIGN_MASK, 3);
    assert_eq!(HYBRID_FACTOR, 100);
}
