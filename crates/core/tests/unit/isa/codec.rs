//! # Operand Codec Tests
//!
//! Field extraction for every format, sign extension of immediates and offsets, and the
//! checks `encode` applies before accepting an operand vector.

use mystic_core::catalog;
use mystic_core::isa::codec::{EncodeError, decode, encode, sign_extend16};
use mystic_core::isa::instruction::InstructionBits;
use mystic_core::isa::{Format, Operands};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::builder::{assemble, i, r};

#[test]
fn test_decode_r_format() {
    let ops = decode(0x012A_4022, Format::R);
    assert_eq!(
        ops,
        Operands::R {
            rd: 8,
            rs: 9,
            rt: 10
        }
    );
}

#[test]
fn test_decode_i_format_negative_immediate() {
    // summon $8, -1
    let ops = decode(0x2008_FFFF, Format::I);
    assert_eq!(
        ops,
        Operands::I {
            rt: 8,
            rs: 0,
            imm: -1
        }
    );
}

#[test]
fn test_decode_branch_format() {
    // fangs $8, $9, -2
    let ops = decode(0x1109_FFFE, Format::Branch);
    assert_eq!(
        ops,
        Operands::Branch {
            rs: 8,
            rt: 9,
            offset: -2
        }
    );
}

#[test]
fn test_decode_j_target_is_unsigned() {
    let ops = decode(0x0BFF_FFFF, Format::J);
    assert_eq!(
        ops,
        Operands::J {
            target: 0x03FF_FFFF
        }
    );
}

#[test]
fn test_field_extractors() {
    let word: u32 = 0x012A_4022;
    assert_eq!(word.opcode(), 0);
    assert_eq!(word.rs(), 9);
    assert_eq!(word.rt(), 10);
    assert_eq!(word.rd(), 8);
    assert_eq!(word.shamt(), 0);
    assert_eq!(word.funct(), 0x22);
    assert_eq!(word.imm16(), 0x4022);
    assert_eq!(word.target26(), 0x012A_4022);
}

#[test]
fn test_sign_extend16_boundaries() {
    assert_eq!(sign_extend16(0x0000), 0);
    assert_eq!(sign_extend16(0x7FFF), 32767);
    assert_eq!(sign_extend16(0x8000), -32768);
    assert_eq!(sign_extend16(0xFFFF), -1);
}

#[test]
fn test_encode_known_words() {
    assert_eq!(r("drain", 8, 9, 10), 0x012A_4022);
    assert_eq!(r("feed", 8, 9, 10), 0x012A_4020);
    assert_eq!(r("older", 8, 9, 10), 0x012A_4018);
    assert_eq!(i("summon", 9, 0, 5), 0x2009_0005);
    assert_eq!(i("grimoire", 8, 9, 150), 0x3D28_0096);
    assert_eq!(i("daylight_ring", 8, 0, 1), 0x3408_0001);
    assert_eq!(r("cure", 8, 0, 0), 0x0000_4030);
    assert_eq!(r("stake", 10, 9, 0), 0x0120_503E);
}

#[test]
fn test_encode_rejects_format_mismatch() {
    let desc = catalog().get("drain").unwrap();
    let err = encode(desc, &Operands::J { target: 1 }).unwrap_err();
    assert_eq!(
        err,
        EncodeError::FormatMismatch {
            mnemonic: "drain",
            expected: Format::R,
            found: Format::J,
        }
    );
}

#[test]
fn test_encode_rejects_register_out_of_range() {
    let desc = catalog().get("feed").unwrap();
    let ops = Operands::R {
        rd: 32,
        rs: 1,
        rt: 2,
    };
    let err = encode(desc, &ops).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::Unrepresentable {
            mnemonic: "feed",
            ..
        }
    ));
}

#[test]
fn test_encode_rejects_immediate_out_of_range() {
    let desc = catalog().get("summon").unwrap();
    let ops = Operands::I {
        rt: 8,
        rs: 0,
        imm: 40_000,
    };
    assert!(encode(desc, &ops).is_err());
}

#[test]
fn test_encode_rejects_value_for_hardcoded_field() {
    // cure has no source fields; rs must stay 0.
    let desc = catalog().get("cure").unwrap();
    let ops = Operands::R {
        rd: 8,
        rs: 3,
        rt: 0,
    };
    assert!(encode(desc, &ops).is_err());

    // vervain_ring hard-codes its immediate to 2.
    let desc = catalog().get("vervain_ring").unwrap();
    let ops = Operands::I {
        rt: 8,
        rs: 0,
        imm: 1,
    };
    assert!(encode(desc, &ops).is_err());
}

#[test]
fn test_encode_rejects_oversized_jump_target() {
    let desc = catalog().get("disappear").unwrap();
    let ops = Operands::J {
        target: 0x0400_0000,
    };
    assert!(encode(desc, &ops).is_err());
}

#[test]
fn test_operand_vector_order() {
    assert_eq!(
        Operands::R {
            rd: 1,
            rs: 2,
            rt: 3
        }
        .to_vec(),
        vec![1, 2, 3]
    );
    assert_eq!(
        Operands::I {
            rt: 4,
            rs: 5,
            imm: -6
        }
        .to_vec(),
        vec![4, 5, -6]
    );
    assert_eq!(
        Operands::Branch {
            rs: 7,
            rt: 8,
            offset: 9
        }
        .to_vec(),
        vec![7, 8, 9]
    );
    assert_eq!(Operands::J { target: 10 }.to_vec(), vec![10]);
}

#[test]
fn test_operand_count_matches_vector_length() {
    for desc in catalog() {
        let ops = decode(desc.template().expected(), desc.format());
        let mnemonic = desc.mnemonic();
        assert_eq!(
            ops.to_vec().len(),
            desc.format().operand_count(),
            "{mnemonic}"
        );
    }
}

proptest! {
    #[test]
    fn prop_sign_extend16_in_range(field in 0u32..=0xFFFF) {
        let value = sign_extend16(field);
        prop_assert!((-32768..=32767).contains(&value));
        prop_assert_eq!(value, i32::from(field as u16 as i16));
    }

    #[test]
    fn prop_summon_round_trip(rt in 0usize..32, imm in -32768i32..=32767) {
        let word = assemble("summon", Operands::I { rt, rs: 0, imm });
        prop_assert_eq!(decode(word, Format::I), Operands::I { rt, rs: 0, imm });
    }

    #[test]
    fn prop_upper_bits_do_not_leak_into_immediate(word in any::<u32>()) {
        match decode(word, Format::I) {
            Operands::I { imm, .. } => prop_assert_eq!(imm, sign_extend16(word & 0xFFFF)),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
