//! # Disassembler Tests
//!
//! Rendering of every format with alias-preferred register names.

use mystic_core::catalog;
use mystic_core::isa::disasm::{disassemble, render};
use mystic_core::isa::instruction::Operands;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::{branch, i, jump, r};

#[rstest]
#[case(r("drain", 8, 9, 10), "drain $Elena, $Stefan, $Damon")]
#[case(r("older", 2, 3, 4), "older $v0, $v1, $a0")]
#[case(i("summon", 9, 0, -7), "summon $Stefan, -7")]
#[case(i("blood_bag", 9, 8, 12), "blood_bag $Stefan, 12($Elena)")]
#[case(i("drink", 10, 29, -4), "drink $Damon, -4($sp)")]
#[case(branch("fangs", 8, 0, -3), "fangs $Elena, $zero, -3")]
#[case(branch("sprint", 11, 12, 5), "sprint $Bonnie, $Elijah, 5")]
#[case(jump(0x0010_0004), "disappear 0x100004")]
#[case(r("mystic_falls", 8, 18, 0), "mystic_falls $Elena, $Salvatore_House")]
#[case(r("cure", 15, 0, 0), "cure $Klaus")]
#[case(0x3408_0001, "daylight_ring $Elena")]
#[case(0x3808_000A, "daytime $Elena, 10")]
#[case(0x7008_0004, "compel $Elena")]
#[case(r("stake", 10, 9, 0), "stake $Damon, $Stefan")]
#[case(i("grimoire", 8, 11, 150), "grimoire $Elena, $Bonnie, 150")]
#[case(r("swap_bodies", 16, 13, 0), "swap_bodies $Katherine, $Caroline")]
fn test_disassemble(#[case] word: u32, #[case] expected: &str) {
    assert_eq!(disassemble(word), expected);
}

#[test]
fn test_disassemble_unknown() {
    assert_eq!(disassemble(0x0000_0000), "unknown");
    assert_eq!(disassemble(0xFFFF_FFFF), "unknown");
}

#[test]
fn test_render_uses_given_operands() {
    let desc = catalog().get("mystic_falls").unwrap();
    let ops = Operands::R {
        rd: 1,
        rs: 2,
        rt: 0,
    };
    let text = render(desc, &ops);
    assert_eq!(text, "mystic_falls $at, $v0");
}

#[test]
fn test_every_descriptor_renders_its_mnemonic() {
    for desc in catalog() {
        let text = disassemble(desc.template().expected());
        assert!(text.starts_with(desc.mnemonic()), "{text}");
        assert!(!text.contains("imm") && !text.contains("$d"), "{text}");
    }
}
