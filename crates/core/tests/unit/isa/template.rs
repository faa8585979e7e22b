//! # Bit Template Tests
//!
//! Parsing of 32-character patterns into fixed-bit masks and slot masks, matching, and the
//! layout rules checked by `validate`.

use mystic_core::isa::Format;
use mystic_core::isa::template::{BitTemplate, Slot, TemplateError};
use pretty_assertions::assert_eq;

const DRAIN: &str = "000000 sssss ttttt ddddd 00000 100010";

#[test]
fn test_parse_r_format_masks() {
    let t = BitTemplate::parse(DRAIN);
    assert_eq!(t.mask(), 0xFC00_07FF);
    assert_eq!(t.expected(), 0x0000_0022);
    assert_eq!(t.slot_mask(Slot::S), 0x03E0_0000);
    assert_eq!(t.slot_mask(Slot::T), 0x001F_0000);
    assert_eq!(t.slot_mask(Slot::D), 0x0000_F800);
    assert_eq!(t.slot_mask(Slot::I), 0);
    assert!(!t.has_slot(Slot::I));
}

#[test]
fn test_parse_ignores_spaces_and_underscores() {
    let spaced = BitTemplate::parse(DRAIN);
    let packed = BitTemplate::parse("000000_sssssttttt_ddddd_00000_100010");
    assert_eq!(spaced.mask(), packed.mask());
    assert_eq!(spaced.expected(), packed.expected());
}

#[test]
fn test_parse_accepts_tabs_and_newlines() {
    let spaced = BitTemplate::parse(DRAIN);
    let tabbed = BitTemplate::parse("000000\tsssss\tttttt\tddddd\n00000 100010");
    assert_eq!(tabbed.mask(), spaced.mask());
    assert_eq!(tabbed.expected(), spaced.expected());
    assert_eq!(tabbed.slot_mask(Slot::D), spaced.slot_mask(Slot::D));
}

#[test]
fn test_parse_j_target_slot() {
    let t = BitTemplate::parse("000010 iiiiiiiiiiiiiiiiiiiiiiiiii");
    assert_eq!(t.mask(), 0xFC00_0000);
    assert_eq!(t.expected(), 0x0800_0000);
    assert_eq!(t.slot_mask(Slot::I), 0x03FF_FFFF);
}

#[test]
#[should_panic(expected = "invalid character")]
fn test_parse_rejects_unknown_letter() {
    let _ = BitTemplate::parse("000000 sssss ttttt xxxxx 00000 100010");
}

#[test]
#[should_panic(expected = "fewer than 32 bits")]
fn test_parse_rejects_short_pattern() {
    let _ = BitTemplate::parse("000000 sssss ttttt");
}

#[test]
#[should_panic(expected = "more than 32 bits")]
fn test_parse_rejects_long_pattern() {
    let _ = BitTemplate::parse("000000 sssss ttttt ddddd 00000 100010 1");
}

#[test]
fn test_matches_ignores_slot_bits() {
    let t = BitTemplate::parse(DRAIN);
    assert!(t.matches(0x0000_0022));
    assert!(t.matches(0x012A_4022));
    assert!(!t.matches(0x012A_4020));
    assert!(!t.matches(0x212A_4022));
}

#[test]
fn test_extract_slots() {
    let t = BitTemplate::parse(DRAIN);
    let word = 0x012A_4022;
    assert_eq!(t.extract(word, Slot::S), Some(9));
    assert_eq!(t.extract(word, Slot::T), Some(10));
    assert_eq!(t.extract(word, Slot::D), Some(8));
    assert_eq!(t.extract(word, Slot::I), None);
}

#[test]
fn test_covers_general_over_specific() {
    let general = BitTemplate::parse("001101 sssss ttttt iiiiiiiiiiiiiiii");
    let ring = BitTemplate::parse("001101 00000 ttttt 0000000000000001");
    assert!(general.covers(&ring));
    assert!(!ring.covers(&general));
    assert!(ring.covers(&ring));
}

#[test]
fn test_covers_disjoint_templates() {
    let daylight = BitTemplate::parse("001101 00000 ttttt 0000000000000001");
    let vervain = BitTemplate::parse("001101 00000 ttttt 0000000000000010");
    assert!(!daylight.covers(&vervain));
    assert!(!vervain.covers(&daylight));
}

#[test]
fn test_validate_accepts_standard_layouts() {
    assert_eq!(BitTemplate::parse(DRAIN).validate(Format::R), Ok(()));
    assert_eq!(
        BitTemplate::parse("001000 00000 ttttt iiiiiiiiiiiiiiii").validate(Format::I),
        Ok(())
    );
    assert_eq!(
        BitTemplate::parse("000100 sssss ttttt iiiiiiiiiiiiiiii").validate(Format::Branch),
        Ok(())
    );
    assert_eq!(
        BitTemplate::parse("000010 iiiiiiiiiiiiiiiiiiiiiiiiii").validate(Format::J),
        Ok(())
    );
}

#[test]
fn test_validate_rejects_slot_not_in_format() {
    let err = BitTemplate::parse(DRAIN).validate(Format::I).unwrap_err();
    assert_eq!(
        err,
        TemplateError::UnexpectedSlot {
            pattern: DRAIN,
            slot: Slot::D,
            format: Format::I,
        }
    );
}

#[test]
fn test_validate_rejects_swapped_register_fields() {
    let pattern = "001000 ttttt sssss iiiiiiiiiiiiiiii";
    let err = BitTemplate::parse(pattern).validate(Format::I).unwrap_err();
    assert_eq!(
        err,
        TemplateError::Misplaced {
            pattern,
            slot: Slot::S,
            found: 0x001F_0000,
            expected: 0x03E0_0000,
        }
    );
}

#[test]
fn test_validate_rejects_narrow_immediate() {
    let pattern = "001000 00000 ttttt 00000000iiiiiiii";
    let err = BitTemplate::parse(pattern).validate(Format::I).unwrap_err();
    assert!(matches!(err, TemplateError::Misplaced { slot: Slot::I, .. }));
}

#[test]
fn test_validate_rejects_split_slot() {
    let pattern = "000000 sssss ttttt ddddd sssss 100010";
    let err = BitTemplate::parse(pattern).validate(Format::R).unwrap_err();
    assert_eq!(
        err,
        TemplateError::NonContiguous {
            pattern,
            slot: Slot::S,
        }
    );
}

#[test]
fn test_template_error_display_names_pattern() {
    let err = BitTemplate::parse(DRAIN).validate(Format::J).unwrap_err();
    let text = err.to_string();
    assert!(text.contains(DRAIN), "{text}");
    assert!(text.contains("J format"), "{text}");
}
