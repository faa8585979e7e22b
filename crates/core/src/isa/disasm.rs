//! Instruction Disassembler.
//!
//! Converts a 32-bit encoding into assembler text for debug tracing, the CLI, and test
//! diagnostics. The word is matched against the catalog, decoded with the descriptor's
//! format, and the descriptor's syntax template is rendered with register display names
//! (themed aliases preferred).
//!
//! # Usage
//!
//! ```
//! use mystic_core::isa::disasm::disassemble;
//! let text = disassemble(0x012A_4022); // drain $t0, $t1, $t2
//! assert_eq!(text, "drain $Elena, $Stefan, $Damon");
//! ```

use super::abi::display_name;
use super::catalog::catalog;
use super::codec::decode;
use super::descriptor::InstructionDescriptor;
use super::instruction::Operands;

/// Placeholders recognised in syntax templates.
const PLACEHOLDERS: [&str; 7] = ["$d", "$s", "$t", "imm", "offset", "label", "target"];

/// Disassembles a 32-bit word.
///
/// Returns the rendered instruction, or `"unknown"` if no descriptor matches.
///
/// # Arguments
///
/// * `word` - The raw 32-bit encoding.
pub fn disassemble(word: u32) -> String {
    let Some(desc) = catalog().find(word) else {
        return "unknown".to_owned();
    };
    render(desc, &decode(word, desc.format()))
}

/// Renders `descriptor`'s syntax with the values in `operands`.
pub fn render(descriptor: &InstructionDescriptor, operands: &Operands) -> String {
    let syntax = descriptor.syntax();
    let mut out = String::with_capacity(syntax.len() + 16);
    let Some((mnemonic, mut rest)) = syntax.split_once(' ') else {
        return syntax.to_owned();
    };
    out.push_str(mnemonic);
    out.push(' ');
    while !rest.is_empty() {
        if let Some(placeholder) = PLACEHOLDERS.iter().find(|p| rest.starts_with(**p)) {
            out.push_str(&value_of(placeholder, operands));
            rest = &rest[placeholder.len()..];
        } else if let Some(c) = rest.chars().next() {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

fn value_of(placeholder: &str, operands: &Operands) -> String {
    let (rd, rs, rt, imm) = match *operands {
        Operands::R { rd, rs, rt } => (rd, rs, rt, 0),
        Operands::I { rt, rs, imm } => (0, rs, rt, imm),
        Operands::Branch { rs, rt, offset } => (0, rs, rt, offset),
        Operands::J { target } => return format!("{target:#x}"),
    };
    match placeholder {
        "$d" => display_name(rd).to_owned(),
        "$s" => display_name(rs).to_owned(),
        "$t" => display_name(rt).to_owned(),
        _ => imm.to_string(),
    }
}
