//! Instruction descriptors.
//!
//! A descriptor is the static definition of one instruction: its assembler syntax, its bit
//! template, its format class and the function implementing its semantics. Descriptors are
//! `const`-constructible so the whole catalog lives in static storage.

use std::fmt;

use super::format::Format;
use super::instruction::Operands;
use super::template::BitTemplate;
use crate::common::error::Fault;
use crate::host::Host;

/// Execution semantics of one instruction.
///
/// Receives the decoded operands and exclusive access to the host state. A returned fault
/// aborts the instruction; writes performed before the fault remain visible.
pub type Semantics = fn(&Operands, &mut dyn Host) -> Result<(), Fault>;

/// Immutable record describing one instruction.
#[derive(Clone, Copy)]
pub struct InstructionDescriptor {
    syntax: &'static str,
    description: &'static str,
    format: Format,
    template: BitTemplate,
    semantics: Semantics,
}

impl InstructionDescriptor {
    /// Creates a descriptor.
    ///
    /// # Arguments
    ///
    /// * `syntax` - Mnemonic followed by operand placeholders (`$d`, `$s`, `$t`, `imm`,
    ///   `offset`, `label`, `target`).
    /// * `description` - One-line summary for listings.
    /// * `format` - Field layout class.
    /// * `pattern` - 32-bit template string (see [`BitTemplate::parse`]).
    /// * `semantics` - Execution function.
    pub const fn new(
        syntax: &'static str,
        description: &'static str,
        format: Format,
        pattern: &'static str,
        semantics: Semantics,
    ) -> Self {
        Self {
            syntax,
            description,
            format,
            template: BitTemplate::parse(pattern),
            semantics,
        }
    }

    /// The mnemonic: the syntax up to the first space.
    pub fn mnemonic(&self) -> &'static str {
        self.syntax
            .split_once(' ')
            .map_or(self.syntax, |(mnemonic, _)| mnemonic)
    }

    /// The full syntax template.
    pub const fn syntax(&self) -> &'static str {
        self.syntax
    }

    /// One-line summary of the instruction.
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// The format class.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// The bit template.
    pub const fn template(&self) -> &BitTemplate {
        &self.template
    }

    /// The semantics function.
    pub const fn semantics(&self) -> Semantics {
        self.semantics
    }
}

impl fmt::Debug for InstructionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstructionDescriptor")
            .field("syntax", &self.syntax)
            .field("format", &self.format)
            .field("template", &self.template.pattern())
            .finish_non_exhaustive()
    }
}
