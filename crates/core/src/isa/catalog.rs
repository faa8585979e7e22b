//! Instruction catalog.
//!
//! The catalog is the ordered list of every Mystic Falls instruction. It lives in static
//! storage, is never mutated, and is safe to share between threads for read-only lookup. The
//! host decoder matches a raw word against the templates in catalog order and takes the
//! first full match; [`Catalog::find`] applies exactly that rule.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use thiserror::Error;

use super::descriptor::InstructionDescriptor;
use super::format::Format;
use super::semantics;
use super::template::TemplateError;

/// Every instruction of the extension, in decode priority order.
static DESCRIPTORS: [InstructionDescriptor; 19] = [
    InstructionDescriptor::new(
        "summon $t, imm",
        "Summon a character into Mystic Falls with the given power",
        Format::I,
        "001000 00000 ttttt iiiiiiiiiiiiiiii",
        semantics::summon,
    ),
    InstructionDescriptor::new(
        "drain $d, $s, $t",
        "Drain power: $d = $s - $t",
        Format::R,
        "000000 sssss ttttt ddddd 00000 100010",
        semantics::drain,
    ),
    InstructionDescriptor::new(
        "feed $d, $s, $t",
        "Feed: $d = $s + $t",
        Format::R,
        "000000 sssss ttttt ddddd 00000 100000",
        semantics::feed,
    ),
    InstructionDescriptor::new(
        "older $d, $s, $t",
        "Older is stronger: $d = low 32 bits of $s * $t",
        Format::R,
        "000000 sssss ttttt ddddd 00000 011000",
        semantics::older,
    ),
    InstructionDescriptor::new(
        "blood_bag $t, offset($s)",
        "Store $t into the blood bag at $s + offset",
        Format::I,
        "101011 sssss ttttt iiiiiiiiiiiiiiii",
        semantics::blood_bag,
    ),
    InstructionDescriptor::new(
        "drink $t, offset($s)",
        "Drink the blood bag at $s + offset into $t",
        Format::I,
        "100011 sssss ttttt iiiiiiiiiiiiiiii",
        semantics::drink,
    ),
    InstructionDescriptor::new(
        "fangs $s, $t, label",
        "Pick a fight (branch) if $s == $t",
        Format::Branch,
        "000100 sssss ttttt iiiiiiiiiiiiiiii",
        semantics::fangs,
    ),
    InstructionDescriptor::new(
        "sprint $s, $t, label",
        "Sprint away (branch) if $s != $t",
        Format::Branch,
        "000101 sssss ttttt iiiiiiiiiiiiiiii",
        semantics::sprint,
    ),
    InstructionDescriptor::new(
        "disappear target",
        "Disappear (jump) to target",
        Format::J,
        "000010 iiiiiiiiiiiiiiiiiiiiiiiiii",
        semantics::disappear,
    ),
    InstructionDescriptor::new(
        "mystic_falls $d, $s",
        "Move character $d to location $s",
        Format::R,
        "000000 sssss 00000 ddddd 00000 000010",
        semantics::mystic_falls,
    ),
    InstructionDescriptor::new(
        "cure $d",
        "Cure $d back to a human with zero power",
        Format::R,
        "000000 00000 00000 ddddd 00000 110000",
        semantics::cure,
    ),
    InstructionDescriptor::new(
        "daylight_ring $t",
        "Give $t a daylight ring (set bit 0)",
        Format::I,
        "001101 00000 ttttt 0000000000000001",
        semantics::daylight_ring,
    ),
    InstructionDescriptor::new(
        "daytime $t, imm",
        "Sunrise: subtract imm from $t unless bit 0 is set",
        Format::I,
        "001110 00000 ttttt iiiiiiiiiiiiiiii",
        semantics::daytime,
    ),
    InstructionDescriptor::new(
        "vervain_ring $t",
        "Give $t vervain (set bit 1)",
        Format::I,
        "001101 00000 ttttt 0000000000000010",
        semantics::vervain_ring,
    ),
    InstructionDescriptor::new(
        "compel $t",
        "Compel $t (set bit 2) unless bit 1 is set",
        Format::I,
        "011100 00000 ttttt 0000000000000100",
        semantics::compel,
    ),
    InstructionDescriptor::new(
        "hybrid $d",
        "Hybrid power: $d = $d * 100",
        Format::R,
        "000000 00000 00000 ddddd 00000 011001",
        semantics::hybrid,
    ),
    InstructionDescriptor::new(
        "stake $d, $s",
        "$s stakes $d (set bit 8) and announces the kill",
        Format::R,
        "000000 sssss 00000 ddddd 00000 111110",
        semantics::stake,
    ),
    InstructionDescriptor::new(
        "grimoire $t, $s, imm",
        "Witch $s deals imm damage to $t; a kill sets bit 8",
        Format::I,
        "001111 sssss ttttt iiiiiiiiiiiiiiii",
        semantics::grimoire,
    ),
    InstructionDescriptor::new(
        "swap_bodies $d, $s",
        "Exchange the bodies (values) of $d and $s",
        Format::R,
        "000000 sssss 00000 ddddd 00000 111011",
        semantics::swap_bodies,
    ),
];

/// Display name of the extension.
pub const NAME: &str = "The Vampire Diaries Assembly";

/// One-line description of the extension.
pub const DESCRIPTION: &str =
    "Assembly language to simulate.... and hopefully survive the supernatural town of Mystic Falls";

static CATALOG: Catalog = Catalog::new(&DESCRIPTORS);

/// Returns the process-wide catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Inconsistency found by [`Catalog::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A descriptor's template does not fit its format.
    #[error("{mnemonic}: {source}")]
    Template {
        /// Offending descriptor.
        mnemonic: &'static str,
        /// Layout violation.
        #[source]
        source: TemplateError,
    },

    /// Two descriptors share a mnemonic.
    #[error("duplicate mnemonic `{0}`")]
    DuplicateMnemonic(&'static str),

    /// Every word matching a descriptor is claimed by an earlier one.
    #[error("`{mnemonic}` is unreachable: shadowed by `{by}`")]
    Shadowed {
        /// Unreachable descriptor.
        mnemonic: &'static str,
        /// Earlier descriptor that claims all of its encodings.
        by: &'static str,
    },
}

/// Ordered, immutable collection of instruction descriptors.
#[derive(Debug)]
pub struct Catalog {
    descriptors: &'static [InstructionDescriptor],
    by_mnemonic: OnceLock<HashMap<&'static str, usize>>,
}

impl Catalog {
    /// Wraps a static descriptor list.
    pub const fn new(descriptors: &'static [InstructionDescriptor]) -> Self {
        Self {
            descriptors,
            by_mnemonic: OnceLock::new(),
        }
    }

    /// All descriptors, in decode priority order.
    pub const fn descriptors(&self) -> &'static [InstructionDescriptor] {
        self.descriptors
    }

    /// Iterates over the descriptors in order.
    pub fn iter(&self) -> std::slice::Iter<'static, InstructionDescriptor> {
        self.descriptors.iter()
    }

    /// Number of descriptors.
    pub const fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if the catalog holds no descriptors.
    pub const fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Looks up a descriptor by mnemonic (case-sensitive).
    ///
    /// The first lookup builds the mnemonic index; later lookups hit the index directly.
    pub fn get(&self, mnemonic: &str) -> Option<&'static InstructionDescriptor> {
        let index = self.by_mnemonic.get_or_init(|| {
            self.descriptors
                .iter()
                .enumerate()
                .rev()
                .map(|(idx, desc)| (desc.mnemonic(), idx))
                .collect()
        });
        index.get(mnemonic).map(|&idx| &self.descriptors[idx])
    }

    /// Returns the first descriptor whose fixed bits match `word`.
    pub fn find(&self, word: u32) -> Option<&'static InstructionDescriptor> {
        self.descriptors
            .iter()
            .find(|desc| desc.template().matches(word))
    }

    /// Checks every template against its format, mnemonic uniqueness, and that no
    /// descriptor is made unreachable by an earlier one.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found, in catalog order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for (idx, desc) in self.descriptors.iter().enumerate() {
            let mnemonic = desc.mnemonic();
            desc.template()
                .validate(desc.format())
                .map_err(|source| CatalogError::Template { mnemonic, source })?;

            if !seen.insert(mnemonic) {
                return Err(CatalogError::DuplicateMnemonic(mnemonic));
            }

            if let Some(earlier) = self.descriptors[..idx]
                .iter()
                .find(|earlier| earlier.template().covers(desc.template()))
            {
                return Err(CatalogError::Shadowed {
                    mnemonic,
                    by: earlier.mnemonic(),
                });
            }
        }
        Ok(())
    }
}

impl IntoIterator for &Catalog {
    type Item = &'static InstructionDescriptor;
    type IntoIter = std::slice::Iter<'static, InstructionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}
