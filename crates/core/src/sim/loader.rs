//! Hex program loader.
//!
//! Programs are plain text listings with one 32-bit encoding per line, written in hex with or
//! without a `0x` prefix. `#` starts a comment; blank lines are skipped. Underscores may be
//! used as digit separators.
//!
//! ```text
//! # scenario A
//! 0x012A_4022   # drain $Elena, $Stefan, $Damon
//! ```
//!
//! Initial register values are given as `NAME=VALUE` assignments, resolved through the
//! themed aliases and then the canonical table.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::common::error::Fault;
use crate::host::CanonicalNames;
use crate::isa::abi;

/// Error produced while loading a program listing.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The listing could not be read.
    #[error("could not read program: {0}")]
    Io(#[from] io::Error),

    /// A line is not a valid 32-bit hex word.
    #[error("line {line}: `{text}` is not a 32-bit hex word")]
    InvalidWord {
        /// One-based line number.
        line: usize,
        /// Offending text (comment stripped).
        text: String,
    },

    /// An assignment is not of the form `NAME=VALUE`.
    #[error("`{0}` is not of the form REG=VALUE")]
    InvalidAssignment(String),

    /// An assignment value is not a 32-bit decimal or hex number.
    #[error("`{0}` is not a 32-bit value")]
    InvalidValue(String),

    /// An assignment names an unknown register.
    #[error(transparent)]
    Register(#[from] Fault),
}

/// Parses a program listing.
///
/// # Errors
///
/// Returns [`LoadError::InvalidWord`] for the first line that is not a hex word.
pub fn parse_program(text: &str) -> Result<Vec<u32>, LoadError> {
    text.lines()
        .enumerate()
        .filter_map(|(n, raw)| {
            let body = raw.split_once('#').map_or(raw, |(code, _)| code).trim();
            (!body.is_empty()).then_some((n + 1, body))
        })
        .map(|(line, body)| {
            parse_word(body).ok_or_else(|| LoadError::InvalidWord {
                line,
                text: body.to_owned(),
            })
        })
        .collect()
}

/// Reads and parses a program listing from disk.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise as [`parse_program`].
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u32>, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_program(&text)
}

/// Parses a single 32-bit word written in hex.
///
/// The `0x`/`0X` prefix is optional and `_` separators are ignored. Between one and eight
/// hex digits are accepted; anything else (signs included) yields `None`.
pub fn parse_word(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
        .replace('_', "");
    if digits.is_empty() || digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

/// Parses a `NAME=VALUE` register assignment.
///
/// `VALUE` is signed decimal, or hex with a `0x` prefix taken as the raw bit pattern.
///
/// # Errors
///
/// [`LoadError::InvalidAssignment`] without an `=`, [`LoadError::Register`] for an unknown
/// name, [`LoadError::InvalidValue`] for a value that does not fit 32 bits.
pub fn parse_assignment(
    text: &str,
    canonical: &dyn CanonicalNames,
) -> Result<(usize, i32), LoadError> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| LoadError::InvalidAssignment(text.to_owned()))?;
    let idx = abi::resolve(name.trim(), canonical)?;
    let value = value.trim();
    let val = parse_value(value).ok_or_else(|| LoadError::InvalidValue(value.to_owned()))?;
    Ok((idx, val))
}

fn parse_value(text: &str) -> Option<i32> {
    if text.starts_with("0x") || text.starts_with("0X") {
        parse_word(text).map(|v| v as i32)
    } else {
        text.parse().ok()
    }
}
