//! Configuration for the reference host.
//!
//! This module defines the configuration structures used to parameterize the reference
//! `Machine`. It provides:
//! 1. **Defaults:** Baseline memory map and run limits.
//! 2. **Structures:** `general` (tracing, step limit) and `memory` (segment layout) sections.
//! 3. **Loading:** JSON deserialization with every field optional.

use serde::Deserialize;

/// Default configuration constants for the reference host.
mod defaults {
    /// Base address of the text segment (MIPS convention).
    ///
    /// Programs are loaded here and execution starts at this address.
    pub const TEXT_BASE: u32 = 0x0040_0000;

    /// Base address of the data segment (MIPS convention).
    pub const DATA_BASE: u32 = 0x1001_0000;

    /// Size of the data segment in bytes (64 KiB).
    pub const DATA_SIZE: u32 = 64 * 1024;

    /// Maximum number of instructions a single run may retire.
    ///
    /// Guards against programs that loop forever.
    pub const MAX_STEPS: u64 = 1_000_000;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use mystic_core::config::Config;
///
/// let json = r#"{ "general": { "trace": true }, "memory": { "data_size": 4096 } }"#;
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.memory.data_size, 4096);
/// assert_eq!(config.memory.text_base, 0x0040_0000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// General simulation settings.
    pub general: GeneralConfig,
    /// Memory map.
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not valid JSON or names an unknown
    /// field.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Log every retired instruction at `debug` level.
    pub trace: bool,

    /// Maximum number of instructions one `run` may retire.
    pub max_steps: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_steps: defaults::MAX_STEPS,
        }
    }
}

/// Memory map of the reference host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryConfig {
    /// Load address of the program and initial PC.
    pub text_base: u32,

    /// Base address of the data segment.
    pub data_base: u32,

    /// Size of the data segment in bytes (rounded down to whole words).
    pub data_size: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            text_base: defaults::TEXT_BASE,
            data_base: defaults::DATA_BASE,
            data_size: defaults::DATA_SIZE,
        }
    }
}
