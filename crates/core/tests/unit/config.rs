//! # Configuration Tests
//!
//! Defaults, partial JSON documents, rejection of unknown fields, and the effect of the
//! memory map on the reference machine.

use mystic_core::Machine;
use mystic_core::config::{Config, GeneralConfig, MemoryConfig};
use mystic_core::host::MemoryAccess;
use pretty_assertions::assert_eq;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace);
    assert_eq!(config.general.max_steps, 1_000_000);
    assert_eq!(config.memory.text_base, 0x0040_0000);
    assert_eq!(config.memory.data_base, 0x1001_0000);
    assert_eq!(config.memory.data_size, 64 * 1024);
}

#[test]
fn test_section_defaults_match_root() {
    let config = Config::default();
    assert_eq!(config.general, GeneralConfig::default());
    assert_eq!(config.memory, MemoryConfig::default());
}

#[test]
fn test_empty_document_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_partial_document_keeps_other_defaults() {
    let config = Config::from_json(r#"{ "general": { "max_steps": 50 } }"#).unwrap();
    assert_eq!(config.general.max_steps, 50);
    assert!(!config.general.trace);
    assert_eq!(config.memory, MemoryConfig::default());
}

#[test]
fn test_full_document() {
    let json = r#"{
        "general": { "trace": true, "max_steps": 10 },
        "memory": { "text_base": 4096, "data_base": 8192, "data_size": 64 }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(
        config,
        Config {
            general: GeneralConfig {
                trace: true,
                max_steps: 10,
            },
            memory: MemoryConfig {
                text_base: 4096,
                data_base: 8192,
                data_size: 64,
            },
        }
    );
}

#[test]
fn test_unknown_field_is_rejected() {
    assert!(Config::from_json(r#"{ "general": { "trase": true } }"#).is_err());
    assert!(Config::from_json(r#"{ "cache": {} }"#).is_err());
}

#[test]
fn test_wrong_type_is_rejected() {
    assert!(Config::from_json(r#"{ "memory": { "data_size": "big" } }"#).is_err());
}

#[test]
fn test_machine_uses_memory_map() {
    let json = r#"{ "memory": { "data_base": 256, "data_size": 16 } }"#;
    let config = Config::from_json(json).unwrap();
    let mut machine = Machine::new(&config);
    assert_eq!(machine.data().base(), 256);
    assert_eq!(machine.data().size(), 16);
    machine.write_word(268, 9).unwrap();
    assert_eq!(machine.read_word(268), Ok(9));
    assert!(machine.write_word(272, 9).is_err());
}
