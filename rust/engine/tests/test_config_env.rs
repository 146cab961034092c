use std::env;
use std::io::Write;

use holdem_engine::config::{self, ConfigError, TableConfig, ValueSource, CONFIG_ENV};
use serial_test::serial;

const KEYS: [&str; 7] = [
    CONFIG_ENV,
    "HOLDEM_SMALL_BLIND",
    "HOLDEM_BIG_BLIND",
    "HOLDEM_STARTING_STACK",
    "HOLDEM_TABLE_SIZE",
    "HOLDEM_SEED",
    "HOLDEM_AI_THINKING_MS",
];

fn clear_env() {
    for key in KEYS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn defaults_without_file_or_env() {
    clear_env();
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config, TableConfig::default());
    assert_eq!(resolved.sources.big_blind, ValueSource::Default);
}

#[test]
#[serial]
fn env_overrides_file_and_sources_are_tracked() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "small_blind = 50\nbig_blind = 100\nseed = 3\nstarting_stack = 5000").unwrap();
    env::set_var(CONFIG_ENV, file.path());
    env::set_var("HOLDEM_SEED", "42");
    env::set_var("HOLDEM_TABLE_SIZE", "6");

    let resolved = config::load_with_sources().unwrap();
    clear_env();

    let cfg = resolved.config;
    assert_eq!((cfg.small_blind, cfg.big_blind), (50, 100));
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.table_size, 6);
    assert_eq!(cfg.starting_stack, 5_000);
    assert_eq!(resolved.sources.big_blind, ValueSource::File);
    assert_eq!(resolved.sources.seed, ValueSource::Env);
    assert_eq!(resolved.sources.ai_thinking_ms, ValueSource::Default);
}

#[test]
#[serial]
fn malformed_env_value_is_invalid() {
    clear_env();
    env::set_var("HOLDEM_BIG_BLIND", "lots");
    let err = config::load().unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("HOLDEM_BIG_BLIND")));
}

#[test]
#[serial]
fn missing_config_file_is_an_io_error() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    env::set_var(CONFIG_ENV, dir.path().join("absent.toml"));
    let err = config::load().unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
#[serial]
fn env_can_produce_an_invalid_table() {
    clear_env();
    env::set_var("HOLDEM_TABLE_SIZE", "1");
    let err = config::load().unwrap_err();
    clear_env();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
