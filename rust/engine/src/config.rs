//! Table configuration: defaults, an optional TOML file, then environment
//! overrides. Each resolved value remembers where it came from.

use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";

/// Hard cap on seats at one table.
pub const MAX_TABLE_SIZE: usize = 9;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    pub table_size: usize,
    pub seed: Option<u64>,
    /// Pause a presentation layer inserts before applying an AI action.
    pub ai_thinking_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 25,
            big_blind: 50,
            starting_stack: 2_500,
            table_size: MAX_TABLE_SIZE,
            seed: None,
            ai_thinking_ms: 1_500,
        }
    }
}

impl TableConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.ai_thinking_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(ConfigError::Invalid("blinds must be > 0".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(
                "small_blind must not exceed big_blind".into(),
            ));
        }
        if !(2..=MAX_TABLE_SIZE).contains(&self.table_size) {
            return Err(ConfigError::Invalid(format!(
                "table_size must be between 2 and {MAX_TABLE_SIZE}"
            )));
        }
        if self.starting_stack < self.big_blind {
            return Err(ConfigError::Invalid(
                "starting_stack must cover the big blind".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub starting_stack: ValueSource,
    pub table_size: ValueSource,
    pub seed: ValueSource,
    pub ai_thinking_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            starting_stack: ValueSource::Default,
            table_size: ValueSource::Default,
            seed: ValueSource::Default,
            ai_thinking_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: TableConfig,
    pub sources: ConfigSources,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    table_size: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ai_thinking_ms: Option<u64>,
}

pub fn load() -> Result<TableConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = TableConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        apply_file(&mut cfg, &mut sources, toml::from_str(&s)?);
    }

    if let Some(v) = env_value("HOLDEM_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_BIG_BLIND")? {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_STARTING_STACK")? {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_TABLE_SIZE")? {
        cfg.table_size = v;
        sources.table_size = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("HOLDEM_AI_THINKING_MS")? {
        cfg.ai_thinking_ms = v;
        sources.ai_thinking_ms = ValueSource::Env;
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Parse a TOML document on its own, without consulting the environment.
pub fn from_toml_str(s: &str) -> Result<TableConfig, ConfigError> {
    let mut cfg = TableConfig::default();
    apply_file(&mut cfg, &mut ConfigSources::default(), toml::from_str(s)?);
    cfg.validate()?;
    Ok(cfg)
}

fn apply_file(cfg: &mut TableConfig, sources: &mut ConfigSources, f: FileConfig) {
    if let Some(v) = f.small_blind {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::File;
    }
    if let Some(v) = f.big_blind {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::File;
    }
    if let Some(v) = f.starting_stack {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::File;
    }
    if let Some(v) = f.table_size {
        cfg.table_size = v;
        sources.table_size = ValueSource::File;
    }
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
    if let Some(v) = f.ai_thinking_ms {
        cfg.ai_thinking_ms = v;
        sources.ai_thinking_ms = ValueSource::File;
    }
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {key}: {raw}"))),
        _ => Ok(None),
    }
}
