//! load configuration

use std::path::Path;

use kv_rs::mvcc::IsolationLevel;
use serde_derive::{Deserialize, Serialize};

pub const DEFAULT_PROMPT: &str = "kvcli";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigLoad {
    /// isolation level applied to every transaction begun in this session
    pub default_isolation: IsolationLevelConfig,

    pub prompt: Option<String>,

    pub debug: Option<bool>,

    pub log_level: Option<String>,
}

/// `serde`-friendly mirror of [`IsolationLevel`]; kept separate so the
/// engine crate's own type doesn't need to derive config-file parsing
/// concerns it otherwise has no use for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsolationLevelConfig {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Snapshot,
    Serializable,
}

impl From<IsolationLevelConfig> for IsolationLevel {
    fn from(c: IsolationLevelConfig) -> Self {
        match c {
            IsolationLevelConfig::ReadUncommitted => IsolationLevel::ReadUncommitted,
            IsolationLevelConfig::ReadCommitted => IsolationLevel::ReadCommitted,
            IsolationLevelConfig::RepeatableRead => IsolationLevel::RepeatableRead,
            IsolationLevelConfig::Snapshot => IsolationLevel::Snapshot,
            IsolationLevelConfig::Serializable => IsolationLevel::Serializable,
        }
    }
}

impl Default for ConfigLoad {
    fn default() -> Self {
        ConfigLoad {
            default_isolation: IsolationLevelConfig::Snapshot,
            prompt: Some(DEFAULT_PROMPT.to_string()),
            debug: Some(false),
            log_level: Some("info".to_string()),
        }
    }
}

impl ConfigLoad {
    /// Loads config from a TOML file, falling back to defaults if the file
    /// doesn't exist or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => ConfigLoad::default(),
        }
    }

    pub fn terminal_update(&mut self) {
        self.debug = Some(true);
    }

    pub fn isolation_level(&self) -> IsolationLevel {
        self.default_isolation.into()
    }
}
