//! Runtime configuration, read from a TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) is a valid
//! configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::types::{DEFAULT_DROP_MS, FLASH_PAUSE_MS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlipdotConfig {
    /// Fixed seed for the piece sequence; random when unset
    pub seed: Option<u32>,
    /// Gravity interval
    pub drop_interval_ms: u64,
    /// Pause between line-clear flash toggles
    pub flash_pause_ms: u64,
    /// How long each word of the game-over message stays up
    pub message_hold_ms: u64,
    /// Start a new game after game over instead of exiting
    pub restart_on_game_over: bool,
    pub log_file: PathBuf,
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for FlipdotConfig {
    fn default() -> Self {
        Self {
            seed: None,
            drop_interval_ms: DEFAULT_DROP_MS as u64,
            flash_pause_ms: FLASH_PAUSE_MS as u64,
            message_hold_ms: 1500,
            restart_on_game_over: true,
            log_file: PathBuf::from("flipdot-tetris.log"),
            log_level: "info".to_string(),
        }
    }
}

impl FlipdotConfig {
    /// Load from `path`. A file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms)
    }

    pub fn flash_pause(&self) -> Duration {
        Duration::from_millis(self.flash_pause_ms)
    }

    pub fn message_hold(&self) -> Duration {
        Duration::from_millis(self.message_hold_ms)
    }
}
