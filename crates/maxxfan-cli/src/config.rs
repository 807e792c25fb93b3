//! CLI configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/maxxfan/config.toml` by default:
//!
//! ```toml
//! [link]
//! protocol = "maxxfan"
//! repeat_count = 4
//! inter_frame_gap_ms = 50
//! dedup_window_ms = 150
//!
//! [command]
//! fan_speed = 30
//! auto_temperature = 72
//! ```

use std::path::{Path, PathBuf};

use maxxfan_core::{Command, CommandBuilder};
use maxxfan_link::LinkConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Configuration for the maxxfan CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Repeat and deduplication policy.
    pub link: LinkConfig,

    /// Default command fields.
    pub command: CommandBuilder,
}

impl CliConfig {
    /// Loads configuration from `path`, or from the default path when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    debug!(path = %path.display(), "No config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CliError::config(format!("failed to parse {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("maxxfan")
    }

    /// The `[command]` table as a validated command.
    pub fn command(&self) -> CliResult<Command> {
        Ok(self.command.build()?)
    }

    /// Validates every section.
    pub fn validate(&self) -> CliResult<()> {
        self.link.validate()?;
        self.command()?;
        Ok(())
    }

    /// Serialises the configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("failed to serialize config: {}", e)))
    }
}
