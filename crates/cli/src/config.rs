//! Configuration file support for the `csl` binary.
//!
//! Looked up in order:
//! 1. the path given with `--config`
//! 2. `./csl.toml`
//! 3. built-in defaults
//!
//! ```toml
//! [log]
//! filter = "csl_kernel=debug,warn"
//!
//! [container]
//! compression_level = 6
//!
//! [bytecode]
//! strict_mask = true
//! ```
//!
//! `RUST_LOG`, when set, takes precedence over `log.filter`.

use csl_container::MAX_LEVEL;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "csl.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("failed to parse config file {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("container.compression_level must be between 0 and {max}, got {found}")]
    InvalidLevel { found: u32, max: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub log: LogConfig,
    pub container: ContainerConfig,
    pub bytecode: BytecodeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
    /// zlib level, 0-9
    pub compression_level: u32,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            compression_level: MAX_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BytecodeConfig {
    /// Reject masks wider than 64 bits instead of truncating them
    pub strict_mask: bool,
}

impl CliConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit config, else `./csl.toml` if it exists, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load(&local);
        }

        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let found = self.container.compression_level;
        if found > MAX_LEVEL {
            return Err(ConfigError::InvalidLevel {
                found,
                max: MAX_LEVEL,
            });
        }
        Ok(())
    }
}
