//! Configuration loading
//!
//! Reads `config.toml` from the user's config directory (or an explicit path). A
//! missing file means defaults; a malformed one is an error.

mod types;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use types::{Config, EngineConfig, EntitlementsConfig, SuggestionsConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default config file location: `<config dir>/keycoach/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("keycoach").join("config.toml"))
}

/// Load configuration from `path`, or from the default location when `None`
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => {
                log::debug!("No config directory available, using defaults");
                return Ok(Config::default());
            }
        },
    };

    if !path.exists() {
        log::debug!("Config file {} not found, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = toml::from_str(&content)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
