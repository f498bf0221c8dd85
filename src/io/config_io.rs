use std::fs;
use std::path::{Path, PathBuf};

use crate::model::ClientConfig;

/// Error type for config file access
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot determine config directory")]
    NoConfigDir,
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Path to config.toml under the platform config directory
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("zelvo").join("config.toml"))
}

/// Read the config, defaulting when the file does not exist yet
pub fn read_config() -> Result<ClientConfig, ConfigError> {
    read_config_from(&config_path()?)
}

pub fn read_config_from(path: &Path) -> Result<ClientConfig, ConfigError> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Write the config, creating parent directories as needed
pub fn write_config(config: &ClientConfig) -> Result<(), ConfigError> {
    write_config_to(&config_path()?, config)
}

pub fn write_config_to(path: &Path, config: &ClientConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let text = toml::to_string_pretty(config)?;
    fs::write(path, text).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
