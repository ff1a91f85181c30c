//! Configuration management for the logging adapter.
//!
//! Settings are resolved from:
//! 1. Default values
//! 2. Config file (`~/.meshlog/config.toml`)
//! 3. Environment variables (see [`MeshlogConfig::with_env`])

mod schema;

pub use schema::{ConfigIssue, FormatConfig, IssueLevel, MeshlogConfig, SinkConfig, TaskConfig};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// Invalid value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Get the default config directory path.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".meshlog")
}

/// Get the default config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Load configuration from the default path.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub async fn load_config() -> ConfigResult<MeshlogConfig> {
    load_config_from(config_path()).await
}

/// Load configuration from a specific path.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub async fn load_config_from(path: impl AsRef<Path>) -> ConfigResult<MeshlogConfig> {
    let path = path.as_ref();
    if !tokio::fs::try_exists(path).await? {
        info!(path = %path.display(), "config file not found, using defaults");
        return Ok(MeshlogConfig::default());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: MeshlogConfig = toml::from_str(&content)?;
    debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Save configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem operation fails.
pub async fn save_config_to(config: &MeshlogConfig, path: impl AsRef<Path>) -> ConfigResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let content = toml::to_string_pretty(config)?;
    tokio::fs::write(path, content).await?;
    info!(path = %path.display(), "saved config file");

    Ok(())
}

/// Write a default config to `path` unless one exists, then load it.
///
/// # Errors
///
/// Returns an error if the file cannot be written, read or parsed.
pub async fn init_config_at(path: impl AsRef<Path>) -> ConfigResult<MeshlogConfig> {
    let path = path.as_ref();
    if !tokio::fs::try_exists(path).await? {
        save_config_to(&MeshlogConfig::default(), path).await?;
        info!("created default config at {}", path.display());
    }

    load_config_from(path).await
}
