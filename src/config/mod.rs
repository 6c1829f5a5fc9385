//! Configuration management for cmdrepl.
//!
//! Settings come from an optional TOML file, then environment variables,
//! then command-line flags (applied by the binary).

mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use settings::{EnvOverrides, Settings, ENV_PREFIX};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform configuration directory could be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// The configuration file exists but could not be read.
    #[error("could not read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The configuration file is not valid TOML for `Settings`.
    #[error("could not parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// An environment override has an unusable value.
    #[error("invalid value for {name}: '{value}'")]
    InvalidEnv { name: String, value: String },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Default location of the configuration file.
///
/// - Linux: `~/.config/cmdrepl/config.toml`
/// - macOS: `~/Library/Application Support/cmdrepl/config.toml`
/// - Windows: `C:\Users\<User>\AppData\Roaming\cmdrepl\config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("cmdrepl").join("config.toml"))
}
