//! Application settings.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConfigError, Result};

/// Prefix of every environment variable the shell reads.
pub const ENV_PREFIX: &str = "CMDREPL_";

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory scanned for plugin units.
    pub plugin_dir: Option<PathBuf>,
    /// Prompt printed before each command line.
    pub prompt: String,
    /// Deployment environment name, reported in logs.
    pub environment: String,
    /// Enable debug logging.
    pub debug: bool,
    /// Directory for log files.
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plugin_dir: None,
            prompt: ">>> ".to_string(),
            environment: "production".to_string(),
            debug: false,
            log_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "Loaded configuration file");
                Ok(toml::from_str(&contents)?)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No configuration file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::ReadError(e)),
        }
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// `lookup` receives full variable names such as `CMDREPL_DEBUG`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = EnvOverrides::read(lookup)?;

        if let Some(environment) = overrides.environment {
            self.environment = environment;
        }
        if let Some(debug) = overrides.debug {
            self.debug = debug;
        }
        if let Some(dir) = overrides.plugin_dir {
            self.plugin_dir = Some(dir);
        }
        if let Some(dir) = overrides.log_dir {
            self.log_dir = Some(dir);
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_process_env(&mut self) -> Result<()> {
        self.apply_env(|name| std::env::var(name).ok())
    }
}

/// Values found in the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub environment: Option<String>,
    pub debug: Option<bool>,
    pub plugin_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl EnvOverrides {
    /// Read every supported variable through `lookup`.
    pub fn read<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| {
            let name = format!("{}{}", ENV_PREFIX, suffix);
            lookup(&name)
                .filter(|v| !v.trim().is_empty())
                .map(|v| (name, v))
        };

        let debug = match var("DEBUG") {
            Some((name, value)) => Some(parse_flag(&name, &value)?),
            None => None,
        };

        Ok(Self {
            environment: var("ENVIRONMENT").map(|(_, v)| v.trim().to_string()),
            debug,
            plugin_dir: var("PLUGIN_DIR").map(|(_, v)| PathBuf::from(v)),
            log_dir: var("LOG_DIR").map(|(_, v)| PathBuf::from(v)),
        })
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.prompt, ">>> ");
        assert_eq!(settings.environment, "production");
        assert!(!settings.debug);
        assert!(settings.plugin_dir.is_none());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debug = true\nplugin_dir = \"/srv/plugins\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert!(settings.debug);
        assert_eq!(settings.plugin_dir, Some(PathBuf::from("/srv/plugins")));
        assert_eq!(settings.prompt, ">>> ");
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debug = \"maybe").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut settings = Settings::default();
        settings
            .apply_env(lookup_from(&[
                ("CMDREPL_ENVIRONMENT", "development"),
                ("CMDREPL_DEBUG", "yes"),
                ("CMDREPL_PLUGIN_DIR", "/tmp/plugins"),
            ]))
            .unwrap();

        assert_eq!(settings.environment, "development");
        assert!(settings.debug);
        assert_eq!(settings.plugin_dir, Some(PathBuf::from("/tmp/plugins")));
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let mut settings = Settings::default();
        settings
            .apply_env(lookup_from(&[("CMDREPL_ENVIRONMENT", "  ")]))
            .unwrap();
        assert_eq!(settings.environment, "production");
    }

    #[test]
    fn test_invalid_debug_flag() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env(lookup_from(&[("CMDREPL_DEBUG", "sometimes")]))
            .unwrap_err();
        assert!(err.to_string().contains("CMDREPL_DEBUG"));
    }

    #[test]
    #[serial]
    fn test_apply_process_env() {
        std::env::set_var("CMDREPL_ENVIRONMENT", "staging");
        let mut settings = Settings::default();
        let result = settings.apply_process_env();
        std::env::remove_var("CMDREPL_ENVIRONMENT");

        result.unwrap();
        assert_eq!(settings.environment, "staging");
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings {
            plugin_dir: Some(PathBuf::from("/srv/plugins")),
            debug: true,
            ..Settings::default()
        };

        let toml_str = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, settings);
    }
}
