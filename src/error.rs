//! Centralized error types for cmdrepl.
//!
//! Errors local to a component (commands, plugins, calculator) are recovered
//! where they happen; `AppError` covers what reaches the application level.
//! Plugin failures never get this far: they are collected in the loader's
//! report and printed as warnings.

use thiserror::Error;

use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// IO errors on the session's input or output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::InvalidEnv { name, value } => {
                    format!("Environment variable {} has an invalid value '{}'.", name, value)
                }
            },
            AppError::Io(_) => "Reading input or writing output failed.".to_string(),
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_user_message_invalid_env() {
        let err = AppError::Config(ConfigError::InvalidEnv {
            name: "CMDREPL_DEBUG".to_string(),
            value: "maybe".to_string(),
        });
        assert!(err.user_message().contains("CMDREPL_DEBUG"));
    }

    #[test]
    fn test_io_error() {
        let err: AppError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert_eq!(err.to_string(), "IO error: closed");
        assert_eq!(err.user_message(), "Reading input or writing output failed.");
    }
}
