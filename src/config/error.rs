//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required layer (`default.toml` or the single selected file) is absent
    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Configuration path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),

    /// The merged layers do not deserialize into `Settings`
    #[error("Settings do not match the notify-dispatch schema: {0}")]
    Deserialize(String),

    /// A setting holds a value the dispatcher or logger cannot use
    #[error("Invalid setting {field}: {message}")]
    ValidationError {
        /// Dotted settings key, e.g. `notify.default_params.target`
        field: String,
        message: String,
    },

    /// `NOTIFY_APP_ENV` names no known environment
    #[error(
        "Unknown environment '{0}' in NOTIFY_APP_ENV, expected development, test, staging or production"
    )]
    UnknownEnvironment(String),

    /// `NOTIFY_CONFIG_DIR` and `NOTIFY_CONFIG_FILE` were both set
    #[error("Conflicting configuration sources: {0}")]
    ConflictingSources(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field of a validation error, `None` for every other variant
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_source() {
        let missing = ConfigError::MissingFile(PathBuf::from("config/default.toml"));
        assert_eq!(
            missing.to_string(),
            "Configuration file not found: config/default.toml"
        );

        let invalid = ConfigError::validation("notify.default_params.target", "must be a string");
        assert_eq!(
            invalid.to_string(),
            "Invalid setting notify.default_params.target: must be a string"
        );
        assert_eq!(invalid.field(), Some("notify.default_params.target"));
        assert!(ConfigError::UnknownEnvironment("qa".into()).field().is_none());
    }
}
