//! Configuration validation logic
//!
//! Checks loaded settings before anything is built from them.

use crate::config::error::ConfigError;
use crate::config::settings::{FileSettings, LoggerSettings, NotifyConfig, Settings};
use crate::models::TARGET_PARAM;
use crate::services::notifications::is_falsy;
use serde_json::Value;

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - At least one output must be enabled
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl NotifyConfig {
    /// Validate notification settings
    ///
    /// # Validation Rules
    /// - A default `target` must be a string
    /// - Template names must not be blank
    /// - Template content must not be empty, or every lookup would fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(target) = self.default_params.get(TARGET_PARAM) {
            if !matches!(target, Value::String(_)) {
                return Err(ConfigError::validation(
                    "notify.default_params.target",
                    format!("Default target must be a comma-separated string, got {target}"),
                ));
            }
        }

        for (name, content) in &self.templates {
            if name.trim().is_empty() {
                return Err(ConfigError::validation(
                    "notify.templates",
                    "Template names must not be blank.",
                ));
            }
            if is_falsy(content) {
                return Err(ConfigError::validation(
                    format!("notify.templates.{name}"),
                    "Template content must not be empty.",
                ));
            }
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.notify.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_logger_invalid_level() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.level");
    }

    #[test]
    fn test_logger_level_case_insensitive() {
        let settings = LoggerSettings {
            level: "WARN".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_logger_requires_an_output() {
        let mut settings = LoggerSettings::default();
        settings.console.enabled = false;
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger");

        settings.file.enabled = true;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_settings_empty_path() {
        let mut settings = LoggerSettings::default();
        settings.file.enabled = true;
        settings.file.path = "  ".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.file.path");
    }

    #[test]
    fn test_file_settings_invalid_format() {
        let mut settings = LoggerSettings::default();
        settings.file.format = "yaml".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.file.format");
    }

    #[test]
    fn test_notify_default_target_must_be_string() {
        let notify = NotifyConfig {
            default_params: json!({"target": ["gchat"]}).as_object().cloned().unwrap(),
            ..Default::default()
        };
        assert_eq!(
            field_of(notify.validate().unwrap_err()),
            "notify.default_params.target"
        );
    }

    #[test]
    fn test_notify_empty_template_rejected() {
        let mut notify = NotifyConfig::default();
        notify.templates.insert("gchat1".to_string(), json!({}));
        assert_eq!(
            field_of(notify.validate().unwrap_err()),
            "notify.templates.gchat1"
        );

        notify
            .templates
            .insert("gchat1".to_string(), json!({"text": "done"}));
        assert!(notify.validate().is_ok());
    }
}
