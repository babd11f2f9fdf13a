use crate::config::error::ConfigError;
use thiserror::Error;

/// Crate-wide error type for notification dispatch.
///
/// Every caller-input defect (bad target spec, unsupported message body shape,
/// missing template, incomplete message-bus parameters) is reported as
/// [`AppError::Validation`]. The remaining variants cover the collaborators
/// around the core: the transport, configuration loading and unexpected
/// internal failures.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The transport collaborator failed to carry out an API call
    #[error("Transport call failed for {endpoint}")]
    Transport {
        endpoint: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Builds a validation error for `field`.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Builds a transport error for the given endpoint.
    pub fn transport(endpoint: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Transport {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    /// Returns true for caller-input defects.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation { .. })
    }

    /// The human-readable reason of a validation error.
    pub fn reason(&self) -> Option<&str> {
        match self {
            AppError::Validation { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Internal {
            source: error.into(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = error.field().unwrap_or("settings").to_string();
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
