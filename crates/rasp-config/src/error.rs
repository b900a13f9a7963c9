//! Error types for configuration operations.

use rasp_effects::ParseCurveError;
use thiserror::Error;

/// Errors that can occur while resolving presets and parameter settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Preset not found
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Curve name or index not recognised
    #[error(transparent)]
    UnknownCurve(#[from] ParseCurveError),

    /// Parameter name not recognised
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Setting not of the form `key=value`
    #[error("expected key=value, got '{0}'")]
    MalformedAssignment(String),

    /// Value could not be interpreted for the parameter
    #[error("invalid value '{value}' for parameter '{param}': {reason}")]
    InvalidValue {
        /// Name of the parameter.
        param: String,
        /// The value as given.
        value: String,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Validation errors
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid_value(
        param: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            param: param.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
