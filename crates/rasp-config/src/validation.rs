//! Strict parameter validation.
//!
//! The effect itself clamps anything it is given. Hosts that would rather
//! reject bad input than silently clamp it use [`validate_params`], which
//! reports every offending field at once.
//!
//! # Example
//!
//! ```rust
//! use rasp_config::{validate_params, ValidationError};
//! use rasp_effects::DistortionParams;
//!
//! assert!(validate_params(&DistortionParams::default()).is_ok());
//!
//! let bad = DistortionParams::default().with_threshold_db(6.0);
//! assert!(matches!(
//!     validate_params(&bad),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! ```

use rasp_core::ParameterInfo;
use rasp_effects::DistortionParams;
use rasp_effects::params::{
    MAX_REPEATS, NOISE_FLOOR_DB_RANGE, PERCENT_RANGE, THRESHOLD_DB_RANGE, param,
};
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Parameter value is NaN or infinite.
    #[error("parameter '{param}' is not finite")]
    NotFinite {
        /// Name of the parameter.
        param: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check every numeric field of `params` against its documented range.
///
/// Returns the single error when one field is bad and
/// [`ValidationError::Multiple`] when several are.
pub fn validate_params(params: &DistortionParams) -> ValidationResult<()> {
    let mut errors = Vec::new();

    let ranged = [
        (param::THRESHOLD, params.threshold_db, THRESHOLD_DB_RANGE),
        (param::NOISE_FLOOR, params.noise_floor_db, NOISE_FLOOR_DB_RANGE),
        (param::PARAM1, params.param1, PERCENT_RANGE),
        (param::PARAM2, params.param2, PERCENT_RANGE),
    ];
    for (index, value, range) in ranged {
        if let Err(e) = check_range(param_name(params, index), value, range) {
            errors.push(e);
        }
    }

    if params.repeats > MAX_REPEATS {
        errors.push(ValidationError::OutOfRange {
            param: param_name(params, param::REPEATS),
            value: f64::from(params.repeats),
            min: 0.0,
            max: f64::from(MAX_REPEATS),
        });
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

fn check_range(param: String, value: f64, (min, max): (f64, f64)) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { param });
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            param,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn param_name(params: &DistortionParams, index: usize) -> String {
    params
        .param_info(index)
        .map_or_else(|| index.to_string(), |d| d.string_id.to_string())
}
