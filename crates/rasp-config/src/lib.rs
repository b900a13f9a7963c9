//! Presets, parameter parsing and validation for the rasp distortion.
//!
//! The effect crates accept any [`DistortionParams`] and clamp them. This
//! crate sits in front of them for hosts and command lines:
//!
//! - **Factory presets**: twenty built-in configurations, looked up by id or name
//! - **Parsing**: `key=value` settings read in each parameter's own units
//! - **Validation**: strict range checks that report every bad field
//! - **Snapshots**: serde views of a configuration for listing and saving
//!
//! # Example
//!
//! ```rust
//! use rasp_config::{apply_settings, get_factory_preset, validate_params};
//!
//! let mut params = get_factory_preset("soft-clip").unwrap().params;
//! apply_settings(&mut params, ["threshold=-18dB", "repeats=2"]).unwrap();
//!
//! assert_eq!(params.threshold_db, -18.0);
//! assert!(validate_params(&params).is_ok());
//! ```
//!
//! [`DistortionParams`]: rasp_effects::DistortionParams

mod error;
mod parse;
mod snapshot;

/// Strict parameter validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FactoryPreset, factory_preset_names, factory_presets, get_factory_preset, is_factory_preset,
};
pub use parse::{ParamChange, apply_param, apply_settings, parse_assignment, parse_param_value};
pub use snapshot::{ParamsSnapshot, PresetSummary};
pub use validation::{ValidationError, ValidationResult, validate_params};
