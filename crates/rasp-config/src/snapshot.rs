//! Serializable views of a configuration.
//!
//! [`DistortionParams`] stays serde-free so the effect crates carry no
//! serialization dependency. These mirror types name the curve by its id and
//! spell out every field, which keeps saved settings readable and stable
//! across index changes.

use rasp_effects::{Curve, DistortionParams, Interpolation};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, FactoryPreset};

/// Flat, serializable copy of [`DistortionParams`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsSnapshot {
    /// Curve id, e.g. `"soft-clip"`.
    pub curve: String,
    /// DC blocking filter enabled.
    pub dc_block: bool,
    /// Clipping level in dB.
    pub threshold_db: f64,
    /// Leveller noise floor in dB.
    pub noise_floor_db: f64,
    /// Parameter 1, percent.
    pub param1: f64,
    /// Parameter 2, percent.
    pub param2: f64,
    /// Extra passes per sample.
    pub repeats: u32,
    /// Interpolate between table entries.
    #[serde(default)]
    pub interpolate: bool,
}

impl From<&DistortionParams> for ParamsSnapshot {
    fn from(params: &DistortionParams) -> Self {
        Self {
            curve: params.curve.id().to_string(),
            dc_block: params.dc_block,
            threshold_db: params.threshold_db,
            noise_floor_db: params.noise_floor_db,
            param1: params.param1,
            param2: params.param2,
            repeats: params.repeats,
            interpolate: params.interpolation == Interpolation::Linear,
        }
    }
}

impl TryFrom<&ParamsSnapshot> for DistortionParams {
    type Error = ConfigError;

    /// Fails only on an unknown curve. Numeric fields are taken as-is; run
    /// [`validate_params`](crate::validate_params) to reject out-of-range
    /// values.
    fn try_from(snapshot: &ParamsSnapshot) -> Result<Self, Self::Error> {
        let curve: Curve = snapshot.curve.parse()?;
        Ok(DistortionParams {
            curve,
            dc_block: snapshot.dc_block,
            threshold_db: snapshot.threshold_db,
            noise_floor_db: snapshot.noise_floor_db,
            param1: snapshot.param1,
            param2: snapshot.param2,
            repeats: snapshot.repeats,
            interpolation: if snapshot.interpolate {
                Interpolation::Linear
            } else {
                Interpolation::None
            },
        })
    }
}

/// Listing entry for a factory preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetSummary {
    /// Preset id.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Full configuration.
    pub params: ParamsSnapshot,
}

impl From<&FactoryPreset> for PresetSummary {
    fn from(preset: &FactoryPreset) -> Self {
        Self {
            id: preset.id,
            name: preset.name,
            description: preset.description,
            params: ParamsSnapshot::from(&preset.params),
        }
    }
}
