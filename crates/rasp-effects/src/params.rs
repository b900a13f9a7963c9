//! Distortion configuration.
//!
//! [`DistortionParams`] is the single configuration record handed to the
//! table builder and copied into every processing instance. Values outside
//! their documented range are clamped by [`DistortionParams::sanitized`],
//! never rejected; strict validation belongs to the host.

use rasp_core::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo, db_to_linear};

use crate::curve::Curve;
use crate::shaper::Interpolation;

/// Threshold range in dB.
pub const THRESHOLD_DB_RANGE: (f64, f64) = (-100.0, 0.0);
/// Noise floor range in dB.
pub const NOISE_FLOOR_DB_RANGE: (f64, f64) = (-80.0, -20.0);
/// Range of the two generic percent parameters.
pub const PERCENT_RANGE: (f64, f64) = (0.0, 100.0);
/// Maximum number of extra shaping passes per sample.
pub const MAX_REPEATS: u32 = 5;

/// Number of parameters exposed through [`rasp_core::ParameterInfo`].
pub const PARAM_COUNT: usize = 7;

/// Parameter indices, in [`ParameterInfo`](rasp_core::ParameterInfo) order.
pub mod param {
    /// Curve selector (0..=10)
    pub const CURVE: usize = 0;
    /// DC block switch (0 / 1)
    pub const DC_BLOCK: usize = 1;
    /// Threshold in dB
    pub const THRESHOLD: usize = 2;
    /// Noise floor in dB
    pub const NOISE_FLOOR: usize = 3;
    /// Parameter 1 in percent
    pub const PARAM1: usize = 4;
    /// Parameter 2 in percent
    pub const PARAM2: usize = 5;
    /// Extra shaping passes (0..=5)
    pub const REPEATS: usize = 6;
}

/// Full configuration of the distortion effect.
///
/// ## Parameters
/// - `curve`: Transfer-curve family (default HardClip)
/// - `dc_block`: Remove DC bias after shaping (default off)
/// - `threshold_db`: Clipping level, -100 to 0 dB (default -6.0)
/// - `noise_floor_db`: Leveller floor, -80 to -20 dB (default -70.0)
/// - `param1`: First curve-specific amount, 0 to 100 % (default 50.0)
/// - `param2`: Second curve-specific amount, 0 to 100 % (default 50.0)
/// - `repeats`: Extra shaping passes per sample, 0 to 5 (default 1)
/// - `interpolation`: Table lookup mode (default nearest index)
///
/// # Example
///
/// ```rust
/// use rasp_effects::{Curve, DistortionParams};
///
/// let params = DistortionParams::default()
///     .with_curve(Curve::SoftClip)
///     .with_threshold_db(-12.0)
///     .with_param2(80.0);
/// assert_eq!(params.curve, Curve::SoftClip);
/// assert!((params.threshold_linear() - 0.2512).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortionParams {
    /// Transfer-curve family
    pub curve: Curve,
    /// DC blocking after shaping
    pub dc_block: bool,
    /// Threshold in dB
    pub threshold_db: f64,
    /// Leveller noise floor in dB
    pub noise_floor_db: f64,
    /// Curve-specific amount, percent
    pub param1: f64,
    /// Curve-specific amount, percent
    pub param2: f64,
    /// Extra shaping passes per sample
    pub repeats: u32,
    /// Table lookup mode
    pub interpolation: Interpolation,
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            curve: Curve::HardClip,
            dc_block: false,
            threshold_db: -6.0,
            noise_floor_db: -70.0,
            param1: 50.0,
            param2: 50.0,
            repeats: 1,
            interpolation: Interpolation::None,
        }
    }
}

impl DistortionParams {
    /// Set the curve family.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Enable or disable DC blocking.
    pub fn with_dc_block(mut self, dc_block: bool) -> Self {
        self.dc_block = dc_block;
        self
    }

    /// Set the threshold in dB.
    pub fn with_threshold_db(mut self, db: f64) -> Self {
        self.threshold_db = db;
        self
    }

    /// Set the noise floor in dB.
    pub fn with_noise_floor_db(mut self, db: f64) -> Self {
        self.noise_floor_db = db;
        self
    }

    /// Set parameter 1 (percent).
    pub fn with_param1(mut self, value: f64) -> Self {
        self.param1 = value;
        self
    }

    /// Set parameter 2 (percent).
    pub fn with_param2(mut self, value: f64) -> Self {
        self.param2 = value;
        self
    }

    /// Set the number of extra shaping passes.
    pub fn with_repeats(mut self, repeats: u32) -> Self {
        self.repeats = repeats;
        self
    }

    /// Set the lookup mode.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Copy with every numeric field clamped into range.
    ///
    /// Non-finite values fall back to the field default.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            threshold_db: clamp_or(self.threshold_db, THRESHOLD_DB_RANGE, defaults.threshold_db),
            noise_floor_db: clamp_or(
                self.noise_floor_db,
                NOISE_FLOOR_DB_RANGE,
                defaults.noise_floor_db,
            ),
            param1: clamp_or(self.param1, PERCENT_RANGE, defaults.param1),
            param2: clamp_or(self.param2, PERCENT_RANGE, defaults.param2),
            repeats: self.repeats.min(MAX_REPEATS),
            ..self
        }
    }

    /// Threshold as linear amplitude, always in `[1e-5, 1]`.
    pub fn threshold_linear(&self) -> f64 {
        db_to_linear(clamp_or(self.threshold_db, THRESHOLD_DB_RANGE, -6.0))
    }

    /// Noise floor as linear amplitude.
    pub fn noise_floor_linear(&self) -> f64 {
        db_to_linear(clamp_or(self.noise_floor_db, NOISE_FLOOR_DB_RANGE, -70.0))
    }

    /// Descriptor for the parameter at `index`.
    pub fn descriptor(index: usize) -> Option<ParamDescriptor> {
        let desc = match index {
            param::CURVE => ParamDescriptor::stepped(
                "Distortion type",
                "Type",
                0.0,
                (Curve::ALL.len() - 1) as f32,
                0.0,
            )
            .with_id(ParamId(100), "curve"),
            param::DC_BLOCK => {
                ParamDescriptor::toggle("DC blocking filter", "DC Block", false)
                    .with_id(ParamId(101), "dc_block")
            }
            param::THRESHOLD => ParamDescriptor::gain_db(
                "Clipping level",
                "Thresh",
                THRESHOLD_DB_RANGE.0 as f32,
                THRESHOLD_DB_RANGE.1 as f32,
                -6.0,
            )
            .with_id(ParamId(102), "threshold"),
            param::NOISE_FLOOR => ParamDescriptor::gain_db(
                "Noise floor",
                "Floor",
                NOISE_FLOOR_DB_RANGE.0 as f32,
                NOISE_FLOOR_DB_RANGE.1 as f32,
                -70.0,
            )
            .with_id(ParamId(103), "noise_floor"),
            param::PARAM1 => ParamDescriptor::percent("Parameter 1", "Param 1", 50.0)
                .with_id(ParamId(104), "param1"),
            param::PARAM2 => ParamDescriptor::percent("Parameter 2", "Param 2", 50.0)
                .with_id(ParamId(105), "param2"),
            param::REPEATS => {
                ParamDescriptor::stepped("Repeats", "Repeats", 0.0, MAX_REPEATS as f32, 1.0)
                    .with_id(ParamId(106), "repeats")
            }
            _ => return None,
        };
        Some(desc)
    }

    /// Value of the parameter at `index` as a host-facing `f32`.
    ///
    /// Returns 0.0 for out-of-range indices.
    pub fn get(&self, index: usize) -> f32 {
        match index {
            param::CURVE => self.curve.index() as f32,
            param::DC_BLOCK => {
                if self.dc_block {
                    1.0
                } else {
                    0.0
                }
            }
            param::THRESHOLD => self.threshold_db as f32,
            param::NOISE_FLOOR => self.noise_floor_db as f32,
            param::PARAM1 => self.param1 as f32,
            param::PARAM2 => self.param2 as f32,
            param::REPEATS => self.repeats as f32,
            _ => 0.0,
        }
    }

    /// Set the parameter at `index`, clamped by its descriptor.
    ///
    /// Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        let Some(desc) = Self::descriptor(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            param::CURVE => {
                if let Some(curve) = Curve::from_index(value as usize) {
                    self.curve = curve;
                }
            }
            param::DC_BLOCK => self.dc_block = value >= 0.5,
            param::THRESHOLD => self.threshold_db = f64::from(value),
            param::NOISE_FLOOR => self.noise_floor_db = f64::from(value),
            param::PARAM1 => self.param1 = f64::from(value),
            param::PARAM2 => self.param2 = f64::from(value),
            param::REPEATS => self.repeats = value as u32,
            _ => {}
        }
    }

    /// Unit of the parameter at `index`, for display.
    pub fn unit(index: usize) -> ParamUnit {
        Self::descriptor(index).map_or(ParamUnit::None, |d| d.unit)
    }
}

impl ParameterInfo for DistortionParams {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        Self::descriptor(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.get(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.set(index, value);
    }
}

fn clamp_or(value: f64, (min, max): (f64, f64), fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else if value == f64::INFINITY {
        max
    } else if value == f64::NEG_INFINITY {
        min
    } else {
        fallback
    }
}
