//! Rasp Effects - Table-driven waveshaping distortion
//!
//! This crate implements a distortion effect whose transfer function is
//! sampled into a lookup table once per configuration and then applied per
//! sample:
//!
//! - [`Curve`] - The 11 transfer-curve families
//! - [`DistortionParams`] - Configuration with clamping and parameter metadata
//! - [`ShaperTable`] - Lookup table plus the gains that accompany it
//! - [`Waveshaper`] - Nearest or linear table lookup
//! - [`InstanceState`] - Per-channel DC filter and counters
//! - [`Distortion`] - Front end owning the shared table and all instances
//!
//! ## Example
//!
//! ```rust
//! use rasp_core::Effect;
//! use rasp_effects::{Curve, Distortion, DistortionParams};
//!
//! let params = DistortionParams::default()
//!     .with_curve(Curve::Rectifier)
//!     .with_param1(100.0)
//!     .with_repeats(0);
//! let mut dist = Distortion::with_params(params, 48000.0);
//!
//! let output = dist.process(-0.3);
//! assert!((output - 0.3).abs() < 1e-3);
//! ```

pub mod curve;
pub mod distortion;
pub mod instance;
pub mod params;
pub mod shaper;
pub mod table;

// Re-export main types at crate root
pub use curve::{Curve, ParseCurveError};
pub use distortion::{Distortion, InstanceId, SharedTable};
pub use instance::InstanceState;
pub use params::{DistortionParams, MAX_REPEATS, PARAM_COUNT};
pub use shaper::{Interpolation, Waveshaper};
pub use table::{STEPS, ShaperTable, TABLE_SIZE};
