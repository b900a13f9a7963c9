//! Mathematical utility functions for DSP.
//!
//! Level conversions run in `f64` because lookup tables and thresholds are
//! built in double precision; measurement helpers work on `f32` buffers.
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Utilities
//!
//! - [`lerp`] - Linear interpolation
//! - [`peak`] / [`rms`] - Buffer level measurement

use libm::{exp, log, sqrt};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use rasp_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-12);
/// assert!((db_to_linear(-6.0206) - 0.5).abs() < 1e-4);
/// ```
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f64 = core::f64::consts::LN_10 / 20.0;
    exp(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below zero are floored at 1e-10 (-200 dB).
///
/// # Example
/// ```rust
/// use rasp_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 1e-12);
/// assert!((linear_to_db(0.5) + 6.0206).abs() < 1e-3);
/// ```
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    const FACTOR: f64 = 20.0 / core::f64::consts::LN_10;
    log(linear.max(1e-10)) * FACTOR
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Absolute peak of a buffer (0.0 when empty).
#[inline]
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

/// Root-mean-square level of a buffer (0.0 when empty).
///
/// Accumulates in `f64` so long buffers do not lose precision.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    sqrt(sum / samples.len() as f64) as f32
}
