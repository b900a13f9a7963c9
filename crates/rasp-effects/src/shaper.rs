//! Table lookup.
//!
//! Maps one sample through a [`ShaperTable`]. Inputs outside `[-1, 1]` clamp
//! to the table ends; NaN reads the zero-input entry.

use rasp_core::lerp;

use crate::table::{STEPS, ShaperTable, TABLE_SIZE};

/// Lookup mode for the transfer table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Nearest table entry
    #[default]
    None,
    /// Linear interpolation between the two bracketing entries
    Linear,
}

/// Nearest-entry lookup: `table[round((sample + 1) * STEPS)] * makeup_gain`.
///
/// # Example
///
/// ```rust
/// use rasp_effects::{ShaperTable, shaper::shape};
///
/// let table = ShaperTable::default();
/// assert_eq!(shape(table.values(), 1.0, 0.0), 0.0);
/// ```
#[inline]
pub fn shape(table: &[f64; TABLE_SIZE], makeup_gain: f64, sample: f32) -> f32 {
    (table[nearest_index(sample)] * makeup_gain) as f32
}

/// Linear lookup between `table[i]` and `table[i + 1]`.
#[inline]
pub fn shape_linear(table: &[f64; TABLE_SIZE], makeup_gain: f64, sample: f32) -> f32 {
    let sample = f64::from(sample);
    if sample.is_nan() {
        return (table[STEPS] * makeup_gain) as f32;
    }
    let steps = STEPS as f64;
    let index = (libm::floor(sample * steps) + steps).clamp(0.0, (TABLE_SIZE - 2) as f64);
    let fraction = ((1.0 + sample) * steps - index).clamp(0.0, 1.0);
    let i = index as usize;
    (lerp(table[i], table[i + 1], fraction) * makeup_gain) as f32
}

#[inline]
fn nearest_index(sample: f32) -> usize {
    let position = (f64::from(sample) + 1.0) * STEPS as f64;
    if position.is_nan() {
        return STEPS;
    }
    libm::round(position).clamp(0.0, (TABLE_SIZE - 1) as f64) as usize
}

/// Table lookup with a fixed interpolation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Waveshaper {
    interpolation: Interpolation,
}

impl Waveshaper {
    /// Create a waveshaper with the given lookup mode.
    pub fn new(interpolation: Interpolation) -> Self {
        Self { interpolation }
    }

    /// Current lookup mode.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Shape one sample through `table`, including its make-up gain.
    #[inline]
    pub fn shape(&self, table: &ShaperTable, sample: f32) -> f32 {
        match self.interpolation {
            Interpolation::None => shape(table.values(), table.makeup_gain(), sample),
            Interpolation::Linear => shape_linear(table.values(), table.makeup_gain(), sample),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::params::DistortionParams;

    fn ramp() -> Box<[f64; TABLE_SIZE]> {
        let mut t = Box::new([0.0; TABLE_SIZE]);
        for (n, v) in t.iter_mut().enumerate() {
            *v = n as f64;
        }
        t
    }

    #[test]
    fn test_nearest_index_bounds() {
        assert_eq!(nearest_index(-1.0), 0);
        assert_eq!(nearest_index(1.0), 2 * STEPS);
        assert_eq!(nearest_index(0.0), STEPS);
        assert_eq!(nearest_index(-7.5), 0);
        assert_eq!(nearest_index(3.0), 2 * STEPS);
        assert_eq!(nearest_index(f32::INFINITY), 2 * STEPS);
        assert_eq!(nearest_index(f32::NEG_INFINITY), 0);
        assert_eq!(nearest_index(f32::NAN), STEPS);
    }

    #[test]
    fn test_nearest_rounds() {
        let t = ramp();
        // 0.5 / 1024 past zero rounds away from zero
        assert_eq!(shape(&t, 1.0, 0.5 / 1024.0), 1025.0);
        assert_eq!(shape(&t, 1.0, 0.4 / 1024.0), 1024.0);
    }

    #[test]
    fn test_zero_reads_midpoint_times_gain() {
        for curve in Curve::ALL {
            let table = ShaperTable::build(&DistortionParams::default().with_curve(curve));
            let expected = (table.values()[STEPS] * table.makeup_gain()) as f32;
            assert_eq!(shape(table.values(), table.makeup_gain(), 0.0), expected);
        }
    }

    #[test]
    fn test_linear_interpolates() {
        let t = ramp();
        let y = shape_linear(&t, 1.0, 0.25 / 1024.0);
        assert!((y - 1024.25).abs() < 1e-3);
        assert_eq!(shape_linear(&t, 1.0, 1.0), 2048.0);
        assert_eq!(shape_linear(&t, 1.0, -1.0), 0.0);
        assert_eq!(shape_linear(&t, 1.0, 9.0), 2048.0);
        assert_eq!(shape_linear(&t, 1.0, -9.0), 0.0);
        assert_eq!(shape_linear(&t, 1.0, f32::NAN), 1024.0);
    }

    #[test]
    fn test_makeup_gain_applied() {
        let t = ramp();
        assert_eq!(shape(&t, 0.5, 0.0), 512.0);
        assert_eq!(shape_linear(&t, 2.0, 0.0), 2048.0);
    }

    #[test]
    fn test_waveshaper_modes_agree_on_grid_points() {
        let table = ShaperTable::build(
            &DistortionParams::default()
                .with_curve(Curve::SoftClip)
                .with_param2(100.0),
        );
        let nearest = Waveshaper::new(Interpolation::None);
        let linear = Waveshaper::new(Interpolation::Linear);
        for n in [0usize, 100, 1024, 1500, 2048] {
            let x = ShaperTable::position(n) as f32;
            let a = nearest.shape(&table, x);
            let b = linear.shape(&table, x);
            assert!((a - b).abs() < 1e-6, "index {n}: {a} vs {b}");
        }
    }
}
