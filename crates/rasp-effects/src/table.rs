//! Transfer-table construction.
//!
//! A [`ShaperTable`] samples one transfer curve at `TABLE_SIZE` evenly spaced
//! points across the input range `[-1, 1]`:
//!
//! ```text
//! index:   0 ........ 1024 ........ 2048
//! input:  -1.0        0.0           1.0
//! ```
//!
//! Odd-symmetric families fill indices `1024..=2048` and mirror them onto the
//! negative half with `table[n] = -table[2048 - n]`. Even harmonics, the
//! rectifier and the hard limiter are filled across the whole range.
//!
//! Alongside the values the table carries the scalars the block processor
//! needs, so the audio path never branches on the curve family:
//!
//! | scalar         | applied                          |
//! |----------------|----------------------------------|
//! | `drive`        | input of every pass              |
//! | `makeup_gain`  | output of every lookup           |
//! | `output_level` | once, after the final pass       |
//! | `residual`     | dry input mixed in after that    |

use core::f64::consts::{FRAC_PI_2, PI};

use libm::{exp, floor, log, log1p, pow, sin, sqrt, tanh};

use crate::curve::Curve;
use crate::params::DistortionParams;

/// Table resolution per unit of input amplitude.
pub const STEPS: usize = 1024;
/// Number of entries: `[-1, 1]` at `1 / STEPS` spacing, both ends included.
pub const TABLE_SIZE: usize = 2 * STEPS + 1;

/// Leveller gain applied within each level band.
const LEVELLER_GAIN_FACTORS: [f64; 6] = [0.80, 1.00, 1.20, 1.20, 1.00, 0.80];

/// Precomputed transfer curve plus the gains that go with it.
///
/// Built once per configuration change and treated as immutable afterwards;
/// processing instances share it through an `Arc`.
///
/// # Example
///
/// ```rust
/// use rasp_effects::{Curve, DistortionParams, ShaperTable, table::STEPS};
///
/// let params = DistortionParams::default().with_curve(Curve::Rectifier).with_param1(100.0);
/// let table = ShaperTable::build(&params);
/// // Full-wave: -0.5 maps to +0.5.
/// assert!((table.values()[STEPS / 2] - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShaperTable {
    values: Box<[f64; TABLE_SIZE]>,
    makeup_gain: f64,
    drive: f64,
    output_level: f64,
    residual: f64,
    params: DistortionParams,
}

impl ShaperTable {
    /// Build the table for a configuration.
    ///
    /// Parameters are clamped first, so any input produces a finite table.
    /// Identical configurations produce bit-identical tables.
    pub fn build(params: &DistortionParams) -> Self {
        let params = params.sanitized();
        let threshold = params.threshold_linear();
        let p1 = params.param1 / 100.0;
        let p2 = params.param2 / 100.0;

        let mut values = Box::new([0.0; TABLE_SIZE]);
        let mut makeup_gain = 1.0;
        let mut drive = 1.0;
        let mut output_level = 1.0;
        let mut residual = 0.0;

        match params.curve {
            Curve::HardClip => {
                fill(&mut values, STEPS, |x| x.min(threshold));
                makeup_gain = blend_makeup(1.0 / threshold, p2);
                drive = 1.0 + p1;
            }
            Curve::SoftClip => {
                let ratio = pow(2.0, 7.0 * p1);
                fill(&mut values, STEPS, |x| {
                    if x < threshold {
                        x
                    } else {
                        log_curve(threshold, x, ratio)
                    }
                });
                makeup_gain = blend_makeup(1.0 / log_curve(threshold, 1.0, ratio), p2);
            }
            Curve::HalfSinCurve => {
                fill(&mut values, STEPS, |x| {
                    iterate(x, params.param1 / 20.0, |y| sin(y * FRAC_PI_2))
                });
                output_level = p2;
            }
            Curve::ExpCurve => {
                let amount = exp_amount(params.param1);
                let scale = -1.0 / (1.0 - amount);
                let ln_amount = log(amount);
                fill(&mut values, STEPS, |x| scale * (exp(x * ln_amount) - 1.0));
                output_level = p2;
            }
            Curve::LogCurve => {
                let amount = params.param1;
                if amount == 0.0 {
                    fill(&mut values, STEPS, |x| x);
                } else {
                    let norm = log1p(amount);
                    fill(&mut values, STEPS, |x| log1p(amount * x) / norm);
                }
                output_level = p2;
            }
            Curve::Cubic => {
                let amount = p1 * sqrt(3.0);
                if amount <= 1.0 {
                    // cubic(a·x) / cubic(a) with `a` divided out, exact at a = 0
                    let k = amount * amount / 3.0;
                    fill(&mut values, STEPS, |x| (x - k * x * x * x) / (1.0 - k));
                } else {
                    let gain = 1.0 / cubic(1.0);
                    fill(&mut values, STEPS, |x| gain * cubic(amount * x));
                }
                output_level = p2;
            }
            Curve::EvenHarmonics => {
                let amount = -p1;
                let c = params.param2.max(0.001) / 10.0;
                let k = amount / tanh(c);
                fill(&mut values, 0, |x| (1.0 + amount) * x - x * k * tanh(c * x));
            }
            Curve::SinCurve => {
                fill(&mut values, STEPS, |x| {
                    iterate(x, params.param1 / 20.0, |y| (1.0 + sin(y * PI - FRAC_PI_2)) / 2.0)
                });
                output_level = p2;
            }
            Curve::Leveller => {
                let leveller = Leveller::new(params.noise_floor_linear());
                fill(&mut values, STEPS, |x| {
                    let y = leveller.pass(x);
                    leveller.fractional_pass(y, p1)
                });
            }
            Curve::Rectifier => {
                let amount = params.param1 / 50.0 - 1.0;
                fill(&mut values, 0, |x| if x >= 0.0 { x } else { -x * amount });
            }
            Curve::HardLimiter => {
                fill(&mut values, 0, |x| x.clamp(-threshold, threshold));
                output_level = p1 - p2;
                residual = p2;
            }
        }

        if params.curve.is_symmetric() {
            mirror_negative_half(&mut values);
        }

        Self {
            values,
            makeup_gain,
            drive,
            output_level,
            residual,
            params,
        }
    }

    /// Table entries, index `STEPS` is zero input.
    pub fn values(&self) -> &[f64; TABLE_SIZE] {
        &self.values
    }

    /// Gain applied to every lookup result.
    pub fn makeup_gain(&self) -> f64 {
        self.makeup_gain
    }

    /// Input gain applied before every pass.
    pub fn drive(&self) -> f64 {
        self.drive
    }

    /// Gain applied once after the final pass.
    pub fn output_level(&self) -> f64 {
        self.output_level
    }

    /// Amount of dry input added after the final pass.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// The (clamped) configuration this table was built from.
    pub fn params(&self) -> &DistortionParams {
        &self.params
    }

    /// Curve family of this table.
    pub fn curve(&self) -> Curve {
        self.params.curve
    }

    /// Input amplitude that index `n` represents.
    #[inline]
    pub fn position(n: usize) -> f64 {
        n as f64 / STEPS as f64 - 1.0
    }
}

impl Default for ShaperTable {
    fn default() -> Self {
        Self::build(&DistortionParams::default())
    }
}

/// Logarithmic knee used above the soft-clip threshold.
///
/// Equals `threshold` at `value == threshold` with unit slope there, and
/// flattens faster as `ratio` grows.
pub fn log_curve(threshold: f64, value: f64, ratio: f64) -> f64 {
    threshold + (exp(ratio * (threshold - value)) - 1.0) / -ratio
}

/// `x - x³/3`: odd-harmonic polynomial, monotonic on `[-1, 1]`.
pub fn cubic(x: f64) -> f64 {
    x - x * x * x / 3.0
}

/// Fill entries `start..TABLE_SIZE` with `f(position)`.
fn fill(values: &mut [f64; TABLE_SIZE], start: usize, f: impl Fn(f64) -> f64) {
    for (n, v) in values.iter_mut().enumerate().skip(start) {
        *v = f(ShaperTable::position(n));
    }
}

/// `table[n] = -table[2048 - n]` for the negative half; pins zero to zero.
fn mirror_negative_half(values: &mut [f64; TABLE_SIZE]) {
    values[STEPS] = 0.0;
    for n in 0..STEPS {
        values[n] = -values[2 * STEPS - n];
    }
}

/// Make-up gain blended by parameter 2: 0 leaves unity, 1 applies it fully.
fn blend_makeup(full: f64, amount: f64) -> f64 {
    (1.0 - amount) + full * amount
}

/// Exponential base, kept below 1 so the curve never degenerates.
fn exp_amount(param1: f64) -> f64 {
    rasp_core::db_to_linear(-param1).min(0.999)
}

/// Apply `step` `floor(amount)` times, then a blend of one more step weighted
/// by the fractional part of `amount`.
fn iterate(x: f64, amount: f64, step: impl Fn(f64) -> f64) -> f64 {
    let whole = floor(amount);
    let fraction = amount - whole;
    let mut y = x;
    for _ in 0..whole as usize {
        y = step(y);
    }
    y + (step(y) - y) * fraction
}

/// Piecewise-linear level mapping with six bands.
struct Leveller {
    limits: [f64; 6],
    add_on: [f64; 6],
}

impl Leveller {
    fn new(noise_floor: f64) -> Self {
        let limits = [0.0001, noise_floor, 0.1, 0.3, 0.5, 1.0];
        let mut add_on = [0.0; 6];
        for i in 0..5 {
            add_on[i + 1] =
                add_on[i] + limits[i] * (LEVELLER_GAIN_FACTORS[i] - LEVELLER_GAIN_FACTORS[i + 1]);
        }
        Self { limits, add_on }
    }

    /// Lowest band whose limit is still above `v`, walking down from the top.
    fn band(&self, v: f64) -> usize {
        let mut band = self.limits.len() - 1;
        for i in (0..self.limits.len()).rev() {
            if v < self.limits[i] {
                band = i;
            } else {
                break;
            }
        }
        band
    }

    fn pass(&self, v: f64) -> f64 {
        let band = self.band(v);
        v * LEVELLER_GAIN_FACTORS[band] + self.add_on[band]
    }

    fn fractional_pass(&self, v: f64, amount: f64) -> f64 {
        let band = self.band(v);
        v + amount * (v * (LEVELLER_GAIN_FACTORS[band] - 1.0) + self.add_on[band])
    }
}
