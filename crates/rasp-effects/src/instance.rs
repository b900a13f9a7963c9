//! Per-channel processing state.
//!
//! An [`InstanceState`] owns everything that changes sample to sample for one
//! channel: the DC filter history, the sample counter and the configuration
//! it is currently running with. The transfer table itself is shared and
//! passed in on every call.

use rasp_core::DcBlocker;

use crate::params::DistortionParams;
use crate::shaper::Waveshaper;
use crate::table::ShaperTable;

/// Mutable state for one independent processing stream.
///
/// # Example
///
/// ```rust
/// use rasp_effects::{DistortionParams, InstanceState, ShaperTable};
///
/// let params = DistortionParams::default().with_param1(0.0).with_param2(0.0);
/// let table = ShaperTable::build(&params);
/// let mut channel = InstanceState::new(&params, 48000.0);
///
/// let input = [0.0, 0.1, 0.9];
/// let mut output = [0.0; 3];
/// assert_eq!(channel.process_block(&table, &input, &mut output), 3);
/// assert_eq!(channel.samples_processed(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct InstanceState {
    sample_rate: f32,
    samples_processed: u64,
    active: DistortionParams,
    shaper: Waveshaper,
    dc: DcBlocker,
}

impl InstanceState {
    /// Create an instance running `params` at `sample_rate`.
    pub fn new(params: &DistortionParams, sample_rate: f32) -> Self {
        let active = params.sanitized();
        Self {
            sample_rate,
            samples_processed: 0,
            active,
            shaper: Waveshaper::new(active.interpolation),
            dc: DcBlocker::new(sample_rate),
        }
    }

    /// Start a new stream at `sample_rate`.
    ///
    /// Resets the sample counter and DC filter history and re-derives the
    /// filter window.
    pub fn init(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.samples_processed = 0;
        self.dc.set_sample_rate(sample_rate);
    }

    /// Shape `input` into `output` and return the number of samples written.
    ///
    /// If `table` was built from a different configuration than the one this
    /// instance is running, the instance switches to it first.
    ///
    /// # Panics
    /// Panics if `input.len() != output.len()`.
    pub fn process_block(
        &mut self,
        table: &ShaperTable,
        input: &[f32],
        output: &mut [f32],
    ) -> usize {
        assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        self.adopt(table);
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.tick(table, *inp);
        }
        input.len()
    }

    /// Shape one sample.
    #[inline]
    pub fn process_sample(&mut self, table: &ShaperTable, input: f32) -> f32 {
        self.adopt(table);
        self.tick(table, input)
    }

    /// Sample rate of the current stream.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Samples processed since the last [`init`](Self::init).
    pub fn samples_processed(&self) -> u64 {
        self.samples_processed
    }

    /// Configuration this instance is currently running.
    pub fn active_params(&self) -> &DistortionParams {
        &self.active
    }

    /// DC filter state.
    pub fn dc_blocker(&self) -> &DcBlocker {
        &self.dc
    }

    fn adopt(&mut self, table: &ShaperTable) {
        let next = table.params();
        if *next == self.active {
            return;
        }
        if next.dc_block && !self.active.dc_block {
            self.dc.reset();
        }
        self.active = *next;
        self.shaper = Waveshaper::new(next.interpolation);
    }

    #[inline]
    fn tick(&mut self, table: &ShaperTable, input: f32) -> f32 {
        let drive = table.drive();
        let mut y = input;
        for _ in 0..=self.active.repeats {
            y = self.shaper.shape(table, (f64::from(y) * drive) as f32);
        }
        // Dry signal shares the table's input domain; NaN carries no signal.
        let dry = if input.is_nan() {
            0.0
        } else {
            f64::from(input.clamp(-1.0, 1.0))
        };
        let mut out = (f64::from(y) * table.output_level() + dry * table.residual()) as f32;
        if self.active.dc_block {
            out = self.dc.process(out);
        }
        self.samples_processed += 1;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::shaper::Interpolation;

    const SR: f32 = 48000.0;

    fn run(params: &DistortionParams, input: &[f32]) -> Vec<f32> {
        let table = ShaperTable::build(params);
        let mut state = InstanceState::new(params, SR);
        let mut output = vec![0.0; input.len()];
        state.process_block(&table, input, &mut output);
        output
    }

    #[test]
    fn test_hard_clip_clips_to_threshold() {
        let params = DistortionParams::default()
            .with_threshold_db(-6.020_599_913_279_624)
            .with_param1(0.0)
            .with_param2(0.0)
            .with_repeats(0);
        let out = run(&params, &[0.8]);
        assert_eq!(out[0], 0.5);
    }

    #[test]
    fn test_full_wave_rectifier() {
        let params = DistortionParams::default()
            .with_curve(Curve::Rectifier)
            .with_param1(100.0)
            .with_repeats(0);
        let out = run(&params, &[-0.3]);
        assert!((out[0] - 0.3).abs() < 1e-3, "got {}", out[0]);
    }

    #[test]
    fn test_repeats_change_sub_threshold_samples_only() {
        let base = DistortionParams::default()
            .with_threshold_db(-6.0)
            .with_param1(50.0)
            .with_param2(0.0);
        let input = [0.1, 0.2, 0.9, -0.95];
        let once = run(&base.with_repeats(0), &input);
        let thrice = run(&base.with_repeats(2), &input);
        assert_ne!(once, thrice);
        for i in 2..4 {
            assert_eq!(once[i], thrice[i], "clipped sample {i}");
        }
        assert!(thrice[0].abs() > once[0].abs());
    }

    #[test]
    fn test_counter_and_init() {
        let params = DistortionParams::default();
        let table = ShaperTable::build(&params);
        let mut state = InstanceState::new(&params, SR);
        let mut out = [0.0; 64];
        state.process_block(&table, &[0.1; 64], &mut out);
        assert_eq!(state.samples_processed(), 64);
        state.init(44100.0);
        assert_eq!(state.samples_processed(), 0);
        assert_eq!(state.sample_rate(), 44100.0);
        assert_eq!(state.dc_blocker().window_len(), 2205);
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        let params = DistortionParams::default();
        let table = ShaperTable::build(&params);
        let mut state = InstanceState::new(&params, SR);
        let mut out = [0.0; 2];
        state.process_block(&table, &[0.0; 3], &mut out);
    }

    #[test]
    fn test_empty_block() {
        let params = DistortionParams::default();
        let table = ShaperTable::build(&params);
        let mut state = InstanceState::new(&params, SR);
        assert_eq!(state.process_block(&table, &[], &mut []), 0);
        assert_eq!(state.samples_processed(), 0);
    }

    #[test]
    fn test_dc_block_removes_rectifier_bias() {
        let params = DistortionParams::default()
            .with_curve(Curve::Rectifier)
            .with_param1(100.0)
            .with_dc_block(true)
            .with_repeats(0);
        let input: Vec<f32> = (0..9600)
            .map(|i| libm::sinf(i as f32 * 2.0 * core::f32::consts::PI * 441.0 / SR) * 0.8)
            .collect();
        let out = run(&params, &input);
        let tail = &out[4800..];
        let mean: f32 = tail.iter().sum::<f32>() / tail.len() as f32;
        assert!(mean.abs() < 0.01, "residual DC {mean}");
    }

    #[test]
    fn test_dc_filter_reset_on_enable() {
        let off = DistortionParams::default()
            .with_curve(Curve::Rectifier)
            .with_param1(100.0);
        let on = off.with_dc_block(true);
        let mut state = InstanceState::new(&on, SR);
        let mut out = [0.0; 32];

        state.process_block(&ShaperTable::build(&on), &[0.5; 32], &mut out);
        assert_eq!(state.dc_blocker().filled(), 32);

        // Disabled: history left untouched.
        state.process_block(&ShaperTable::build(&off), &[0.5; 32], &mut out);
        assert_eq!(state.dc_blocker().filled(), 32);

        // Re-enabled: history starts over.
        state.process_block(&ShaperTable::build(&on), &[0.5; 4], &mut out[..4]);
        assert_eq!(state.dc_blocker().filled(), 4);
        assert!(state.active_params().dc_block);
    }

    #[test]
    fn test_adopts_interpolation() {
        let params = DistortionParams::default();
        let mut state = InstanceState::new(&params, SR);
        let linear = params.with_interpolation(Interpolation::Linear);
        state.process_sample(&ShaperTable::build(&linear), 0.1);
        assert_eq!(state.active_params().interpolation, Interpolation::Linear);
    }

    #[test]
    fn test_hard_limiter_mix() {
        let params = DistortionParams::default()
            .with_curve(Curve::HardLimiter)
            .with_threshold_db(-6.0)
            .with_param1(100.0)
            .with_param2(50.0)
            .with_repeats(0);
        let t = params.threshold_linear();
        let out = run(&params, &[0.9]);
        // shaped * (p1 - p2) + dry * p2
        let expected = t * 0.5 + 0.9 * 0.5;
        assert!((f64::from(out[0]) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_non_finite_input_does_not_poison_stream() {
        for dc_block in [false, true] {
            for curve in [Curve::HardClip, Curve::Rectifier, Curve::HardLimiter] {
                let params = DistortionParams::default()
                    .with_curve(curve)
                    .with_param1(100.0)
                    .with_param2(0.0)
                    .with_dc_block(dc_block)
                    .with_repeats(0);
                let mut input = vec![f32::INFINITY, f32::NEG_INFINITY, f32::NAN];
                input.extend(core::iter::repeat_n(0.25, 4800));
                let out = run(&params, &input);
                assert!(
                    out.iter().all(|s| s.is_finite()),
                    "{curve:?} dc_block={dc_block}: non-finite output"
                );
            }
        }
    }

    #[test]
    fn test_infinite_input_clamps_to_table_end() {
        let params = DistortionParams::default()
            .with_threshold_db(-6.020_599_913_279_624)
            .with_param1(0.0)
            .with_param2(0.0)
            .with_repeats(0);
        let out = run(&params, &[f32::INFINITY, f32::NEG_INFINITY]);
        assert_eq!(out, [0.5, -0.5]);
    }

    #[test]
    fn test_hard_limiter_clamps_infinite_dry_signal() {
        let params = DistortionParams::default()
            .with_curve(Curve::HardLimiter)
            .with_threshold_db(-6.0)
            .with_param1(100.0)
            .with_param2(100.0)
            .with_repeats(0);
        let out = run(&params, &[f32::INFINITY, f32::NEG_INFINITY]);
        assert_eq!(out, [1.0, -1.0]);
    }
}
