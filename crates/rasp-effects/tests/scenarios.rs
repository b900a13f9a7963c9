//! Known-value scenarios for the distortion.
//!
//! Each test pins one documented behaviour to concrete numbers so that a
//! change to the table builder or the block processor shows up here first.

use rasp_core::{Effect, peak, rms};
use rasp_effects::{
    Curve, Distortion, DistortionParams, InstanceState, Interpolation, STEPS, ShaperTable,
};

const SAMPLE_RATE: f32 = 48000.0;

fn sine(freq_hz: f32, amplitude: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * freq_hz * t).sin() * amplitude
        })
        .collect()
}

fn process(params: DistortionParams, input: &[f32]) -> Vec<f32> {
    let mut dist = Distortion::with_params(params, SAMPLE_RATE);
    let mut output = vec![0.0; input.len()];
    assert_eq!(dist.process_block(input, &mut output), input.len());
    output
}

#[test]
fn hard_clip_at_half_scale() {
    let params = DistortionParams::default()
        .with_threshold_db(20.0 * 0.5f64.log10())
        .with_param1(0.0)
        .with_param2(0.0)
        .with_repeats(0);
    let out = process(params, &[0.8, -0.8, 0.25]);
    assert_eq!(out[0], 0.5);
    assert_eq!(out[1], -0.5);
    assert_eq!(out[2], 0.25);
}

#[test]
fn full_wave_rectifier_flips_negative_input() {
    let params = DistortionParams::default()
        .with_curve(Curve::Rectifier)
        .with_param1(100.0)
        .with_repeats(0);
    let out = process(params, &[-0.3]);
    assert!((out[0] - 0.3).abs() < 1e-3, "got {}", out[0]);
}

#[test]
fn half_wave_rectifier_silences_negative_half() {
    let params = DistortionParams::default()
        .with_curve(Curve::Rectifier)
        .with_param1(50.0)
        .with_repeats(0);
    let input = sine(100.0, 0.9, 4800);
    let out = process(params, &input);
    for (x, y) in input.iter().zip(&out) {
        if *x < -1.0 / STEPS as f32 {
            assert_eq!(*y, 0.0);
        }
    }
}

#[test]
fn repeats_differ_below_threshold() {
    let base = DistortionParams::default()
        .with_threshold_db(-6.0)
        .with_param1(50.0)
        .with_param2(0.0);
    let input = sine(220.0, 0.6, 960);
    let once = process(base.with_repeats(0), &input);
    let thrice = process(base.with_repeats(2), &input);
    assert_ne!(once, thrice);
    assert!(rms(&thrice) > rms(&once));
    assert!(peak(&thrice) <= peak(&once) + 1e-6);
}

#[test]
fn extreme_inputs_stay_in_table() {
    for curve in Curve::ALL {
        for interpolation in [Interpolation::None, Interpolation::Linear] {
            let params = DistortionParams::default()
                .with_curve(curve)
                .with_interpolation(interpolation);
            let out = process(params, &[1.0, -1.0, 1.5, -1.5]);
            assert!(out.iter().all(|s| s.is_finite()), "{curve:?}");
        }
    }
}

#[test]
fn dc_block_centres_even_harmonics() {
    let params = DistortionParams::default()
        .with_curve(Curve::EvenHarmonics)
        .with_param1(100.0)
        .with_param2(50.0)
        .with_repeats(0);
    let input = sine(480.0, 0.8, 9600);

    let biased = process(params, &input);
    let blocked = process(params.with_dc_block(true), &input);

    let mean = |s: &[f32]| s.iter().sum::<f32>() / s.len() as f32;
    assert!(mean(&biased[4800..]).abs() > 0.05);
    assert!(mean(&blocked[4800..]).abs() < 0.005);
}

#[test]
fn leveller_flattens_dynamics() {
    let params = DistortionParams::default()
        .with_curve(Curve::Leveller)
        .with_param1(0.0)
        .with_repeats(3);
    let table = ShaperTable::build(&params);
    let mut state = InstanceState::new(&params, SAMPLE_RATE);

    let quiet = sine(440.0, 0.2, 4800);
    let loud = sine(440.0, 0.9, 4800);
    let mut out_quiet = vec![0.0; quiet.len()];
    let mut out_loud = vec![0.0; loud.len()];
    state.process_block(&table, &quiet, &mut out_quiet);
    state.process_block(&table, &loud, &mut out_loud);

    let ratio_in = rms(&loud) / rms(&quiet);
    let ratio_out = rms(&out_loud) / rms(&out_quiet);
    assert!(ratio_out < ratio_in, "{ratio_out} !< {ratio_in}");
}

#[test]
fn hard_limiter_wet_and_residual() {
    let params = DistortionParams::default()
        .with_curve(Curve::HardLimiter)
        .with_threshold_db(-12.0)
        .with_param1(100.0)
        .with_param2(0.0)
        .with_repeats(0);
    let out = process(params, &sine(440.0, 1.0, 480));
    let limit = params.threshold_linear() as f32;
    assert!(peak(&out) <= limit + 1e-6);

    // All residual, no wet: the dry signal passes.
    let dry = params.with_param1(100.0).with_param2(100.0);
    let input = sine(440.0, 1.0, 480);
    let out = process(dry, &input);
    for (x, y) in input.iter().zip(&out) {
        assert!((x - y).abs() < 1e-6);
    }
}

#[test]
fn output_level_scales_overdrive() {
    let input = sine(440.0, 0.7, 480);
    for curve in [Curve::HalfSinCurve, Curve::ExpCurve, Curve::LogCurve, Curve::Cubic] {
        let full = process(
            DistortionParams::default()
                .with_curve(curve)
                .with_param2(100.0)
                .with_repeats(0),
            &input,
        );
        let half = process(
            DistortionParams::default()
                .with_curve(curve)
                .with_param2(50.0)
                .with_repeats(0),
            &input,
        );
        for (a, b) in full.iter().zip(&half) {
            assert!((a * 0.5 - b).abs() < 1e-6, "{curve:?}");
        }
    }
}

#[test]
fn reconfigure_between_blocks() {
    let mut dist = Distortion::new(SAMPLE_RATE);
    let input = sine(440.0, 0.8, 256);
    let mut out = vec![0.0; 256];
    dist.process_block(&input, &mut out);
    let before = out.clone();

    dist.set_params(DistortionParams::default().with_curve(Curve::SinCurve));
    dist.process_block(&input, &mut out);
    assert_ne!(before, out);
    assert_eq!(dist.master().samples_processed(), 512);
}
