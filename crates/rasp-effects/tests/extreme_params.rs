//! Extreme parameter tests for the distortion.
//!
//! Verifies that every curve produces finite output when parameters are set
//! to their minimum and maximum values, and when running at extreme sample
//! rates (8 kHz and 192 kHz).

use rasp_core::{Effect, ParameterInfo};
use rasp_effects::params::param;
use rasp_effects::{Curve, Distortion, Interpolation};

const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
const LOW_SAMPLE_RATE: f32 = 8000.0;
const HIGH_SAMPLE_RATE: f32 = 192000.0;
const NUM_SAMPLES: usize = 1000;

/// Process `NUM_SAMPLES` through an effect and assert all outputs are finite.
fn assert_finite_output(effect: &mut dyn Effect, label: &str) {
    for i in 0..NUM_SAMPLES {
        let input = match i % 4 {
            0 => 1.0,
            1 => -1.0,
            2 => 0.0,
            _ => 4.0,
        };
        let output = effect.process(input);
        assert!(
            output.is_finite(),
            "{}: non-finite output at sample {}: {}",
            label,
            i,
            output
        );
    }
}

/// Set every parameter except the curve to its minimum or maximum.
fn set_all_params(effect: &mut Distortion, max: bool) {
    for i in 0..effect.param_count() {
        if i == param::CURVE {
            continue;
        }
        if let Some(desc) = effect.param_info(i) {
            effect.set_param(i, if max { desc.max } else { desc.min });
        }
    }
}

fn create(curve: Curve, sample_rate: f32) -> Distortion {
    let mut effect = Distortion::new(sample_rate);
    effect.set_param(param::CURVE, curve.index() as f32);
    effect
}

/// Run the full extreme parameter suite for one curve.
fn run_extreme_test(curve: Curve) {
    let name = curve.name();

    for (rate, rate_label) in [
        (DEFAULT_SAMPLE_RATE, "48 kHz"),
        (LOW_SAMPLE_RATE, "8 kHz"),
        (HIGH_SAMPLE_RATE, "192 kHz"),
    ] {
        let mut effect = create(curve, rate);
        assert_finite_output(&mut effect, &format!("{name} ({rate_label})"));

        let mut effect = create(curve, rate);
        set_all_params(&mut effect, false);
        assert_finite_output(&mut effect, &format!("{name} ({rate_label}, all min)"));

        let mut effect = create(curve, rate);
        set_all_params(&mut effect, true);
        assert_finite_output(&mut effect, &format!("{name} ({rate_label}, all max)"));
    }

    let mut effect = create(curve, DEFAULT_SAMPLE_RATE);
    set_all_params(&mut effect, true);
    let params = effect.params().with_interpolation(Interpolation::Linear);
    effect.set_params(params);
    assert_finite_output(&mut effect, &format!("{name} (linear, all max)"));
}

#[test]
fn test_extreme_every_curve() {
    for curve in Curve::ALL {
        run_extreme_test(curve);
    }
}

#[test]
fn test_extreme_non_finite_input() {
    for curve in Curve::ALL {
        let mut effect = create(curve, DEFAULT_SAMPLE_RATE);
        effect.set_param(param::DC_BLOCK, 1.0);
        for input in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let out = effect.process(input);
            // The limiter's dry residual passes non-finite input through.
            if curve != Curve::HardLimiter {
                assert!(out.is_finite(), "{curve:?}: {input} -> {out}");
            }
        }
    }
}
