//! Property-based tests for the table builder and block processor.
//!
//! Uses proptest to check invariants that must hold for every curve and
//! every parameter combination: symmetric tables, finite output, midpoint
//! lookups and the effect of repeat passes.

use proptest::prelude::*;
use rasp_effects::shaper::shape;
use rasp_effects::{
    Curve, DistortionParams, InstanceState, Interpolation, STEPS, ShaperTable, TABLE_SIZE,
};

const SAMPLE_RATE: f32 = 48000.0;

fn arb_curve() -> impl Strategy<Value = Curve> {
    (0usize..Curve::ALL.len()).prop_map(|i| Curve::ALL[i])
}

prop_compose! {
    fn arb_params()(
        curve in arb_curve(),
        dc_block in any::<bool>(),
        threshold_db in -100.0f64..=0.0,
        noise_floor_db in -80.0f64..=-20.0,
        param1 in 0.0f64..=100.0,
        param2 in 0.0f64..=100.0,
        repeats in 0u32..=5,
        linear in any::<bool>(),
    ) -> DistortionParams {
        DistortionParams {
            curve,
            dc_block,
            threshold_db,
            noise_floor_db,
            param1,
            param2,
            repeats,
            interpolation: if linear { Interpolation::Linear } else { Interpolation::None },
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Symmetric families are odd functions of the input.
    #[test]
    fn symmetric_tables_are_odd(params in arb_params()) {
        let table = ShaperTable::build(&params);
        if params.curve.is_symmetric() {
            let v = table.values();
            for i in 0..STEPS {
                prop_assert_eq!(v[STEPS + i], -v[STEPS - i]);
            }
        }
    }

    /// Building twice gives bit-identical tables.
    #[test]
    fn build_is_deterministic(params in arb_params()) {
        prop_assert_eq!(ShaperTable::build(&params), ShaperTable::build(&params));
    }

    /// Zero input reads the midpoint entry times the make-up gain.
    #[test]
    fn zero_reads_midpoint(params in arb_params()) {
        let table = ShaperTable::build(&params);
        let expected = (table.values()[STEPS] * table.makeup_gain()) as f32;
        prop_assert_eq!(shape(table.values(), table.makeup_gain(), 0.0), expected);
    }

    /// Every table entry is finite and the table has the documented size.
    #[test]
    fn tables_are_finite(params in arb_params()) {
        let table = ShaperTable::build(&params);
        prop_assert_eq!(table.values().len(), TABLE_SIZE);
        prop_assert!(table.values().iter().all(|v| v.is_finite()));
        prop_assert!(table.makeup_gain().is_finite());
    }

    /// Out-of-range parameters are clamped, so the table is always usable.
    #[test]
    fn wild_params_build_finite_tables(
        curve in arb_curve(),
        threshold_db in -1e6f64..1e6,
        noise_floor_db in -1e6f64..1e6,
        param1 in -1e6f64..1e6,
        param2 in -1e6f64..1e6,
        repeats in any::<u32>(),
    ) {
        let params = DistortionParams {
            curve,
            threshold_db,
            noise_floor_db,
            param1,
            param2,
            repeats,
            ..DistortionParams::default()
        };
        let table = ShaperTable::build(&params);
        prop_assert!(table.values().iter().all(|v| v.is_finite()));
        prop_assert!(table.params().repeats <= 5);
    }

    /// Processing any block of finite input yields finite output of the same length.
    #[test]
    fn process_block_finite(
        params in arb_params(),
        input in prop::collection::vec(-2.0f32..=2.0, 0..512),
    ) {
        let table = ShaperTable::build(&params);
        let mut state = InstanceState::new(&params, SAMPLE_RATE);
        let mut output = vec![0.0; input.len()];
        let n = state.process_block(&table, &input, &mut output);
        prop_assert_eq!(n, input.len());
        prop_assert_eq!(state.samples_processed(), input.len() as u64);
        prop_assert!(output.iter().all(|s| s.is_finite()));
    }

    /// Extra hard-clip passes never raise a sample that was already clipped.
    #[test]
    fn repeats_do_not_raise_clipped_samples(
        threshold_db in -40.0f64..=-1.0,
        param1 in 0.0f64..=100.0,
        param2 in 0.0f64..=100.0,
        input in prop::collection::vec(-1.0f32..=1.0, 1..256),
    ) {
        let base = DistortionParams::default()
            .with_threshold_db(threshold_db)
            .with_param1(param1)
            .with_param2(param2);
        let once = base.with_repeats(0);
        let thrice = base.with_repeats(2);

        let table_once = ShaperTable::build(&once);
        let table_thrice = ShaperTable::build(&thrice);
        let mut out_once = vec![0.0; input.len()];
        let mut out_thrice = vec![0.0; input.len()];
        InstanceState::new(&once, SAMPLE_RATE).process_block(&table_once, &input, &mut out_once);
        InstanceState::new(&thrice, SAMPLE_RATE).process_block(
            &table_thrice,
            &input,
            &mut out_thrice,
        );

        let threshold = base.threshold_linear();
        let drive = table_once.drive();
        // Two table steps of margin keeps nearest-index rounding out of the picture.
        let margin = 2.0 / STEPS as f64;
        for (i, &x) in input.iter().enumerate() {
            if (f64::from(x) * drive).abs() > threshold + margin {
                prop_assert!(
                    out_thrice[i].abs() <= out_once[i].abs() + 1e-6,
                    "sample {} ({}): {} > {}", i, x, out_thrice[i], out_once[i]
                );
            }
        }
    }
}
