//! Property-based tests for the typed kernels
//!
//! These check the per-element contracts of the elementwise kernels and the
//! counting invariants of the rate encoder on random inputs.

use proptest::prelude::*;
use shnn_fire::kernels::{quantize, rank_fire, rate_fire, threshold};
use shnn_fire::{CpuDevice, ScalarType, Shape, Tensor, View3, View3Mut};

/// Random `(z, y, x)` tensor contents with small integer values
fn tensor3_strategy() -> impl Strategy<Value = (usize, usize, usize, Vec<i32>)> {
    (1usize..6, 1usize..9, 1usize..6).prop_flat_map(|(z, y, x)| {
        prop::collection::vec(-20i32..20, z * y * x).prop_map(move |v| (z, y, x, v))
    })
}

fn encode(z: usize, y: usize, x: usize, input: &[i32], thr: i32) -> Vec<u32> {
    let mut output = vec![0u32; input.len()];
    rate_fire(
        View3::new(input, z, y, x).unwrap(),
        View3Mut::new(&mut output, z, y, x).unwrap(),
        thr,
    )
    .unwrap();
    output
}

proptest! {
    // Property: threshold replaces exactly the elements at or below the cutoff
    #[test]
    fn test_threshold_contract(
        original in prop::collection::vec(-1000i32..1000, 0..300),
        cutoff in -1000i32..1000,
        value in -5i32..5,
    ) {
        let mut data = original.clone();
        threshold(&mut data, cutoff, value);
        for (before, after) in original.iter().zip(&data) {
            if *before <= cutoff {
                prop_assert_eq!(*after, value);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    // Property: quantize yields only the two levels, lower iff below middle
    #[test]
    fn test_quantize_contract(
        original in prop::collection::vec(-100.0f32..100.0, 0..300),
        middle in -100.0f32..100.0,
    ) {
        let mut data = original.clone();
        quantize(&mut data, -1.0, middle, 1.0);
        for (before, after) in original.iter().zip(&data) {
            prop_assert!(*after == -1.0 || *after == 1.0);
            prop_assert_eq!(*after == -1.0, *before < middle);
        }
    }

    // Property: rank_fire output is 1 exactly where input is strictly above threshold
    #[test]
    fn test_rank_fire_contract(
        input in prop::collection::vec(-50i16..50, 0..300),
        thr in -50i16..50,
    ) {
        let mut output = vec![7u8; input.len()];
        rank_fire(&input, &mut output, thr).unwrap();
        for (v, o) in input.iter().zip(&output) {
            prop_assert_eq!(*o == 1, *v > thr);
            prop_assert!(*o <= 1);
        }
    }

    // Property: counts are non-decreasing and step by one iff the neuron fires
    #[test]
    fn test_rate_fire_monotone_and_exact(
        (z, y, x, input) in tensor3_strategy(),
        thr in -3i32..6,
    ) {
        let output = encode(z, y, x, &input, thr);
        for b in 0..z {
            for f in 0..x {
                let mut reference = 0i32;
                let mut previous = 0u32;
                for t in 0..y {
                    let idx = (b * y + t) * x + f;
                    let fires = reference + thr < input[idx];
                    if fires {
                        reference = input[idx];
                    }
                    prop_assert!(output[idx] >= previous);
                    prop_assert_eq!(output[idx] - previous, fires as u32);
                    previous = output[idx];
                }
            }
        }
    }

    // Property: the final slice equals a left-to-right replay of the firing rule
    #[test]
    fn test_rate_fire_final_slice_replay(
        sequence in prop::collection::vec(-20i32..20, 1..40),
        thr in 0i32..5,
    ) {
        let y = sequence.len();
        let output = encode(1, y, 1, &sequence, thr);
        let mut reference = 0;
        let mut count = 0u32;
        for &v in &sequence {
            if reference + thr < v {
                count += 1;
                reference = v;
            }
        }
        prop_assert_eq!(output[y - 1], count);
    }

    // Property: narrow integers encode exactly like their widened values,
    // even when reference + threshold leaves the narrow range
    #[test]
    fn test_rate_fire_i8_matches_widened(
        sequence in prop::collection::vec(any::<i8>(), 1..40),
        features in 1usize..4,
        thr in any::<i8>(),
    ) {
        let y = sequence.len() / features;
        prop_assume!(y > 0);
        let narrow = &sequence[..y * features];
        let wide: Vec<i32> = narrow.iter().map(|&v| i32::from(v)).collect();

        let mut output = vec![0u32; narrow.len()];
        rate_fire(
            View3::new(narrow, 1, y, features).unwrap(),
            View3Mut::new(&mut output, 1, y, features).unwrap(),
            thr,
        )
        .unwrap();
        prop_assert_eq!(output, encode(1, y, features, &wide, i32::from(thr)));
    }

    // Property: permuting batch items permutes the outputs identically
    #[test]
    fn test_rate_fire_batch_independence(
        (z, y, x, input) in tensor3_strategy(),
        thr in 0i32..4,
        rotation in 0usize..6,
    ) {
        let item = y * x;
        let shift = rotation % z;
        let mut rotated = input.clone();
        rotated.rotate_left(shift * item);

        let expected = {
            let mut out = encode(z, y, x, &input, thr);
            out.rotate_left(shift * item);
            out
        };
        prop_assert_eq!(encode(z, y, x, &rotated, thr), expected);
    }

    // Property: device output does not depend on the worker count
    #[test]
    fn test_rate_fire_worker_count_invariance(
        (z, y, x, input) in tensor3_strategy(),
        threads in 1usize..7,
    ) {
        let tensor = Tensor::from_vec(input.clone(), Shape::d3(z, y, x)).unwrap();
        let device = CpuDevice::with_threads(threads).unwrap();
        let mut output = Tensor::zeros(ScalarType::U32, Shape::d3(z, y, x));
        device.rate_fire(&tensor, &mut output, 1.0).unwrap();
        let expected = encode(z, y, x, &input, 1);
        prop_assert_eq!(output.as_slice::<u32>().unwrap(), expected.as_slice());
    }
}
