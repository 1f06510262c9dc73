//! End-to-end equivalence of the dispatched reduction against an
//! independently written element-at-a-time evaluation.

use nnue_core::{QA, fused_screlu_sum};
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

/// One perspective's contribution, spelled out element by element with the
/// same low-16-bit truncation the kernel guarantees.
fn perspective_sum(values: &[i16], weights: &[i16]) -> i32 {
    values
        .iter()
        .zip(weights)
        .map(|(&value, &weight)| {
            let clamped = value.clamp(0, QA);
            let truncated = clamped.wrapping_mul(weight);
            i32::from(truncated) * i32::from(clamped)
        })
        .fold(0i32, i32::wrapping_add)
}

#[test]
fn dispatched_kernel_matches_elementwise_evaluation() {
    let mut rng = StdRng::seed_from_u64(0xDEAD);

    for len in [0, 2, 4, 16, 64, 96, 128, 256, 512, 1024] {
        let stm: Vec<i16> = (0..len).map(|_| rng.random()).collect();
        let ntm: Vec<i16> = (0..len).map(|_| rng.random()).collect();
        let weights: Vec<i16> = (0..2 * len).map(|_| rng.random()).collect();

        let expected = perspective_sum(&stm, &weights[..len])
            .wrapping_add(perspective_sum(&ntm, &weights[len..]));

        assert_eq!(
            fused_screlu_sum(&stm, &ntm, &weights),
            expected,
            "len = {len}"
        );
    }
}

#[test]
fn activations_outside_clamp_range_are_saturated() {
    // Extremes on both sides of the clamp range, one full AVX2 lane.
    let stm: Vec<i16> = vec![i16::MIN; 16];
    let ntm: Vec<i16> = vec![i16::MAX; 16];
    let weights: Vec<i16> = (0i16..32).map(|i| i - 16).collect();

    let expected = perspective_sum(&ntm, &weights[16..]);

    assert_eq!(fused_screlu_sum(&stm, &ntm, &weights), expected);
}
