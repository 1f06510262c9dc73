//! Fused SCReLU activation and output reduction.
//!
//! Computes the output-layer dot product of a two-perspective network in one
//! pass: each accumulator value is clamped to `[0, QA]`, multiplied by its
//! output weight, multiplied by the clamped value again, and summed across
//! both perspectives into a single `i32`.

use cfg_if::cfg_if;

#[cfg(target_arch = "x86_64")]
use crate::simd::Avx2;
use crate::simd::{Backend, ScalarPair};

use crate::constants::QA;

/// Computes `sum(clamp(v, 0, QA) * low16(clamp(v, 0, QA) * w))` over the
/// side-to-move and not-to-move accumulators.
///
/// `weights[..len]` pairs with `stm_values`, `weights[len..]` with
/// `ntm_values`, index for index. The weighted product is truncated to its
/// low 16 bits before the second multiply. This truncation is a contract of
/// the quantization scheme: trained weights rely on the wrapped value, and
/// every backend reproduces it bit for bit. Widening the multiply would
/// change the result on inputs where `clamp(v) * w` exceeds 16 bits.
///
/// The AVX2 path runs when the CPU supports it and `len` is a multiple of
/// its 16-element lane width; the portable backend handles everything else
/// and produces the identical sum. An empty input returns 0.
///
/// # Panics
///
/// Panics if `stm_values` and `ntm_values` differ in length, if `weights`
/// is not exactly twice that length, or if the length is odd.
pub fn fused_screlu_sum(stm_values: &[i16], ntm_values: &[i16], weights: &[i16]) -> i32 {
    let len = stm_values.len();
    assert_eq!(len, ntm_values.len(), "perspective length mismatch");
    assert_eq!(weights.len(), 2 * len, "weights must cover both perspectives");
    assert_eq!(len % ScalarPair::LANES, 0, "length must be even");

    cfg_if! {
        if #[cfg(target_arch = "x86_64")] {
            if len % Avx2::LANES == 0 && is_x86_feature_detected!("avx2") {
                unsafe { reduce_avx2(stm_values, ntm_values, weights) }
            } else {
                unsafe { reduce::<ScalarPair>(stm_values, ntm_values, weights) }
            }
        } else {
            unsafe { reduce::<ScalarPair>(stm_values, ntm_values, weights) }
        }
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
fn reduce_avx2(stm_values: &[i16], ntm_values: &[i16], weights: &[i16]) -> i32 {
    unsafe { reduce::<Avx2>(stm_values, ntm_values, weights) }
}

/// Backend-generic reduction loop.
///
/// # Safety
///
/// `stm_values` and `ntm_values` must have the same length, a multiple of
/// `B::LANES`; `weights` must hold exactly twice that many elements.
#[inline(always)]
unsafe fn reduce<B: Backend>(stm_values: &[i16], ntm_values: &[i16], weights: &[i16]) -> i32 {
    let len = stm_values.len();

    unsafe {
        let zero = B::splat(0);
        let ceil = B::splat(QA);
        let mut sum = B::zero();

        let stm_ptr = stm_values.as_ptr();
        let ntm_ptr = ntm_values.as_ptr();
        let stm_weights = weights.as_ptr();
        let ntm_weights = weights.as_ptr().add(len);

        let mut i = 0;
        while i < len {
            let stm = B::clamp(B::load(stm_ptr.add(i)), zero, ceil);
            let ntm = B::clamp(B::load(ntm_ptr.add(i)), zero, ceil);

            let stm_product = B::mul_keep_low(stm, B::load(stm_weights.add(i)));
            let ntm_product = B::mul_keep_low(ntm, B::load(ntm_weights.add(i)));

            sum = B::add(sum, B::mul_add_pairs(stm_product, stm));
            sum = B::add(sum, B::mul_add_pairs(ntm_product, ntm));

            i += B::LANES;
        }

        B::horizontal_sum(sum)
    }
}
