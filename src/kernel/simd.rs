//! SIMD accumulators built on `wide` (feature-gated).
//!
//! Same contract as the scalar version: `(dot, sum, sum_sq)` over one sample
//! row, 8 lanes at a time with a scalar tail. Lane sums are reduced after
//! the chunked loop, so results can differ from the scalar path only by
//! floating-point association, well inside the tolerances the score
//! formulas carry.

use wide::f32x8;

/// Load 8 f32 values into f32x8.
#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

/// Horizontal sum of f32x8.
#[inline]
fn hsum(v: f32x8) -> f32 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3] + arr[4] + arr[5] + arr[6] + arr[7]
}

/// Accumulates `(dot(t, w), sum(w), sum(w * w))` over one sample row.
pub(crate) fn row_dot_sum_sq(t: &[f32], w: &[f32]) -> (f32, f32, f32) {
    debug_assert_eq!(t.len(), w.len());

    let mut dot_vec = f32x8::ZERO;
    let mut sum_vec = f32x8::ZERO;
    let mut sum_sq_vec = f32x8::ZERO;

    let chunks = t.len() / 8;
    for i in 0..chunks {
        let base = i * 8;
        let tv = load_f32x8(&t[base..]);
        let wv = load_f32x8(&w[base..]);
        dot_vec += tv * wv;
        sum_vec += wv;
        sum_sq_vec += wv * wv;
    }

    let mut dot = hsum(dot_vec);
    let mut sum = hsum(sum_vec);
    let mut sum_sq = hsum(sum_sq_vec);

    for i in chunks * 8..t.len() {
        dot += t[i] * w[i];
        sum += w[i];
        sum_sq += w[i] * w[i];
    }

    (dot, sum, sum_sq)
}

#[cfg(test)]
mod tests {
    use super::row_dot_sum_sq;
    use crate::kernel::scalar;

    #[test]
    fn matches_the_scalar_accumulators() {
        let t: Vec<f32> = (0..37).map(|v| (v * 7 % 11) as f32).collect();
        let w: Vec<f32> = (0..37).map(|v| (v * 5 % 13) as f32).collect();
        let (dot, sum, sum_sq) = row_dot_sum_sq(&t, &w);
        let (sdot, ssum, ssum_sq) = scalar::row_dot_sum_sq(&t, &w);
        assert!((dot - sdot).abs() < 1e-3);
        assert!((sum - ssum).abs() < 1e-3);
        assert!((sum_sq - ssum_sq).abs() < 1e-3);
    }
}
