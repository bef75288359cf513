//! Scalar baseline accumulators.

/// Accumulates `(dot(t, w), sum(w), sum(w * w))` over one sample row.
///
/// `t` and `w` must have equal length.
pub(crate) fn row_dot_sum_sq(t: &[f32], w: &[f32]) -> (f32, f32, f32) {
    debug_assert_eq!(t.len(), w.len());
    let mut dot = 0.0f32;
    let mut sum = 0.0f32;
    let mut sum_sq = 0.0f32;
    for (&tv, &wv) in t.iter().zip(w) {
        dot += tv * wv;
        sum += wv;
        sum_sq += wv * wv;
    }
    (dot, sum, sum_sq)
}
