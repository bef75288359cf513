//! Row-parallel scan driver (feature-gated).
//!
//! Per-offset scores are independent, so splitting the scan across rows
//! cannot change the result; each worker fills its own row buffer and the
//! rows are concatenated in order.

use rayon::prelude::*;

/// Fills a `rows x cols` score grid in parallel over rows.
pub(crate) fn scan_rows_par<F>(rows: usize, cols: usize, score: F) -> Vec<f32>
where
    F: Fn(usize, usize) -> f32 + Sync,
{
    let row_results: Vec<Vec<f32>> = (0..rows)
        .into_par_iter()
        .map(|y| (0..cols).map(|x| score(x, y)).collect())
        .collect();

    let mut data = Vec::with_capacity(rows * cols);
    for row in row_results {
        data.extend_from_slice(&row);
    }
    data
}
