//! Window-scoring kernels shared by both matching paths.
//!
//! Every score a matching path needs reduces to three accumulators over the
//! flattened template and the flattened image window: the dot product, the
//! window sum, and the window sum of squares. `row_dot_sum_sq` computes them
//! for one contiguous sample row; the scalar version is the baseline and the
//! `wide` version (behind the `simd` feature) is bit-compatible enough for
//! the tolerances the scores carry.

use crate::image::ImageBuffer;

pub(crate) mod scalar;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;

#[cfg(feature = "simd")]
pub(crate) mod simd;

#[cfg(not(feature = "simd"))]
pub(crate) use scalar::row_dot_sum_sq;
#[cfg(feature = "simd")]
pub(crate) use simd::row_dot_sum_sq;

/// Accelerated-path scoring method, one per distance/normalize combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Method {
    Ccorr,
    CcorrNormed,
    Sqdiff,
    SqdiffNormed,
    Ccoeff,
    CcoeffNormed,
}

impl Method {
    /// True for squared-difference methods, which already reward lower
    /// values and therefore skip the sign inversion.
    pub(crate) fn is_sqdiff(self) -> bool {
        matches!(self, Method::Sqdiff | Method::SqdiffNormed)
    }

    /// True for methods that correlate against the mean-centered template.
    pub(crate) fn is_ccoeff(self) -> bool {
        matches!(self, Method::Ccoeff | Method::CcoeffNormed)
    }
}

/// Precomputed statistics of the flattened template.
pub(crate) struct TemplateStats {
    /// Raw template samples, row-major interleaved.
    pub values: Vec<f32>,
    /// Mean-centered template samples.
    pub centered: Vec<f32>,
    /// Sum of the raw samples.
    pub sum: f32,
    /// Sum of the squared raw samples.
    pub sum_sq: f32,
    /// Sum of squared deviations from the mean.
    pub var: f32,
    /// Number of samples (`height * width * channels`).
    pub len: usize,
    /// Samples per row (`width * channels`).
    pub row_len: usize,
    /// Template height in pixels.
    pub height: usize,
}

impl TemplateStats {
    pub(crate) fn new(tpl: &ImageBuffer) -> Self {
        let values = tpl.as_slice().to_vec();
        let len = values.len();
        let sum: f32 = values.iter().sum();
        let sum_sq: f32 = values.iter().map(|v| v * v).sum();
        let mean = sum / len as f32;
        let centered: Vec<f32> = values.iter().map(|v| v - mean).collect();
        let var = (sum_sq - sum * sum / len as f32).max(0.0);
        Self {
            values,
            centered,
            sum,
            sum_sq,
            var,
            len,
            row_len: tpl.width() * tpl.channels(),
            height: tpl.height(),
        }
    }
}

/// Fills a `rows x cols` score grid, one call of `score(x, y)` per cell.
/// Row-parallel under the `rayon` feature; per-cell scores are independent,
/// so the output is identical either way.
pub(crate) fn scan_rows<F>(rows: usize, cols: usize, score: F) -> Vec<f32>
where
    F: Fn(usize, usize) -> f32 + Sync,
{
    #[cfg(feature = "rayon")]
    {
        self::rayon::scan_rows_par(rows, cols, score)
    }
    #[cfg(not(feature = "rayon"))]
    {
        let mut data = Vec::with_capacity(rows * cols);
        for y in 0..rows {
            for x in 0..cols {
                data.push(score(x, y));
            }
        }
        data
    }
}
