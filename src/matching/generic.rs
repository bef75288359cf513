//! Brute-force matching path for feature maps of any channel count.
//!
//! The template slides over every valid top-left offset; at each offset the
//! overlapping window and the template are compared as flat vectors, either
//! by Euclidean distance or by correlation distance (1 - Pearson). Both are
//! minimum-at-match already, so no sign inversion happens here. Output shape
//! before retain-size padding is `(H - h, W - w)`, exclusive of the last
//! valid placement; this boundary convention differs from the accelerated
//! path on purpose.

use crate::heatmap::Heatmap;
use crate::image::ImageBuffer;
use crate::kernel::{self, TemplateStats};
use crate::matching::{shape_mismatch, Distance, MatchOptions};
use crate::trace::{trace_event, trace_span};
use crate::util::{MatchError, MatchResult};

const DENOM_EPS: f32 = 1e-12;

/// Correlation distance from the window accumulators. A zero-variance
/// template or window has no defined correlation; that is scored as the
/// maximal distance 1.0.
fn correlation_distance(stats: &TemplateStats, dot: f32, sum_i: f32, sum_i2: f32) -> f32 {
    let n = stats.len as f32;
    let cov = dot - stats.sum * sum_i / n;
    let var_i = (sum_i2 - sum_i * sum_i / n).max(0.0);
    let denom = (stats.var * var_i).sqrt();
    if denom <= DENOM_EPS {
        1.0
    } else {
        1.0 - cov / denom
    }
}

fn euclidean_distance(stats: &TemplateStats, dot: f32, sum_i2: f32) -> f32 {
    (stats.sum_sq - 2.0 * dot + sum_i2).max(0.0).sqrt()
}

pub(crate) fn match_template_generic(
    tpl: &ImageBuffer,
    img: &ImageBuffer,
    options: &MatchOptions,
) -> MatchResult<Heatmap> {
    if tpl.width() >= img.width() || tpl.height() >= img.height() {
        return Err(shape_mismatch(tpl, img));
    }
    if options.distance == Distance::Ccoeff {
        return Err(MatchError::InvalidOptions(
            "ccoeff distance is only available on the accelerated path",
        ));
    }

    let stats = TemplateStats::new(tpl);
    let out_w = img.width() - tpl.width();
    let out_h = img.height() - tpl.height();
    let _span = trace_span!("generic_scan", rows = out_h, cols = out_w).entered();

    let channels = img.channels();
    let seg = stats.row_len;
    let distance = options.distance;

    let data = kernel::scan_rows(out_h, out_w, |x, y| {
        let mut dot = 0.0f32;
        let mut sum_i = 0.0f32;
        let mut sum_i2 = 0.0f32;
        for ty in 0..stats.height {
            let row = img.row(y + ty);
            let win = &row[x * channels..x * channels + seg];
            let (d, s, s2) = kernel::row_dot_sum_sq(&stats.values[ty * seg..(ty + 1) * seg], win);
            dot += d;
            sum_i += s;
            sum_i2 += s2;
        }
        match distance {
            Distance::Euclidean => euclidean_distance(&stats, dot, sum_i2),
            _ => correlation_distance(&stats, dot, sum_i, sum_i2),
        }
    });
    trace_event!("generic_scan_done", cells = out_w * out_h);

    let mut heatmap = Heatmap::new(data, out_w, out_h)?;
    if options.normalize {
        heatmap.normalize_by_max();
    }
    if options.retain_size {
        heatmap.retain_size(img.width(), img.height())
    } else {
        Ok(heatmap)
    }
}
