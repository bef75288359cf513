//! Accelerated matching path for feature maps with at most 3 channels.
//!
//! Each distance/normalize combination maps to one direct correlation method
//! over the flattened window (channels are folded into the sample vector).
//! Raw correlation rewards higher values, so correlation-family scores are
//! inverted afterwards (`1 - score` when normalized, `max - score`
//! otherwise); squared differences already reward lower values. Output shape
//! before retain-size padding is `(H - h + 1, W - w + 1)`, inclusive of the
//! last valid placement.

use crate::heatmap::Heatmap;
use crate::image::ImageBuffer;
use crate::kernel::{self, Method, TemplateStats};
use crate::matching::{shape_mismatch, Distance, MatchOptions};
use crate::trace::{trace_event, trace_span};
use crate::util::MatchResult;

const DENOM_EPS: f32 = 1e-12;

/// Maps options to the concrete scoring method, reproducing the historical
/// selection table (normalized correlation is the default).
fn select_method(distance: Distance, normalize: bool) -> Method {
    match (distance, normalize) {
        (Distance::Euclidean, true) => Method::SqdiffNormed,
        (Distance::Euclidean, false) => Method::Sqdiff,
        (Distance::Ccoeff, true) => Method::CcoeffNormed,
        (Distance::Ccoeff, false) => Method::Ccoeff,
        (Distance::Correlation, false) => Method::Ccorr,
        (Distance::Correlation, true) => Method::CcorrNormed,
    }
}

fn normed(num: f32, denom_sq: f32) -> f32 {
    let denom = denom_sq.max(0.0).sqrt();
    if denom <= DENOM_EPS {
        0.0
    } else {
        num / denom
    }
}

fn score(method: Method, stats: &TemplateStats, dot: f32, sum_i: f32, sum_i2: f32) -> f32 {
    match method {
        Method::Ccorr => dot,
        Method::CcorrNormed => normed(dot, stats.sum_sq * sum_i2),
        Method::Sqdiff => stats.sum_sq - 2.0 * dot + sum_i2,
        Method::SqdiffNormed => normed(stats.sum_sq - 2.0 * dot + sum_i2, stats.sum_sq * sum_i2),
        // `dot` is against the centered template here, which folds the
        // window mean out of the sum.
        Method::Ccoeff => dot,
        Method::CcoeffNormed => {
            let var_i = (sum_i2 - sum_i * sum_i / stats.len as f32).max(0.0);
            normed(dot, stats.var * var_i)
        }
    }
}

pub(crate) fn match_template_fast(
    tpl: &ImageBuffer,
    img: &ImageBuffer,
    options: &MatchOptions,
) -> MatchResult<Heatmap> {
    if tpl.width() > img.width() || tpl.height() > img.height() {
        return Err(shape_mismatch(tpl, img));
    }

    let method = select_method(options.distance, options.normalize);
    let stats = TemplateStats::new(tpl);
    let out_w = img.width() - tpl.width() + 1;
    let out_h = img.height() - tpl.height() + 1;
    let _span = trace_span!("fast_scan", rows = out_h, cols = out_w).entered();

    let channels = img.channels();
    let seg = stats.row_len;
    let t: &[f32] = if method.is_ccoeff() {
        &stats.centered
    } else {
        &stats.values
    };

    let mut data = kernel::scan_rows(out_h, out_w, |x, y| {
        let mut dot = 0.0f32;
        let mut sum_i = 0.0f32;
        let mut sum_i2 = 0.0f32;
        for ty in 0..stats.height {
            let row = img.row(y + ty);
            let win = &row[x * channels..x * channels + seg];
            let (d, s, s2) = kernel::row_dot_sum_sq(&t[ty * seg..(ty + 1) * seg], win);
            dot += d;
            sum_i += s;
            sum_i2 += s2;
        }
        score(method, &stats, dot, sum_i, sum_i2)
    });

    // Flip correlation-family scores so that lower is uniformly better.
    if !method.is_sqdiff() {
        if options.normalize {
            for v in &mut data {
                *v = 1.0 - *v;
            }
        } else {
            let max = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            for v in &mut data {
                *v = max - *v;
            }
        }
    }
    trace_event!("fast_scan_done", cells = out_w * out_h);

    let heatmap = Heatmap::new(data, out_w, out_h)?;
    if options.retain_size {
        heatmap.retain_size(img.width(), img.height())
    } else {
        Ok(heatmap)
    }
}
