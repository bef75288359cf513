//! Template matching: path dispatch, fusion, and best-match location.

use std::fmt;
use std::sync::Arc;

use crate::feature::{DeepExtractor, Feature, HogParams};
use crate::geom::BBox;
use crate::heatmap::Heatmap;
use crate::image::ImageBuffer;
use crate::trace::{trace_event, trace_span};
use crate::util::{MatchError, MatchResult};

mod fast;
mod generic;

/// Distance metric between the flattened template and window vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Distance {
    /// Correlation: normalized cross-correlation on the accelerated path,
    /// 1 - Pearson correlation on the generic path.
    #[default]
    Correlation,
    /// Euclidean (squared-difference family on the accelerated path).
    Euclidean,
    /// Mean-centered correlation coefficient; accelerated path only.
    Ccoeff,
}

/// Matching configuration. `Default` gives the canonical behavior: raw
/// samples (`rgb`), correlation distance, normalized scores, heatmap padded
/// to the search-image size.
#[derive(Clone)]
pub struct MatchOptions {
    /// Feature transform applied to template and search image.
    pub feature: Feature,
    /// Distance metric.
    pub distance: Distance,
    /// Scale heatmap values into `0..=1` (lower is better).
    pub normalize: bool,
    /// Pad the heatmap to the search-image spatial size, filling unreached
    /// border cells with the worst observed score.
    pub retain_size: bool,
    /// When non-empty, run one match per entry and fuse the heatmaps.
    pub features: Vec<MatchOptions>,
    /// Options for the HOG extractor.
    pub hog: HogParams,
    /// Injected learned-embedding extractor for [`Feature::Deep`].
    pub deep: Option<Arc<dyn DeepExtractor>>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchOptions {
    /// Canonical defaults: `rgb` feature, correlation distance, normalized,
    /// retain size.
    pub fn new() -> Self {
        Self {
            feature: Feature::Rgb,
            distance: Distance::Correlation,
            normalize: true,
            retain_size: true,
            features: Vec::new(),
            hog: HogParams::default(),
            deep: None,
        }
    }

    /// Sets the feature transform.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.feature = feature;
        self
    }

    /// Sets the distance metric.
    pub fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = distance;
        self
    }
}

impl fmt::Debug for MatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchOptions")
            .field("feature", &self.feature)
            .field("distance", &self.distance)
            .field("normalize", &self.normalize)
            .field("retain_size", &self.retain_size)
            .field("features", &self.features)
            .field("hog", &self.hog)
            .field("deep", &self.deep.as_ref().map(|_| "<extractor>"))
            .finish()
    }
}

pub(crate) fn shape_mismatch(tpl: &ImageBuffer, img: &ImageBuffer) -> MatchError {
    MatchError::ShapeMismatch {
        tpl_width: tpl.width(),
        tpl_height: tpl.height(),
        tpl_channels: tpl.channels(),
        img_width: img.width(),
        img_height: img.height(),
        img_channels: img.channels(),
    }
}

/// Computes the match heatmap between a template feature map and a search
/// feature map.
///
/// Feature maps with at most 3 channels take the accelerated correlation
/// path (heatmap `(H - h + 1, W - w + 1)` before padding); wider maps take
/// the brute-force sliding-window path (`(H - h, W - w)`). Lower heatmap
/// values always mean better matches.
pub fn match_template(
    template: &ImageBuffer,
    image: &ImageBuffer,
    options: &MatchOptions,
) -> MatchResult<Heatmap> {
    if template.channels() != image.channels() {
        return Err(shape_mismatch(template, image));
    }
    if image.channels() <= 3 {
        fast::match_template_fast(template, image, options)
    } else {
        generic::match_template_generic(template, image, options)
    }
}

/// Extracts the configured feature from both images and matches the feature
/// maps. Returns the heatmap plus the spatial scale that maps heatmap
/// coordinates back to search-image pixels (`1.0` for same-resolution
/// features, the downscale ratio for reducing features such as HOG).
pub fn feature_match(
    template: &ImageBuffer,
    image: &ImageBuffer,
    options: &MatchOptions,
) -> MatchResult<(Heatmap, f32)> {
    let tpl_feat = options.feature.extract(template, options)?;
    let img_feat = options.feature.extract(image, options)?;
    let scale = image.height() as f32 / img_feat.height() as f32;
    let heatmap = match_template(&tpl_feat, &img_feat, options)?;
    Ok((heatmap, scale))
}

/// Matches under every entry of `options.features` and fuses the heatmaps.
///
/// Each per-feature heatmap is resized (area averaging) to the search-image
/// spatial size and the results are averaged elementwise, so the returned
/// scale is always `1.0` and callers never rescale a fused result. An empty
/// feature list degrades to a plain [`feature_match`].
pub fn multi_feat_match(
    template: &ImageBuffer,
    image: &ImageBuffer,
    options: &MatchOptions,
) -> MatchResult<(Heatmap, f32)> {
    if options.features.is_empty() {
        return feature_match(template, image, options);
    }

    let _span = trace_span!("fusion", features = options.features.len()).entered();
    let width = image.width();
    let height = image.height();
    let mut acc = vec![0.0f32; width * height];
    for feature_options in &options.features {
        let (heatmap, _) = feature_match(template, image, feature_options)?;
        let resized = heatmap.resize_area(width, height)?;
        for (a, &v) in acc.iter_mut().zip(resized.as_slice()) {
            *a += v;
        }
        trace_event!("fused_feature", feature = feature_options.feature.name());
    }
    let count = options.features.len() as f32;
    for v in &mut acc {
        *v /= count;
    }
    Ok((Heatmap::new(acc, width, height)?, 1.0))
}

/// Finds the single best match of `template` inside `image`.
///
/// The best match is the global heatmap minimum; ties resolve to the first
/// occurrence in row-major scan order. The returned box carries the
/// template's original size at the located offset (heatmap coordinates
/// multiplied by the feature scale), alongside the heatmap score.
pub fn match_one(
    template: &ImageBuffer,
    image: &ImageBuffer,
    options: &MatchOptions,
) -> MatchResult<(BBox, f32)> {
    let (heatmap, scale) = multi_feat_match(template, image, options)?;
    let (x, y, score) = heatmap.min_loc();
    let bbox = BBox::new(
        (scale * x as f32).round() as i32,
        (scale * y as f32).round() as i32,
        template.width() as u32,
        template.height() as u32,
    );
    Ok((bbox, score))
}
