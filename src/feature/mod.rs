//! Feature extraction dispatch.
//!
//! A [`Feature`] names a pure transform from an image to the feature map the
//! matcher compares. The variant set is closed; new features are added by
//! extending the enum and its dispatch arm.

use crate::image::ImageBuffer;
use crate::matching::MatchOptions;
use crate::util::{MatchError, MatchResult};

pub mod color;
pub mod deep;
pub mod hog;

pub use deep::DeepExtractor;
pub use hog::HogParams;

/// Resolves a feature extractor by name. Unknown names fall back to the
/// identity `rgb` extractor; see [`Feature::from_name`].
pub fn factory(name: &str) -> Feature {
    Feature::from_name(name)
}

/// Named feature transform applied to both template and search image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Feature {
    /// Identity passthrough of the raw image samples.
    #[default]
    Rgb,
    /// Single-channel luma.
    Gray,
    /// CIE Lab color space.
    Lab,
    /// CIE Luv color space.
    Luv,
    /// Hue/saturation/value color space.
    Hsv,
    /// Hue/lightness/saturation color space.
    Hls,
    /// Gradient orientation histograms.
    Hog,
    /// Injected learned embedding (see [`DeepExtractor`]).
    Deep,
}

impl Feature {
    /// Resolves a feature name. Unrecognized names fall back to [`Feature::Rgb`];
    /// callers that depend on the historical silent default get it unchanged.
    pub fn from_name(name: &str) -> Feature {
        match name {
            "hog" => Feature::Hog,
            "deep" => Feature::Deep,
            "gray" => Feature::Gray,
            "lab" => Feature::Lab,
            "luv" => Feature::Luv,
            "hsv" => Feature::Hsv,
            "hls" => Feature::Hls,
            _ => Feature::Rgb,
        }
    }

    /// Returns the canonical name of the feature.
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Rgb => "rgb",
            Feature::Gray => "gray",
            Feature::Lab => "lab",
            Feature::Luv => "luv",
            Feature::Hsv => "hsv",
            Feature::Hls => "hls",
            Feature::Hog => "hog",
            Feature::Deep => "deep",
        }
    }

    /// Extracts this feature from `img` under the given options.
    pub fn extract(&self, img: &ImageBuffer, options: &MatchOptions) -> MatchResult<ImageBuffer> {
        match self {
            Feature::Rgb => Ok(img.clone()),
            Feature::Gray => color::gray(img),
            Feature::Lab => color::lab(img),
            Feature::Luv => color::luv(img),
            Feature::Hsv => color::hsv(img),
            Feature::Hls => color::hls(img),
            Feature::Hog => hog::hog(img, &options.hog),
            Feature::Deep => options
                .deep
                .as_deref()
                .ok_or(MatchError::InvalidOptions(
                    "deep feature requires an injected extractor handle",
                ))?
                .extract(img),
        }
    }
}
