//! Featmatch is a multi-channel template matching library.
//!
//! A template is located inside a larger search image by comparing feature
//! representations (raw color, grayscale, color-space transforms, gradient
//! histograms, or an injected learned embedding) at every candidate offset,
//! producing a heatmap of scores where lower uniformly means a better match.
//! Feature maps with at most 3 channels take a direct correlation path;
//! wider maps take a brute-force sliding-window path. Per-feature heatmaps
//! can be fused by area-resizing them to the search-image resolution and
//! averaging.
//!
//! Optional parallelism is available via the `rayon` feature and SIMD
//! accumulators via the `simd` feature; neither changes observable results.
//!
//! ```
//! use featmatch::{match_one, BBox, ImageBuffer, MatchOptions};
//!
//! let mut data = Vec::with_capacity(40 * 40);
//! for y in 0..40usize {
//!     for x in 0..40usize {
//!         data.push((((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF) as f32);
//!     }
//! }
//! let image = ImageBuffer::new(data, 40, 40, 1)?;
//! let template = image.crop(&BBox::new(10, 5, 12, 8))?;
//! let (bbox, score) = match_one(&template, &image, &MatchOptions::default())?;
//! assert_eq!(bbox, BBox::new(10, 5, 12, 8));
//! assert!(score < 1e-3);
//! # Ok::<(), featmatch::MatchError>(())
//! ```

pub mod feature;
pub mod geom;
pub mod heatmap;
pub mod image;
mod kernel;
pub mod matching;
pub(crate) mod trace;
pub mod util;

pub use feature::{DeepExtractor, Feature, HogParams};
pub use geom::BBox;
pub use heatmap::Heatmap;
pub use image::ImageBuffer;
pub use matching::{feature_match, match_one, match_template, multi_feat_match};
pub use matching::{Distance, MatchOptions};
pub use util::{MatchError, MatchResult};
