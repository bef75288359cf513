//! Injected learned-embedding extractor.
//!
//! The matcher never loads or runs a model itself. A caller that wants deep
//! features hands in an object implementing [`DeepExtractor`]; the handle is
//! owned by the caller and passed through the options, so there is no hidden
//! process-wide model state.

use crate::image::ImageBuffer;
use crate::util::MatchResult;

/// Caller-provided feature extractor backed by a learned model.
pub trait DeepExtractor: Send + Sync {
    /// Maps an image to its embedding feature map. The output may have any
    /// channel count and a reduced spatial resolution; the matcher only
    /// requires that template and search image are mapped consistently.
    fn extract(&self, image: &ImageBuffer) -> MatchResult<ImageBuffer>;
}
