//! Error types for featmatch.

use thiserror::Error;

/// Result alias for featmatch operations.
pub type MatchResult<T> = std::result::Result<T, MatchError>;

/// Errors that can occur when extracting features or matching templates.
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    /// Options are inconsistent with the requested operation.
    #[error("invalid options: {0}")]
    InvalidOptions(&'static str),

    /// Template and search image shapes are incompatible.
    #[error(
        "shape mismatch: template {tpl_width}x{tpl_height}x{tpl_channels} \
         against image {img_width}x{img_height}x{img_channels}"
    )]
    ShapeMismatch {
        tpl_width: usize,
        tpl_height: usize,
        tpl_channels: usize,
        img_width: usize,
        img_height: usize,
        img_channels: usize,
    },

    /// Zero-area buffer where a real image is required.
    #[error("degenerate input: {width}x{height}x{channels}")]
    DegenerateInput {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// Backing buffer length does not match the declared dimensions.
    #[error("buffer size mismatch: needed {needed} samples, got {got}")]
    BufferSizeMismatch { needed: usize, got: usize },

    /// Crop region extends outside the source image.
    #[error("roi out of bounds: ({x},{y}) {width}x{height} in image {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
}
