//! Histogram-of-oriented-gradients feature extractor.
//!
//! Gradients are taken on the grayscale image with central differences
//! (borders zero), orientations are unsigned (`0..180` degrees) and bucketed
//! into a fixed number of bins per cell, and cell histograms are aggregated
//! over blocks of cells with L2 normalization.
//!
//! The spatial reduction follows the cell/block arithmetic of the classic
//! formulation: with cell size `(cx, cy)`, block size `(bx, by)` and image
//! size `(h, w)`:
//!
//! ```text
//! n_cells_x = w / cx              n_cells_y = h / cy
//! n_blocks_x = n_cells_x - bx + 1 n_blocks_y = n_cells_y - by + 1
//! ```
//!
//! and the output buffer is the flat `(block_y, block_x, cell_y, cell_x,
//! orientation)` ordering reinterpreted as an image of shape
//! `(n_blocks_y * by, n_blocks_x * bx, orientations)`.

use crate::feature::color;
use crate::image::ImageBuffer;
use crate::util::{MatchError, MatchResult};

/// Options for the gradient-histogram extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HogParams {
    /// Cell size `(cx, cy)` in pixels.
    pub cell_size: (usize, usize),
    /// Number of unsigned orientation bins over `0..180` degrees.
    pub orientations: usize,
    /// Block size `(bx, by)` in cells.
    pub block_size: (usize, usize),
}

impl Default for HogParams {
    fn default() -> Self {
        Self {
            cell_size: (8, 8),
            orientations: 8,
            block_size: (1, 1),
        }
    }
}

// L2 block normalization constant.
const NORM_EPS: f32 = 1e-5;

/// Extracts the HOG feature map of `img`.
pub fn hog(img: &ImageBuffer, params: &HogParams) -> MatchResult<ImageBuffer> {
    let (cx, cy) = params.cell_size;
    let (bx, by) = params.block_size;
    let orientations = params.orientations;
    if cx == 0 || cy == 0 || bx == 0 || by == 0 || orientations == 0 {
        return Err(MatchError::InvalidOptions(
            "hog cell size, block size and orientations must be non-zero",
        ));
    }

    let gray = color::gray(img)?;
    let w = gray.width();
    let h = gray.height();

    let n_cells_x = w / cx;
    let n_cells_y = h / cy;
    if n_cells_x < bx || n_cells_y < by {
        return Err(MatchError::InvalidOptions(
            "hog block does not fit into the cell grid",
        ));
    }
    let n_blocks_x = n_cells_x - bx + 1;
    let n_blocks_y = n_cells_y - by + 1;

    // Per-cell orientation histograms, magnitude-weighted and averaged over
    // the cell area.
    let bin_width = 180.0 / orientations as f32;
    let mut cells = vec![0.0f32; n_cells_x * n_cells_y * orientations];
    for y in 0..h {
        let cell_y = y / cy;
        if cell_y >= n_cells_y {
            break;
        }
        for x in 0..(n_cells_x * cx) {
            let gx = if x == 0 || x == w - 1 {
                0.0
            } else {
                gray.sample(x + 1, y, 0) - gray.sample(x - 1, y, 0)
            };
            let gy = if y == 0 || y == h - 1 {
                0.0
            } else {
                gray.sample(x, y + 1, 0) - gray.sample(x, y - 1, 0)
            };
            let magnitude = (gx * gx + gy * gy).sqrt();
            if magnitude == 0.0 {
                continue;
            }
            let mut angle = gy.atan2(gx).to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }
            if angle >= 180.0 {
                angle -= 180.0;
            }
            let bin = ((angle / bin_width) as usize).min(orientations - 1);
            let cell_x = x / cx;
            cells[(cell_y * n_cells_x + cell_x) * orientations + bin] += magnitude;
        }
    }
    let cell_area = (cx * cy) as f32;
    for v in &mut cells {
        *v /= cell_area;
    }

    // Blocks of cells, L2-normalized, emitted in (block_y, block_x, cell_y,
    // cell_x, orientation) order. That flat order is reinterpreted spatially
    // as (n_blocks_y * by) rows of (n_blocks_x * bx) pixels.
    let mut data = Vec::with_capacity(n_blocks_y * by * n_blocks_x * bx * orientations);
    for block_y in 0..n_blocks_y {
        for block_x in 0..n_blocks_x {
            let start = data.len();
            let mut sq_sum = 0.0f32;
            for dy in 0..by {
                for dx in 0..bx {
                    let cell = ((block_y + dy) * n_cells_x + block_x + dx) * orientations;
                    for &v in &cells[cell..cell + orientations] {
                        sq_sum += v * v;
                        data.push(v);
                    }
                }
            }
            let norm = (sq_sum + NORM_EPS * NORM_EPS).sqrt();
            for v in &mut data[start..] {
                *v /= norm;
            }
        }
    }

    ImageBuffer::new(data, n_blocks_x * bx, n_blocks_y * by, orientations)
}

#[cfg(test)]
mod tests {
    use super::{hog, HogParams};
    use crate::image::ImageBuffer;
    use crate::util::MatchError;

    fn gradient_image(width: usize, height: usize) -> ImageBuffer {
        let mut data = Vec::with_capacity(width * height);
        for _y in 0..height {
            for x in 0..width {
                data.push((x * 3 % 256) as f32);
            }
        }
        ImageBuffer::new(data, width, height, 1).unwrap()
    }

    #[test]
    fn output_shape_follows_cell_and_block_arithmetic() {
        let img = gradient_image(64, 48);
        let params = HogParams {
            cell_size: (8, 8),
            orientations: 9,
            block_size: (2, 2),
        };
        let feat = hog(&img, &params).unwrap();
        // 8x6 cells, 7x5 blocks of 2x2 cells.
        assert_eq!(feat.width(), 14);
        assert_eq!(feat.height(), 10);
        assert_eq!(feat.channels(), 9);
    }

    #[test]
    fn default_params_shape() {
        let img = gradient_image(64, 48);
        let feat = hog(&img, &HogParams::default()).unwrap();
        assert_eq!(feat.width(), 8);
        assert_eq!(feat.height(), 6);
        assert_eq!(feat.channels(), 8);
    }

    #[test]
    fn horizontal_gradient_lands_in_the_first_bin() {
        let img = gradient_image(32, 32);
        let feat = hog(&img, &HogParams::default()).unwrap();
        // A pure x-gradient has orientation 0, so interior cells put all
        // their energy into bin 0.
        let px = feat.pixel(2, 2);
        assert!(px[0] > 0.9);
        for &v in &px[1..] {
            assert!(v.abs() < 1e-6);
        }
    }

    #[test]
    fn flat_image_yields_zero_histograms() {
        let img = ImageBuffer::new(vec![50.0; 24 * 24], 24, 24, 1).unwrap();
        let feat = hog(&img, &HogParams::default()).unwrap();
        assert!(feat.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn oversized_block_is_rejected() {
        let img = gradient_image(16, 16);
        let params = HogParams {
            cell_size: (8, 8),
            orientations: 8,
            block_size: (3, 3),
        };
        assert_eq!(
            hog(&img, &params).err().unwrap(),
            MatchError::InvalidOptions("hog block does not fit into the cell grid")
        );
    }
}
