//! Score surfaces over candidate template offsets.
//!
//! A `Heatmap` holds one score per candidate top-left placement of the
//! template inside the search image. After the matching paths have applied
//! their sign conventions, lower values always mean better matches.

use crate::util::{MatchError, MatchResult};

/// Dense 2D score surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Heatmap {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Heatmap {
    /// Creates a heatmap from a row-major score buffer.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> MatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(MatchError::DegenerateInput {
                width,
                height,
                channels: 1,
            });
        }
        let needed = width * height;
        if data.len() != needed {
            return Err(MatchError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the heatmap width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the heatmap height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the backing score slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the score at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    /// Returns the maximum score.
    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Returns the location and value of the minimum score. Ties resolve to
    /// the first occurrence in row-major scan order.
    pub fn min_loc(&self) -> (usize, usize, f32) {
        let mut best_idx = 0;
        let mut best = self.data[0];
        for (idx, &v) in self.data.iter().enumerate().skip(1) {
            if v < best {
                best = v;
                best_idx = idx;
            }
        }
        (best_idx % self.width, best_idx / self.width, best)
    }

    /// Divides every score by the maximum. A maximum of zero (or a
    /// non-finite one) leaves the heatmap unchanged.
    pub(crate) fn normalize_by_max(&mut self) {
        let max = self.max();
        if max == 0.0 || !max.is_finite() {
            return;
        }
        for v in &mut self.data {
            *v /= max;
        }
    }

    /// Pads the heatmap to `(width, height)`, filling the unreached border
    /// cells with the current maximum so they rank as worst matches.
    pub(crate) fn retain_size(self, width: usize, height: usize) -> MatchResult<Heatmap> {
        debug_assert!(width >= self.width && height >= self.height);
        let fill = self.max();
        let mut data = vec![fill; width * height];
        for y in 0..self.height {
            let src = &self.data[y * self.width..(y + 1) * self.width];
            data[y * width..y * width + self.width].copy_from_slice(src);
        }
        Heatmap::new(data, width, height)
    }

    /// Resamples the heatmap to `(new_width, new_height)` by area averaging:
    /// every destination cell takes the overlap-weighted mean of the source
    /// cells its footprint covers. Exact pixel averaging when shrinking,
    /// box sampling when enlarging.
    pub fn resize_area(&self, new_width: usize, new_height: usize) -> MatchResult<Heatmap> {
        if new_width == 0 || new_height == 0 {
            return Err(MatchError::DegenerateInput {
                width: new_width,
                height: new_height,
                channels: 1,
            });
        }
        if new_width == self.width && new_height == self.height {
            return Ok(self.clone());
        }

        let sx = self.width as f64 / new_width as f64;
        let sy = self.height as f64 / new_height as f64;
        let mut data = Vec::with_capacity(new_width * new_height);
        for dy in 0..new_height {
            let y0 = dy as f64 * sy;
            let y1 = y0 + sy;
            let iy0 = y0.floor() as usize;
            let iy1 = (y1.ceil() as usize).min(self.height);
            for dx in 0..new_width {
                let x0 = dx as f64 * sx;
                let x1 = x0 + sx;
                let ix0 = x0.floor() as usize;
                let ix1 = (x1.ceil() as usize).min(self.width);

                let mut acc = 0.0f64;
                let mut total = 0.0f64;
                for iy in iy0..iy1 {
                    let wy = (y1.min((iy + 1) as f64) - y0.max(iy as f64)).max(0.0);
                    let row = &self.data[iy * self.width..(iy + 1) * self.width];
                    for (ix, &v) in row.iter().enumerate().take(ix1).skip(ix0) {
                        let wx = (x1.min((ix + 1) as f64) - x0.max(ix as f64)).max(0.0);
                        let w = wx * wy;
                        acc += w * v as f64;
                        total += w;
                    }
                }
                data.push((acc / total) as f32);
            }
        }
        Heatmap::new(data, new_width, new_height)
    }
}
