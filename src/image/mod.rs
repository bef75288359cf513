//! Owned multi-channel image buffers.
//!
//! `ImageBuffer` is a dense, row-major `height x width x channels` array of
//! `f32` samples with interleaved channels. Sample values are nominally in
//! `0..=255` (8-bit image data promoted to float), but nothing in the matcher
//! depends on that range. Buffers are value objects: the matching engine only
//! ever reads them.

use crate::geom::BBox;
use crate::util::{MatchError, MatchResult};

/// Owned dense image with interleaved channels.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuffer {
    data: Vec<f32>,
    width: usize,
    height: usize,
    channels: usize,
}

impl ImageBuffer {
    /// Creates an image from a row-major interleaved sample buffer.
    pub fn new(data: Vec<f32>, width: usize, height: usize, channels: usize) -> MatchResult<Self> {
        let needed = required_len(width, height, channels)?;
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
            channels,
        })
    }

    /// Creates a zero-filled image.
    pub fn zeros(width: usize, height: usize, channels: usize) -> MatchResult<Self> {
        let needed = required_len(width, height, channels)?;
        Ok(Self {
            data: vec![0.0; needed],
            width,
            height,
            channels,
        })
    }

    /// Creates an image by promoting 8-bit samples to float.
    pub fn from_u8(data: &[u8], width: usize, height: usize, channels: usize) -> MatchResult<Self> {
        Self::new(
            data.iter().map(|&v| v as f32).collect(),
            width,
            height,
            channels,
        )
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the backing sample slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the sample at `(x, y, c)`; panics when out of bounds.
    pub fn sample(&self, x: usize, y: usize, c: usize) -> f32 {
        debug_assert!(x < self.width && y < self.height && c < self.channels);
        self.data[(y * self.width + x) * self.channels + c]
    }

    /// Returns the channel slice of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> &[f32] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Returns the contiguous sample row `y` (`width * channels` values).
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.width * self.channels;
        &self.data[start..start + self.width * self.channels]
    }

    /// Copies the sub-image covered by `bbox` out of this image.
    pub fn crop(&self, bbox: &BBox) -> MatchResult<ImageBuffer> {
        let oob = MatchError::RoiOutOfBounds {
            x: bbox.x.max(0) as usize,
            y: bbox.y.max(0) as usize,
            width: bbox.width as usize,
            height: bbox.height as usize,
            img_width: self.width,
            img_height: self.height,
        };
        if bbox.x < 0 || bbox.y < 0 {
            return Err(oob);
        }
        let x = bbox.x as usize;
        let y = bbox.y as usize;
        let w = bbox.width as usize;
        let h = bbox.height as usize;
        if x + w > self.width || y + h > self.height {
            return Err(oob);
        }

        let mut data = Vec::with_capacity(w * h * self.channels);
        for row in y..y + h {
            let start = (row * self.width + x) * self.channels;
            data.extend_from_slice(&self.data[start..start + w * self.channels]);
        }
        ImageBuffer::new(data, w, h, self.channels)
    }
}

fn required_len(width: usize, height: usize, channels: usize) -> MatchResult<usize> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(MatchError::DegenerateInput {
            width,
            height,
            channels,
        });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(MatchError::DegenerateInput {
            width,
            height,
            channels,
        })
}

#[cfg(test)]
mod tests {
    use super::ImageBuffer;
    use crate::geom::BBox;
    use crate::util::MatchError;

    #[test]
    fn rejects_zero_area_and_short_buffers() {
        let err = ImageBuffer::new(vec![], 0, 2, 1).err().unwrap();
        assert_eq!(
            err,
            MatchError::DegenerateInput {
                width: 0,
                height: 2,
                channels: 1,
            }
        );

        let err = ImageBuffer::new(vec![0.0; 5], 2, 2, 2).err().unwrap();
        assert_eq!(err, MatchError::BufferSizeMismatch { needed: 8, got: 5 });
    }

    #[test]
    fn sample_and_row_follow_interleaved_layout() {
        let data: Vec<f32> = (0..24).map(|v| v as f32).collect();
        let img = ImageBuffer::new(data, 4, 2, 3).unwrap();
        assert_eq!(img.sample(1, 0, 2), 5.0);
        assert_eq!(img.pixel(3, 1), &[21.0, 22.0, 23.0]);
        assert_eq!(img.row(1).len(), 12);
        assert_eq!(img.row(1)[0], 12.0);
    }

    #[test]
    fn crop_copies_the_boxed_region() {
        let data: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let img = ImageBuffer::new(data, 4, 4, 1).unwrap();
        let crop = img.crop(&BBox::new(1, 2, 2, 2)).unwrap();
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.as_slice(), &[9.0, 10.0, 13.0, 14.0]);
    }

    #[test]
    fn crop_rejects_out_of_bounds_boxes() {
        let img = ImageBuffer::zeros(4, 4, 1).unwrap();
        assert!(img.crop(&BBox::new(3, 3, 2, 2)).is_err());
        assert!(img.crop(&BBox::new(-1, 0, 2, 2)).is_err());
    }
}
