//! Pixel-wise color-space feature extractors.
//!
//! All conversions assume RGB input with samples in `0..=255` and emit
//! samples scaled back into the 8-bit range, matching the conventions of
//! common imaging libraries: hue is halved into `0..180`, L is stretched to
//! `0..255`, and the a/b/u/v axes are offset/scaled into `0..255`.

use crate::image::ImageBuffer;
use crate::util::{MatchError, MatchResult};

fn rgb_mismatch(img: &ImageBuffer) -> MatchError {
    MatchError::ShapeMismatch {
        tpl_width: img.width(),
        tpl_height: img.height(),
        tpl_channels: img.channels(),
        img_width: img.width(),
        img_height: img.height(),
        img_channels: 3,
    }
}

fn map_pixels<F>(img: &ImageBuffer, channels: usize, f: F) -> MatchResult<ImageBuffer>
where
    F: Fn(f32, f32, f32, &mut Vec<f32>),
{
    if img.channels() != 3 {
        return Err(rgb_mismatch(img));
    }
    let mut data = Vec::with_capacity(img.width() * img.height() * channels);
    for y in 0..img.height() {
        let row = img.row(y);
        for px in row.chunks_exact(3) {
            f(px[0], px[1], px[2], &mut data);
        }
    }
    ImageBuffer::new(data, img.width(), img.height(), channels)
}

/// Luma conversion (ITU-R BT.601 weights). Single-channel input passes
/// through unchanged.
pub fn gray(img: &ImageBuffer) -> MatchResult<ImageBuffer> {
    if img.channels() == 1 {
        return Ok(img.clone());
    }
    map_pixels(img, 1, |r, g, b, out| {
        out.push(0.299 * r + 0.587 * g + 0.114 * b);
    })
}

/// Hue in degrees for an RGB pixel, in `0..360`.
fn hue_deg(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let h = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// HSV conversion; H in `0..180`, S and V in `0..255`.
pub fn hsv(img: &ImageBuffer) -> MatchResult<ImageBuffer> {
    map_pixels(img, 3, |r, g, b, out| {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let s = if max == 0.0 { 0.0 } else { delta / max * 255.0 };
        out.push(hue_deg(r, g, b, max, delta) / 2.0);
        out.push(s);
        out.push(max);
    })
}

/// HLS conversion; H in `0..180`, L and S in `0..255`.
pub fn hls(img: &ImageBuffer) -> MatchResult<ImageBuffer> {
    map_pixels(img, 3, |r, g, b, out| {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;
        let s = if delta == 0.0 {
            0.0
        } else if l < 127.5 {
            delta / (max + min) * 255.0
        } else {
            delta / (510.0 - max - min) * 255.0
        };
        out.push(hue_deg(r, g, b, max, delta) / 2.0);
        out.push(l);
        out.push(s);
    })
}

/// sRGB gamma expansion of one 8-bit sample to linear `0..1`.
fn srgb_to_linear(v: f32) -> f32 {
    let v = v / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear RGB to CIE XYZ under D65, with Y normalized to `0..1`.
fn xyz(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let rl = srgb_to_linear(r);
    let gl = srgb_to_linear(g);
    let bl = srgb_to_linear(b);
    (
        0.412453 * rl + 0.357580 * gl + 0.180423 * bl,
        0.212671 * rl + 0.715160 * gl + 0.072169 * bl,
        0.019334 * rl + 0.119193 * gl + 0.950227 * bl,
    )
}

// D65 reference white.
const XN: f32 = 0.950456;
const ZN: f32 = 1.088754;

fn lab_f(t: f32) -> f32 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn lightness(y: f32) -> f32 {
    if y > 0.008856 {
        116.0 * y.cbrt() - 16.0
    } else {
        903.3 * y
    }
}

/// CIE Lab conversion; L scaled to `0..255`, a and b offset by 128.
pub fn lab(img: &ImageBuffer) -> MatchResult<ImageBuffer> {
    map_pixels(img, 3, |r, g, b, out| {
        let (x, y, z) = xyz(r, g, b);
        let fx = lab_f(x / XN);
        let fy = lab_f(y);
        let fz = lab_f(z / ZN);
        out.push(lightness(y) * 255.0 / 100.0);
        out.push(500.0 * (fx - fy) + 128.0);
        out.push(200.0 * (fy - fz) + 128.0);
    })
}

// u'/v' coordinates of the D65 white point.
const UN: f32 = 0.19793943;
const VN: f32 = 0.46831096;

/// CIE Luv conversion; L scaled to `0..255`, u and v offset/scaled into
/// `0..255`.
pub fn luv(img: &ImageBuffer) -> MatchResult<ImageBuffer> {
    map_pixels(img, 3, |r, g, b, out| {
        let (x, y, z) = xyz(r, g, b);
        let denom = x + 15.0 * y + 3.0 * z;
        let (up, vp) = if denom == 0.0 {
            (UN, VN)
        } else {
            (4.0 * x / denom, 9.0 * y / denom)
        };
        let l = lightness(y);
        let u = 13.0 * l * (up - UN);
        let v = 13.0 * l * (vp - VN);
        out.push(l * 255.0 / 100.0);
        out.push((u + 134.0) * 255.0 / 354.0);
        out.push((v + 140.0) * 255.0 / 262.0);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_px(r: f32, g: f32, b: f32) -> ImageBuffer {
        ImageBuffer::new(vec![r, g, b], 1, 1, 3).unwrap()
    }

    #[test]
    fn gray_uses_luma_weights() {
        let img = one_px(255.0, 0.0, 0.0);
        let g = gray(&img).unwrap();
        assert_eq!(g.channels(), 1);
        assert!((g.sample(0, 0, 0) - 76.245).abs() < 1e-3);
    }

    #[test]
    fn gray_passes_single_channel_through() {
        let img = ImageBuffer::new(vec![7.0, 9.0], 2, 1, 1).unwrap();
        assert_eq!(gray(&img).unwrap(), img);
    }

    #[test]
    fn color_conversions_reject_non_rgb_input() {
        let img = ImageBuffer::zeros(2, 2, 1).unwrap();
        assert!(hsv(&img).is_err());
        assert!(hls(&img).is_err());
        assert!(lab(&img).is_err());
        assert!(luv(&img).is_err());
    }

    #[test]
    fn hsv_of_pure_green() {
        let out = hsv(&one_px(0.0, 255.0, 0.0)).unwrap();
        let px = out.pixel(0, 0);
        assert!((px[0] - 60.0).abs() < 1e-3); // 120 deg halved
        assert!((px[1] - 255.0).abs() < 1e-3);
        assert!((px[2] - 255.0).abs() < 1e-3);
    }

    #[test]
    fn hls_of_mid_gray_has_zero_saturation() {
        let out = hls(&one_px(100.0, 100.0, 100.0)).unwrap();
        let px = out.pixel(0, 0);
        assert_eq!(px[0], 0.0);
        assert!((px[1] - 100.0).abs() < 1e-3);
        assert_eq!(px[2], 0.0);
    }

    #[test]
    fn lab_of_white_is_full_lightness_neutral_chroma() {
        let out = lab(&one_px(255.0, 255.0, 255.0)).unwrap();
        let px = out.pixel(0, 0);
        assert!((px[0] - 255.0).abs() < 1.0);
        assert!((px[1] - 128.0).abs() < 1.5);
        assert!((px[2] - 128.0).abs() < 1.5);
    }

    #[test]
    fn luv_of_black_sits_at_the_axis_offsets() {
        let out = luv(&one_px(0.0, 0.0, 0.0)).unwrap();
        let px = out.pixel(0, 0);
        assert_eq!(px[0], 0.0);
        assert!((px[1] - 134.0 * 255.0 / 354.0).abs() < 1e-3);
        assert!((px[2] - 140.0 * 255.0 / 262.0).abs() < 1e-3);
    }
}
