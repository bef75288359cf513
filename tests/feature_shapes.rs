use std::sync::Arc;

use featmatch::{DeepExtractor, Feature, HogParams, ImageBuffer, MatchError, MatchOptions};

fn make_rgb(width: usize, height: usize) -> ImageBuffer {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            for c in 0..3 {
                data.push((((x * 13) ^ (y * 7) ^ (x * y + c)) & 0xFF) as f32);
            }
        }
    }
    ImageBuffer::new(data, width, height, 3).unwrap()
}

#[test]
fn rgb_is_an_identity_passthrough() {
    let img = make_rgb(17, 11);
    let feat = Feature::Rgb.extract(&img, &MatchOptions::default()).unwrap();
    assert_eq!(feat, img);
}

#[test]
fn gray_keeps_spatial_shape_and_drops_to_one_channel() {
    let img = make_rgb(17, 11);
    let feat = Feature::Gray
        .extract(&img, &MatchOptions::default())
        .unwrap();
    assert_eq!(feat.width(), 17);
    assert_eq!(feat.height(), 11);
    assert_eq!(feat.channels(), 1);
}

#[test]
fn colorspace_features_keep_shape_and_channels() {
    let img = make_rgb(17, 11);
    for feature in [Feature::Lab, Feature::Luv, Feature::Hsv, Feature::Hls] {
        let feat = feature.extract(&img, &MatchOptions::default()).unwrap();
        assert_eq!(feat.width(), 17, "{}", feature.name());
        assert_eq!(feat.height(), 11, "{}", feature.name());
        assert_eq!(feat.channels(), 3, "{}", feature.name());
    }
}

#[test]
fn hog_shape_follows_the_block_arithmetic() {
    // 80x56 pixels, 8x8 cells -> 10x7 cells; 2x2 blocks -> 9x6 blocks.
    let img = make_rgb(80, 56);
    let options = MatchOptions {
        feature: Feature::Hog,
        hog: HogParams {
            cell_size: (8, 8),
            orientations: 9,
            block_size: (2, 2),
        },
        ..MatchOptions::default()
    };
    let feat = Feature::Hog.extract(&img, &options).unwrap();
    assert_eq!(feat.width(), 18); // n_blocks_x * bx
    assert_eq!(feat.height(), 12); // n_blocks_y * by
    assert_eq!(feat.channels(), 9);
}

#[test]
fn hog_shape_with_non_square_cells() {
    // 60x40 pixels, 6x4 cells -> 10x10 cells; 3x2 blocks -> 8x9 blocks.
    let img = make_rgb(60, 40);
    let options = MatchOptions {
        hog: HogParams {
            cell_size: (6, 4),
            orientations: 5,
            block_size: (3, 2),
        },
        ..MatchOptions::default()
    };
    let feat = Feature::Hog.extract(&img, &options).unwrap();
    assert_eq!(feat.width(), 24);
    assert_eq!(feat.height(), 18);
    assert_eq!(feat.channels(), 5);
}

struct StubEmbedding;

impl DeepExtractor for StubEmbedding {
    fn extract(&self, image: &ImageBuffer) -> featmatch::MatchResult<ImageBuffer> {
        // Halve the resolution, widen to 5 channels.
        ImageBuffer::zeros(image.width() / 2, image.height() / 2, 5)
    }
}

#[test]
fn deep_without_a_handle_is_invalid_options() {
    let img = make_rgb(16, 16);
    let err = Feature::Deep
        .extract(&img, &MatchOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, MatchError::InvalidOptions(_)));
}

#[test]
fn deep_dispatches_to_the_injected_extractor() {
    let img = make_rgb(16, 16);
    let options = MatchOptions {
        feature: Feature::Deep,
        deep: Some(Arc::new(StubEmbedding)),
        ..MatchOptions::default()
    };
    let feat = Feature::Deep.extract(&img, &options).unwrap();
    assert_eq!(feat.width(), 8);
    assert_eq!(feat.height(), 8);
    assert_eq!(feat.channels(), 5);
}
