use criterion::{criterion_group, criterion_main, Criterion};
use featmatch::{match_template, multi_feat_match, BBox, Feature, ImageBuffer, MatchOptions};
use std::hint::black_box;

fn make_image(width: usize, height: usize, channels: usize) -> ImageBuffer {
    let mut data = Vec::with_capacity(width * height * channels);
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                data.push((((x * 13) ^ (y * 7) ^ (x * y + c)) & 0xFF) as f32);
            }
        }
    }
    ImageBuffer::new(data, width, height, channels).unwrap()
}

fn bench_fast_path(c: &mut Criterion) {
    let image = make_image(128, 128, 3);
    let template = image.crop(&BBox::new(40, 36, 32, 32)).unwrap();
    let options = MatchOptions::default();

    c.bench_function("fast_path_rgb_128x128_tpl32", |b| {
        b.iter(|| {
            let heatmap =
                match_template(black_box(&template), black_box(&image), &options).unwrap();
            black_box(heatmap);
        })
    });
}

fn bench_generic_path(c: &mut Criterion) {
    let image = make_image(64, 64, 6);
    let template = image.crop(&BBox::new(20, 20, 16, 16)).unwrap();
    let options = MatchOptions::default();

    c.bench_function("generic_path_6ch_64x64_tpl16", |b| {
        b.iter(|| {
            let heatmap =
                match_template(black_box(&template), black_box(&image), &options).unwrap();
            black_box(heatmap);
        })
    });
}

fn bench_fusion(c: &mut Criterion) {
    let image = make_image(128, 128, 3);
    let template = image.crop(&BBox::new(40, 36, 32, 32)).unwrap();
    let options = MatchOptions {
        features: vec![
            MatchOptions::default(),
            MatchOptions::default().with_feature(Feature::Gray),
            MatchOptions::default().with_feature(Feature::Hog),
        ],
        ..MatchOptions::default()
    };

    c.bench_function("fusion_rgb_gray_hog_128x128", |b| {
        b.iter(|| {
            let fused =
                multi_feat_match(black_box(&template), black_box(&image), &options).unwrap();
            black_box(fused);
        })
    });
}

criterion_group!(benches, bench_fast_path, bench_generic_path, bench_fusion);
criterion_main!(benches);
