use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use prnu_extract::prnu::filters::variance::{MAX_BORDER, variance_estimates};
use prnu_extract::prnu::{BorderedBuffer, ImageBuffer, PrnuExtractor, RgbImageData};

fn generate_mock_rgb(width: usize, height: usize) -> RgbImageData {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 7 + y * 13) % 256) as u8;
            data.extend_from_slice(&[value, value.wrapping_add(31), value / 2]);
        }
    }
    RgbImageData::new(width, height, data).unwrap()
}

fn benchmark_extraction_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_by_size");

    let sizes = vec![
        (64, 64, "64x64"),
        (256, 256, "256x256"),
        (640, 480, "640x480"),
    ];

    for (width, height, label) in sizes {
        let rgb = generate_mock_rgb(width, height);

        group.bench_with_input(BenchmarkId::from_parameter(label), &rgb, |b, rgb| {
            let mut extractor = PrnuExtractor::new(height, width).unwrap();
            let mut residual = ImageBuffer::new(height, width);

            b.iter(|| {
                extractor.extract_into(black_box(rgb), &mut residual).unwrap();
            });
        });
    }

    group.finish();
}

fn benchmark_variance_estimates(c: &mut Criterion) {
    let (height, width) = (256, 256);
    let data = (0..height * width).map(|k| ((k * 31) % 97) as f64).collect();
    let input = ImageBuffer::from_vec(height, width, data).unwrap();
    let mut estimates = ImageBuffer::new(height, width);
    let mut convolution = ImageBuffer::new(height, width);
    let mut padded = BorderedBuffer::try_new(height, width, MAX_BORDER).unwrap();

    c.bench_function("variance_estimates_256x256", |b| {
        b.iter(|| {
            variance_estimates(&mut estimates, black_box(&input), &mut padded, &mut convolution).unwrap();
        });
    });
}

criterion_group!(benches, benchmark_extraction_sizes, benchmark_variance_estimates);
criterion_main!(benches);
