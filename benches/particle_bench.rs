//! Physics step and pixel sampling throughput.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vaportext::color::Rgb;
use vaportext::options::{Options, TextAlignment};
use vaportext::particle::physics::{self, VaporParams};
use vaportext::particle::sampling::sample_pixels;
use vaportext::particle::{Particle, ParticleField, TextBounds};
use vaportext::surface::PixelBuffer;

fn field(count: usize) -> ParticleField {
    let width = 600.0;
    let particles = (0..count)
        .map(|i| {
            let x = (i % 600) as f32;
            let y = (i / 600) as f32;
            Particle::new(Vec2::new(x, y), Rgb::WHITE, 0.6)
        })
        .collect();
    let bounds = TextBounds::from_anchor(width / 2.0, width, TextAlignment::Center);
    ParticleField::new(particles, bounds, 0)
}

fn vaporize_benchmark(c: &mut Criterion) {
    let params = VaporParams::from_options(&Options::default().sanitized());
    let mut group = c.benchmark_group("vaporize_step");

    for count in [1_000, 10_000, 50_000].iter() {
        let mut rng = StdRng::seed_from_u64(7);
        let front = field(*count).bounds().right;
        let _ = group.bench_function(format!("{count}_particles"), |b| {
            b.iter_batched(
                || field(*count),
                |f| black_box(physics::vaporize(f, front, 1.0 / 60.0, &params, &mut rng)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn materialize_benchmark(c: &mut Criterion) {
    let _ = c.bench_function("materialize_10000", |b| {
        b.iter_batched(
            || field(10_000),
            |f| black_box(physics::materialize(f, black_box(0.5))),
            BatchSize::LargeInput,
        )
    });
}

fn sampling_benchmark(c: &mut Criterion) {
    let (w, h) = (1_200, 300);
    let mut buffer = PixelBuffer::transparent(w, h);
    for y in h / 4..h * 3 / 4 {
        for x in (0..w).filter(|x| x % 40 < 30) {
            buffer.set_pixel(x, y, [15, 23, 42, 255]);
        }
    }

    let mut group = c.benchmark_group("sample_pixels");
    for stride in [1_u32, 2, 3].iter() {
        let _ = group.bench_function(format!("stride_{stride}"), |b| {
            b.iter(|| black_box(sample_pixels(&buffer, *stride, 1.5 * *stride as f32)))
        });
    }
    group.finish();
}

criterion_group!(benches, vaporize_benchmark, materialize_benchmark, sampling_benchmark);
criterion_main!(benches);
