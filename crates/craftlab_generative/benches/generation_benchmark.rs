//! Benchmark for stream, noise and grid generation.
//!
//! TARGET: a full 100x40 seeded noise grid well under a frame (16ms)
//!
//! Run with: cargo bench --package craftlab_generative --bench generation_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use craftlab_generative::{
    scene, Alea, CellStrategy, ColorGrid, GridBounds, GridShape, NoiseField, Palette,
    RandomStream, Seed, Smoothness,
};

fn benchmark_stream_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("alea");
    group.throughput(Throughput::Elements(1_000));

    group.bench_function("1K_draws", |b| {
        let mut stream = Alea::new(Seed::new(99));
        b.iter(|| {
            for _ in 0..1_000 {
                black_box(stream.next_f64());
            }
        });
    });

    group.finish();
}

fn benchmark_single_sample(c: &mut Criterion) {
    let field = NoiseField::from_seed(Seed::new(42));

    c.bench_function("single_noise_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(field.sample(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_field_construction(c: &mut Criterion) {
    c.bench_function("noise_field_construction", |b| {
        b.iter(|| black_box(NoiseField::from_seed(black_box(Seed::new(99)))));
    });
}

fn benchmark_uniform_grid(c: &mut Criterion) {
    let palette = Palette::simple();
    let shape = GridShape::new(100, 40);

    let mut group = c.benchmark_group("grids");
    group.throughput(Throughput::Elements(shape.cell_count() as u64));

    group.bench_function("uniform_100x40", |b| {
        let mut stream = Alea::new(Seed::new(7));
        b.iter(|| {
            black_box(ColorGrid::from_strategy(
                shape,
                &palette,
                &mut CellStrategy::Uniform(&mut stream),
            ))
        });
    });

    let field = NoiseField::from_seed(Seed::new(7));
    group.bench_function("noise_100x40", |b| {
        b.iter(|| {
            black_box(scene::noise_grid(
                shape,
                &field,
                Smoothness::default(),
                &palette,
            ))
        });
    });

    group.finish();
}

fn benchmark_seeded_scene(c: &mut Criterion) {
    let palette = Palette::simple();

    c.bench_function("seeded_noise_scene", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed % 100 + 1;
            black_box(scene::seeded_noise_grid(
                Seed::new(seed),
                GridBounds::default(),
                Smoothness::default(),
                &palette,
            ))
        });
    });
}

criterion_group!(
    benches,
    benchmark_stream_draws,
    benchmark_single_sample,
    benchmark_field_construction,
    benchmark_uniform_grid,
    benchmark_seeded_scene
);
criterion_main!(benches);
