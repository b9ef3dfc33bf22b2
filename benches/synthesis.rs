use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixeltone::audio::synthesize;
use pixeltone::grid::PixelGrid;
use pixeltone::params::{DurationPolicy, SynthesisParams};

fn gradient_grid(rows: usize, cols: usize) -> PixelGrid {
    let intensity = (0..rows * cols)
        .map(|i| (i % cols) as f32 / (cols - 1) as f32)
        .collect();
    PixelGrid::new(rows, cols, intensity).unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let grid = gradient_grid(32, 32);
    let params = SynthesisParams::default();
    let plan = DurationPolicy::default()
        .resolve(grid.rows(), grid.cols(), params.sample_rate_hz)
        .unwrap();

    c.bench_function("synthesize 32x32 sequential", |b| {
        b.iter(|| synthesize(black_box(&grid), &params, &plan, false).unwrap())
    });

    c.bench_function("synthesize 32x32 parallel", |b| {
        b.iter(|| synthesize(black_box(&grid), &params, &plan, true).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
