#[macro_use]
extern crate criterion;
extern crate mandelbrot;

use criterion::Criterion;
use mandelbrot::{render, RenderConfig};

fn config(threads: usize) -> RenderConfig {
    RenderConfig {
        pixels_per_unit: 100,
        threads,
        ..RenderConfig::default()
    }
}

fn bench_render(c: &mut Criterion) {
    c.bench_function("render 300x200 single", |b| b.iter(|| render(&config(1))));
    c.bench_function("render 300x200 four bands", |b| b.iter(|| render(&config(4))));
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
