//! Benchmarks for the mockup pipeline.

use std::fs;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mockup_cli::descriptor::DescriptorBuilder;
use mockup_cli::dimensions::{DimensionResolver, Dimensions};
use mockup_cli::parser::classify_mask;
use mockup_cli::Result;

/// Resolver that skips decoding so the benchmark measures the builder.
struct FixedResolver;

impl DimensionResolver for FixedResolver {
    fn resolve(&self, _bytes: &[u8]) -> Result<Dimensions> {
        Ok(Dimensions::new(2000, 1500))
    }
}

// -- Filename benchmarks --

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    group.bench_function("design_mask", |b| {
        b.iter(|| classify_mask(black_box("m12-front_logo-design-z3-n0.25.png")))
    });

    group.bench_function("color_mask", |b| {
        b.iter(|| classify_mask(black_box("m4-body-color-default_1a2b3c-z1.jpg")))
    });

    group.bench_function("unmatched", |b| {
        b.iter(|| classify_mask(black_box("readme.txt")))
    });

    group.finish();
}

// -- Builder benchmarks --

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    let dir = tempfile::tempdir().unwrap();
    let mut files = vec!["beauty.jpg".to_string(), "uv.png".to_string()];
    for id in 1..=40 {
        files.push(format!("m{}-part_{}-design-z{}.png", id, id, id % 7));
        files.push(format!("d{}.png", id));
        files.push(format!("l{}.png", id));
    }
    files.sort();
    for file in &files {
        fs::write(dir.path().join(file), b"img").unwrap();
    }

    let builder = DescriptorBuilder::new(&FixedResolver);

    group.bench_function("forty_layers", |b| {
        b.iter(|| builder.build_from_listing(black_box(dir.path()), black_box(&files)))
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_build);
criterion_main!(benches);
