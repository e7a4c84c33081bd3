//! Benchmarks for model generation and transmission

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use structgen::prelude::*;

fn long_beam(spans: usize) -> ContinuousBeam {
    ContinuousBeam::with_spans(vec![4.0; spans])
}

fn benchmark_reference_beam(c: &mut Criterion) {
    c.bench_function("beam_5span_generate", |b| {
        b.iter(|| black_box(ContinuousBeam::default().generate().unwrap()))
    });
}

fn benchmark_long_beam(c: &mut Criterion) {
    let beam = long_beam(500);
    c.bench_function("beam_500span_generate", |b| {
        b.iter(|| black_box(beam.generate().unwrap()))
    });
}

fn benchmark_truss(c: &mut Criterion) {
    let truss = PrattTruss::new(300.0, 4.0, 200);
    c.bench_function("truss_200bay_generate", |b| {
        b.iter(|| black_box(truss.generate().unwrap()))
    });
}

fn benchmark_apply(c: &mut Criterion) {
    let generated = PrattTruss::new(300.0, 4.0, 200).generate().unwrap();
    c.bench_function("truss_200bay_apply_recording", |b| {
        b.iter(|| {
            let mut host = RecordingApi::new();
            black_box(apply_model(&generated.model, &mut host).unwrap())
        })
    });
}

criterion_group!(
    benches,
    benchmark_reference_beam,
    benchmark_long_beam,
    benchmark_truss,
    benchmark_apply,
);
criterion_main!(benches);
