//! Pipeline and rendering benchmarks.

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use irongen_bench::{init_tracing, synthetic_model};
use irongen_codegen::{CodeOptions, JavaLikeRenderer, Renderer, build_tree};
use std::hint::black_box;

const SIZES: [usize; 3] = [8, 64, 256];

fn benchmark_build_tree(c: &mut Criterion) {
    init_tracing();
    let options = CodeOptions::default();
    let mut group = c.benchmark_group("build_tree");

    for size in SIZES {
        let model = synthetic_model(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &model, |b, model| {
            b.iter_batched(
                || model.clone(),
                |model| black_box(build_tree(model, &options)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    init_tracing();
    let options = CodeOptions::default();
    let renderer = JavaLikeRenderer::default();
    let mut group = c.benchmark_group("render");

    for size in SIZES {
        let Ok(root) = build_tree(synthetic_model(size), &options) else {
            continue;
        };
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| black_box(renderer.render(black_box(&root))))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_build_tree, benchmark_render);
criterion_main!(benches);
