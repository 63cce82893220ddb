use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use curate::{CurateConfig, CurationEngine, MinHashConfig, Params, signature};
use std::hint::black_box;

const SAMPLE: &str = "Rust programs manage memory through ownership. The compiler checks \
    borrowing rules before the program ever runs, which removes a whole class of bugs. \
    Lifetimes describe how long references stay valid and let the checker reason locally.";

fn engine() -> CurationEngine {
    CurationEngine::new(CurateConfig::default()).expect("default config is valid")
}

fn filter_bench(c: &mut Criterion) {
    let engine = engine();
    let params = Params::new();
    let mut group = c.benchmark_group("filters");
    for name in ["entropy", "ngram", "readability_fog"] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let outcome = engine
                    .run_filters(black_box(SAMPLE), &[name], &params)
                    .expect("builtin filter");
                black_box(outcome);
            });
        });
    }
    group.bench_function("all_stateless", |b| {
        b.iter(|| {
            let outcome = engine
                .run_filters(
                    black_box(SAMPLE),
                    &["entropy", "ngram", "readability_fog"],
                    &params,
                )
                .expect("builtin filters");
            black_box(outcome);
        });
    });
    group.finish();
}

fn signature_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minhash_signature");
    for parallel in [false, true] {
        let cfg = MinHashConfig::default().with_parallel(parallel);
        group.bench_with_input(BenchmarkId::new("parallel", parallel), &cfg, |b, cfg| {
            b.iter(|| black_box(signature(black_box(SAMPLE), cfg)));
        });
    }
    group.finish();
}

fn dedup_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");
    for stored in [100usize, 1000] {
        let engine = engine();
        for i in 0..stored {
            engine.deduplicate(&format!("s{i}alpha s{i}beta s{i}gamma"), None);
        }
        group.bench_with_input(BenchmarkId::new("rejects_against", stored), &engine, |b, engine| {
            b.iter(|| black_box(engine.deduplicate(black_box("s0alpha s0beta s0gamma"), None)));
        });
    }
    group.finish();
}

fn cluster_bench(c: &mut Criterion) {
    let mut config = CurateConfig::default();
    config.clustering.seed = Some(42);
    let engine = CurationEngine::new(config).expect("valid config");
    let topics = ["compiler", "garden", "orbit", "ledger"];
    let texts: Vec<String> = (0..400)
        .map(|i| {
            let topic = topics[i % topics.len()];
            format!("{topic} note {i} about {topic} and related {topic} terms")
        })
        .collect();

    c.bench_function("cluster_400_k4", |b| {
        b.iter(|| black_box(engine.cluster(black_box(&texts), Some(4), Some(50))));
    });
}

fn reliability_bench(c: &mut Criterion) {
    let engine = engine();
    for i in 0..1000 {
        engine.record_evaluation(&format!("user-{}", i % 50), i % 3 != 0, i % 2 == 0);
    }
    c.bench_function("reliability_infer", |b| {
        b.iter(|| black_box(engine.infer_correctness(black_box("user-7"), true)));
    });
}

criterion_group!(
    benches,
    filter_bench,
    signature_bench,
    dedup_bench,
    cluster_bench,
    reliability_bench
);
criterion_main!(benches);
