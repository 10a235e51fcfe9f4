use std::fs;
use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;

use loganizer::analyzer::{Analyzer, EngineConfig, FixedSampler};
use loganizer::config_file::LogDescriptor;
use loganizer::reconcile::reconcile;

fn zero_latency() -> EngineConfig {
    EngineConfig {
        latency_min: Duration::ZERO,
        latency_max: Duration::ZERO,
        ..EngineConfig::default()
    }
}

fn fixture(files: usize, lines: usize) -> (TempDir, Vec<String>) {
    let dir = TempDir::new().expect("temp dir");
    let content = "127.0.0.1 - - [10/Oct/2024:13:55:36 +0000] \"GET / HTTP/1.1\" 200 512\n"
        .repeat(lines);
    let paths = (0..files)
        .map(|i| {
            let path = dir.path().join(format!("{i}.log"));
            fs::write(&path, &content).expect("write log");
            path.to_string_lossy().into_owned()
        })
        .collect();
    (dir, paths)
}

fn bench_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_fanout");
    let analyzer = Analyzer::new(zero_latency());

    for files in [1usize, 8, 64] {
        let (_dir, paths) = fixture(files, 1_000);
        group.bench_with_input(BenchmarkId::from_parameter(files), &paths, |b, paths| {
            b.iter(|| {
                let mut sampler = FixedSampler::passing(Duration::ZERO);
                black_box(analyzer.analyze(black_box(paths), &mut sampler));
            });
        });
    }

    group.finish();
}

fn bench_reconcile(c: &mut Criterion) {
    let (_dir, paths) = fixture(256, 10);
    let descriptors: Vec<_> = paths
        .iter()
        .enumerate()
        .map(|(i, p)| LogDescriptor::new(format!("log-{i}"), p.clone(), "nginx-access"))
        .collect();
    let batch = Analyzer::new(zero_latency())
        .analyze(&paths, &mut FixedSampler::passing(Duration::ZERO));

    c.bench_function("reconcile_256", |b| {
        b.iter(|| {
            black_box(reconcile(
                black_box(&descriptors),
                black_box(&batch.results),
                black_box(&batch.failures),
            ));
        });
    });
}

criterion_group!(benches, bench_fanout, bench_reconcile);
criterion_main!(benches);
