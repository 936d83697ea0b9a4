use criterion::{black_box, criterion_group, criterion_main, Criterion};
use neuronet_core::{feed_forward, xor_samples, Brain, NetworkConfig, Trainer, TrainingConfig};

fn wide_config() -> NetworkConfig {
    NetworkConfig {
        inputs: 32,
        hidden: vec![128, 128],
        outputs: 8,
        ..Default::default()
    }
}

/// Benchmark a forward pass through the XOR network.
fn bench_propagate_xor(c: &mut Criterion) {
    let (mut brain, _) = feed_forward(&NetworkConfig::default(), 42).unwrap();

    c.bench_function("propagate_xor", |b| {
        b.iter(|| {
            let out = brain.evaluate(black_box(&[1.0, -1.0])).unwrap();
            black_box(out)
        })
    });
}

/// Benchmark a forward pass through wide layers, sequential vs rayon.
fn bench_propagate_wide(c: &mut Criterion) {
    let inputs = vec![0.5; 32];
    let (brain, _) = feed_forward(&wide_config(), 42).unwrap();
    let mut sequential: Brain = brain.clone().with_parallel_threshold(usize::MAX);
    let mut parallel: Brain = brain.with_parallel_threshold(16);

    c.bench_function("propagate_wide_sequential", |b| {
        b.iter(|| black_box(sequential.evaluate(black_box(&inputs)).unwrap()))
    });
    c.bench_function("propagate_wide_parallel", |b| {
        b.iter(|| black_box(parallel.evaluate(black_box(&inputs)).unwrap()))
    });
}

/// Benchmark one XOR training epoch.
fn bench_train_epoch(c: &mut Criterion) {
    let (mut brain, _) = feed_forward(&NetworkConfig::default(), 42).unwrap();
    let trainer = Trainer::new(TrainingConfig::default());
    let samples = xor_samples();

    c.bench_function("train_epoch_xor", |b| {
        b.iter(|| black_box(trainer.train_epoch(&mut brain, &samples).unwrap()))
    });
}

/// Benchmark topology construction.
fn bench_build(c: &mut Criterion) {
    c.bench_function("build_wide", |b| {
        b.iter(|| black_box(feed_forward(&wide_config(), 42).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_propagate_xor,
    bench_propagate_wide,
    bench_train_epoch,
    bench_build
);
criterion_main!(benches);
