use std::time::Duration;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use loadbalance::repartition::compute_chunks;

fn repartition_and_slice(combined: &[f64], num_workers: usize) -> f64 {
    compute_chunks(combined.len(), num_workers)
        .unwrap()
        .iter()
        .map(|chunk| chunk.slice(combined).iter().sum::<f64>())
        .sum()
}

pub fn repartition_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("repartition");
    group
        .sample_size(100)
        .measurement_time(Duration::from_secs(3));
    let combined: Vec<f64> = (0..1_000_000).map(|i| i as f64).collect();
    for num_workers in [1, 3, 16, 255] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_workers),
            &num_workers,
            |b, num_workers| b.iter(|| repartition_and_slice(&combined, *num_workers)),
        );
    }
    group.finish();
}

criterion_group!(benches, repartition_benchmark);
criterion_main!(benches);
