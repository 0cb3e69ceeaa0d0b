use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use assoclib::config::{CacheConfig, ReplacementPolicyConfig};
use assoclib::model::CacheModel;

/// A loop over a working set slightly larger than the cache, with a strided scan mixed in
fn synthetic_trace(len: usize) -> Vec<u64> {
    (0..len as u64)
        .map(|i| if i % 4 == 0 { (i * 4096) & 0xffff_ffff } else { (i * 64) % (48 * 1024) })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Policies");
    let trace = synthetic_trace(100_000);

    for policy in [
        ReplacementPolicyConfig::LeastRecentlyUsed,
        ReplacementPolicyConfig::FirstInFirstOut,
        ReplacementPolicyConfig::Random,
    ] {
        for ways in [1, 8, 512] {
            let config = CacheConfig::new(32 * 1024, 64, ways, policy).with_seed(1);
            group.bench_with_input(BenchmarkId::new(policy.to_string(), ways), &(config, &trace), |bench, (conf, trace)| {
                bench.iter(|| {
                    CacheModel::new(conf.clone()).unwrap().simulate(trace.iter().copied())
                });
            });
        }
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = criterion_benchmark
);
criterion_main!(benches);
