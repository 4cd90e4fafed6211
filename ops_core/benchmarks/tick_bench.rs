use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ops_core::{build_headless_app_with_config, run_tick, SimulationConfig};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for ticks in [1u32, 10, 100] {
        group.bench_with_input(BenchmarkId::new("run", ticks), &ticks, |b, &ticks| {
            b.iter_batched(
                || {
                    build_headless_app_with_config(SimulationConfig {
                        seed: 42,
                        ..SimulationConfig::default()
                    })
                },
                |mut app| {
                    for _ in 0..ticks {
                        run_tick(&mut app);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(tick_benches, bench_tick);
criterion_main!(tick_benches);
