//! Performance benchmarks for flow_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flow_core::config::{AreaSeed, SimulatorConfig};
use flow_core::geo::haversine_distance_km;
use flow_core::model::AreaStatus;
use flow_core::simulator::CrowdSimulator;

fn zones(count: usize) -> Vec<AreaSeed> {
    (0..count)
        .map(|i| AreaSeed::new(&format!("Zone {i}"), 500, 1_000, AreaStatus::Normal, "10 min"))
        .collect()
}

fn bench_tick(c: &mut Criterion) {
    let sizes = vec![("seed", 5), ("festival", 500), ("city", 5_000)];

    let mut group = c.benchmark_group("simulator_tick");
    for (name, area_count) in sizes {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &area_count,
            |b, &area_count| {
                let config = SimulatorConfig::default()
                    .with_seed(42)
                    .with_areas(zones(area_count));
                let sim = CrowdSimulator::new(config);
                b.iter(|| black_box(sim.tick()));
            },
        );
    }
    group.finish();
}

fn bench_haversine(c: &mut Criterion) {
    c.bench_function("haversine_distance_km", |b| {
        b.iter(|| {
            black_box(haversine_distance_km(
                black_box(20.8880),
                black_box(70.4017),
                black_box(22.2394),
                black_box(68.9678),
            ))
        })
    });
}

fn bench_booking(c: &mut Criterion) {
    c.bench_function("book_darshan_slot", |b| {
        b.iter_batched(
            || CrowdSimulator::new(SimulatorConfig::default().with_seed(7)),
            |sim| {
                for _ in 0..100 {
                    black_box(sim.book_darshan_slot("12:00 PM"));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_tick, bench_haversine, bench_booking);
criterion_main!(benches);
