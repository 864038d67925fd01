use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use sim_core::SimConfig;
use sim_runtime::{demo_simulation, Cadence, Registry, Simulation};

fn bench_ticks(c: &mut Criterion) {
    let config = SimConfig {
        competitor_games: 20,
        ..SimConfig::default()
    };
    let (base, _) = demo_simulation(config.clone()).unwrap();
    let world = base.world().clone();

    c.bench_function("fast_forward_30_days", |b| {
        b.iter_batched(
            || {
                let mut sim = Simulation::new(config.clone(), world.clone());
                sim.fast_forward();
                sim
            },
            |mut sim| sim.tick(30).unwrap(),
            BatchSize::LargeInput,
        )
    });
    c.bench_function("normal_speed_24_hours", |b| {
        b.iter_batched(
            || Simulation::new(config.clone(), world.clone()),
            |mut sim| sim.tick(24).unwrap(),
            BatchSize::LargeInput,
        )
    });
}

fn bench_registry(c: &mut Criterion) {
    let mut registry = Registry::new();
    for id in 0..64u32 {
        let cadence = [Cadence::Hourly, Cadence::Daily, Cadence::Monthly][id as usize % 3];
        registry.register(id, cadence, id, false);
    }
    let start = sim_core::starting_time();
    c.bench_function("registry_fire_one_day_of_minutes", |b| {
        b.iter(|| {
            let mut fired = 0usize;
            let mut prev = start;
            for m in 1..=1440 {
                let now = start + chrono::Duration::minutes(m);
                fired += registry
                    .fire_boundary(now, prev, |_, _| Ok::<(), ()>(()))
                    .unwrap();
                prev = now;
            }
            fired
        })
    });
}

criterion_group!(benches, bench_ticks, bench_registry);
criterion_main!(benches);
