use chrono::Duration;
use persistence::{MemoryStore, SaveStore};
use sim_core::SimConfig;
use sim_runtime::{demo_simulation, Simulation};

fn config(seed: &str) -> SimConfig {
    SimConfig {
        rng_seed: seed.to_string(),
        competitor_games: 10,
        ..SimConfig::default()
    }
}

fn run_days(seed: &str, days: u32) -> Simulation {
    let (mut sim, _) = demo_simulation(config(seed)).unwrap();
    sim.fast_forward();
    for _ in 0..days {
        sim.tick(1).unwrap();
    }
    sim
}

#[test]
fn same_seed_replays_identically() {
    let a = run_days("replay", 45);
    let b = run_days("replay", 45);
    assert_eq!(a.to_snapshot(), b.to_snapshot());
    assert_eq!(a.ledger().total(), b.ledger().total());
    assert_eq!(a.ledger().entries(), b.ledger().entries());
    assert_eq!(a.now(), sim_core::starting_time() + Duration::days(45));
}

#[test]
fn different_seeds_diverge() {
    let a = run_days("alpha", 10);
    let b = run_days("beta", 10);
    assert_ne!(a.to_snapshot().data, b.to_snapshot().data);
}

#[test]
fn one_big_tick_matches_many_small_ones() {
    let small = run_days("steps", 20);
    let (mut big, _) = demo_simulation(config("steps")).unwrap();
    big.fast_forward();
    big.tick(20).unwrap();
    assert_eq!(big.to_snapshot(), small.to_snapshot());
}

#[test]
fn autosave_then_load_restores_the_world() {
    let (mut sim, game) = demo_simulation(config("autosave")).unwrap();
    sim.attach_store(Box::new(MemoryStore::new()));
    sim.fast_forward();
    sim.tick(14).unwrap();

    let store = sim.store().unwrap();
    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "autosave");
    assert!(listed[0].last_saved > 0);
    let saved = store.get("autosave").unwrap().unwrap();
    assert!(saved.time > sim_core::starting_time());

    let before = sim.to_snapshot();
    sim.tick(3).unwrap();
    assert_ne!(sim.now(), before.time);

    sim.load_from_store("autosave").unwrap();
    assert_eq!(sim.now(), saved.time);
    assert_eq!(sim.ledger().total(), saved.cash);
    assert_eq!(sim.to_snapshot().data, saved.data);
    assert!(sim.world().games.iter().any(|g| g.id == game));
    assert_eq!(sim.registry().len(), sim_runtime::DEFAULT_HANDLERS.len());
}
