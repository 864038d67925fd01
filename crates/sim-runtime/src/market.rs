//! Competitor catalogue generated for a new game.
//!
//! Rival studios release games on every platform that came out before the
//! start date. Their sales are then simulated hour by hour up to the start so
//! the market is already partly saturated when the player arrives.

use crate::error::SimError;
use crate::sim::Simulation;
use crate::steps::{refresh_units_sold, run_game_step, GameContext};
use chrono::{Duration, Timelike};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sim_core::{
    Company, CompanyId, CompanyKind, CompanyOwner, Feature, Game, GameId, Genre, Media,
    Phase, Platform, SimRng, SimTime,
};
use sim_econ::GenreFactorMatrix;
use tracing::info;

const FIRST_WORDS: [&str; 16] = [
    "Silver", "Neon", "Iron", "Pixel", "Quantum", "Crimson", "Golden", "Hyper", "Lunar", "Solar",
    "Turbo", "Cosmic", "Binary", "Atomic", "Shadow", "Electric",
];
const SECOND_WORDS: [&str; 16] = [
    "Forge", "Works", "Arts", "Labs", "Studio", "Software", "Bytes", "Games", "Logic", "Systems",
    "Dreams", "Vision", "Circuit", "Realms", "Foundry", "Interactive",
];

/// Rival studios generated per new game.
pub const COMPETITOR_COMPANIES: usize = 100;

/// Random two-word title.
pub fn two_word_name(rng: &mut SimRng) -> String {
    let a = rng.pick(&FIRST_WORDS).copied().unwrap_or("Nova");
    let b = rng.pick(&SECOND_WORDS).copied().unwrap_or("Soft");
    format!("{a} {b}")
}

/// Rival studios with generated names.
pub fn competitor_companies(rng: &mut SimRng, count: usize) -> Vec<Company> {
    (0..count)
        .map(|_| Company {
            id: CompanyId::new(rng.unique_id()),
            name: two_word_name(rng),
            owner: CompanyOwner::Competition,
            kind: CompanyKind::Private,
            location: String::new(),
        })
        .collect()
}

/// Random date in `[from, to]` at minute granularity.
fn date_between(rng: &mut SimRng, from: SimTime, to: SimTime) -> SimTime {
    let minutes = (to - from).num_minutes();
    from + Duration::minutes(rng.range_int(0, minutes.max(0)))
}

/// One released competitor game.
///
/// The platform is drawn among those released between the oldest platform
/// and `start`; the release date falls between the oldest platform release
/// and `start`, but never before its own platform. Returns `None` when no
/// platform qualifies or no feature or developer exists.
pub fn random_competitor_game(
    platforms: &[Platform],
    features: &[Feature],
    developers: &[Company],
    start: SimTime,
    rng: &mut SimRng,
) -> Option<Game> {
    let oldest = platforms.iter().map(|p| p.release_date).min()?;
    let candidates: Vec<&Platform> = platforms
        .iter()
        .filter(|p| p.release_date >= oldest && p.release_date <= start)
        .collect();
    let platform = *rng.pick(&candidates)?;
    let developer = rng.pick(developers)?.id.clone();
    let feature = rng.pick(features)?.id.clone();
    let genre = *rng.pick(&Genre::ALL)?;

    let release = date_between(rng, oldest, start).max(platform.release_date);
    let name = two_word_name(rng);
    let mut game = Game::new(
        GameId::new(rng.unique_id()),
        name,
        vec![platform.id.clone()],
        vec![genre],
        None,
        Some(developer),
        Vec::new(),
    );
    game.phase = Phase::Release;
    game.release_date = Some(release);
    game.game_size = rng.range_int(1, 6) as u8;
    game.price = Decimal::from_f64(rng.range(6.0, 40.0))
        .unwrap_or(Decimal::from(20))
        .round_dp(2);
    game.media = Media::FloppyDisk;
    let points = rng.range_int(200, 1000) as f64;
    game.feature_ids = vec![feature.clone()];
    game.feature_progress.insert(feature, points);
    Some(game)
}

impl Simulation {
    /// Populate the market with `count` released competitor games and
    /// simulate their sales up to the current time. Returns how many games
    /// were created.
    pub fn generate_competitor_games(&mut self, count: usize) -> Result<usize, SimError> {
        let start = self.clock.now();
        let state = &mut self.state;
        if !state
            .world
            .companies
            .iter()
            .any(|c| c.owner == CompanyOwner::Competition)
        {
            let rivals = competitor_companies(&mut state.rng, COMPETITOR_COMPANIES);
            state.world.companies.extend(rivals);
        }
        state.refresh_market();

        let developers: Vec<Company> = state
            .world
            .companies
            .iter()
            .filter(|c| c.owner == CompanyOwner::Competition)
            .cloned()
            .collect();
        let mut generated = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(game) = random_competitor_game(
                &state.world.platforms,
                &state.world.game_features,
                &developers,
                start,
                &mut state.rng,
            ) else {
                break;
            };
            generated.push(game);
        }
        let Some(oldest) = generated.iter().filter_map(|g| g.release_date).min() else {
            return Ok(0);
        };

        let market: Vec<Game> = state.world.games.iter().chain(&generated).cloned().collect();
        state.matrix = GenreFactorMatrix::compute(&state.world.platforms, &market);

        let hours = (start - oldest).num_hours();
        info!(games = generated.len(), hours, "simulating competitor backlog");
        let mut now = oldest;
        for _ in 0..hours {
            if now.hour() == 0 {
                for p in &mut state.world.platforms {
                    refresh_units_sold(p, now);
                }
            }
            let world = &mut state.world;
            let mut ctx = GameContext {
                teams: &mut world.teams,
                features: &world.game_features,
                platforms: &world.platforms,
                publishers: &world.publishers,
                matrix: &state.matrix,
                compatibility: &state.compatibility,
                demand: state.demand.as_ref(),
                rng: &mut state.rng,
                ledger: &mut state.ledger,
                news: &mut state.news,
            };
            for g in generated
                .iter_mut()
                .filter(|g| g.release_date.is_some_and(|r| r <= now))
            {
                run_game_step(g, now, &mut ctx)?;
            }
            now += Duration::hours(1);
        }
        for p in &mut state.world.platforms {
            refresh_units_sold(p, start);
        }

        let n = generated.len();
        state.world.games.extend(generated);
        state.refresh_market();
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::World;
    use crate::testing;
    use sim_core::{SimConfig, UnitPoint};

    fn world() -> World {
        let start = sim_core::starting_time();
        let mut old = testing::platform("p1", 0);
        old.release_date = start - Duration::days(60);
        old.units = vec![
            UnitPoint { date: start - Duration::days(60), units: 10_000.0 },
            UnitPoint { date: start, units: 200_000.0 },
        ];
        let mut future = testing::platform("p2", 0);
        future.release_date = start + Duration::days(30);
        World {
            platforms: vec![old, future],
            game_features: vec![testing::feature("f1", "Graphics"), testing::feature("f2", "Sound")],
            ..World::default()
        }
    }

    #[test]
    fn competitor_games_respect_platform_dates() {
        let mut sim = Simulation::new(SimConfig::default(), world());
        let n = sim.generate_competitor_games(12).unwrap();
        assert_eq!(n, 12);
        let start = sim.now();
        let w = sim.world();
        assert_eq!(
            w.companies.iter().filter(|c| c.owner == CompanyOwner::Competition).count(),
            COMPETITOR_COMPANIES
        );
        for g in &w.games {
            assert!(!g.is_player_owned());
            assert_eq!(g.phase, Phase::Release);
            assert_eq!(g.platform_ids[0].as_str(), "p1");
            let r = g.release_date.unwrap();
            assert!(r >= w.platforms[0].release_date && r <= start);
            assert!((1..=6).contains(&g.game_size));
            assert!(g.price >= Decimal::from(6) && g.price <= Decimal::from(40));
            assert_eq!(g.feature_ids.len(), 1);
            let pts = g.progress_of(&g.feature_ids[0]);
            assert!((200.0..=1000.0).contains(&pts));
        }
        assert_eq!(w.platforms[0].units_sold, 200_000);
        assert!(w.games.iter().any(|g| g.total_units_sold > 0));
        assert!(sim.ledger().entries().is_empty());
        assert!(sim.news().is_empty());
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let mut a = Simulation::new(SimConfig::default(), world());
        let mut b = Simulation::new(SimConfig::default(), world());
        a.generate_competitor_games(5).unwrap();
        b.generate_competitor_games(5).unwrap();
        assert_eq!(a.world(), b.world());
    }

    #[test]
    fn nothing_to_generate_without_platforms() {
        let mut sim = Simulation::new(SimConfig::default(), World::default());
        assert_eq!(sim.generate_competitor_games(3).unwrap(), 0);
        assert!(sim.world().games.is_empty());
    }

    #[test]
    fn names_have_two_words() {
        let mut rng = SimRng::seeded("names");
        for _ in 0..20 {
            assert_eq!(two_word_name(&mut rng).split(' ').count(), 2);
        }
    }
}
