//! A small ready-made world: three platforms, a feature catalogue, the
//! player's studio with a development, research and hardware team, two
//! publishers and a leased office.

use crate::error::SimError;
use crate::sim::{Simulation, World};
use chrono::Duration;
use rust_decimal::Decimal;
use sim_core::{
    Building, BuildingId, BuildingKind, Company, CompanyId, CompanyKind, CompanyOwner, Employee,
    Feature, FeatureId, GameId, Genre, HardwareId, HardwareProject, JobTitle, License, Media,
    Platform, PlatformId, PlatformSpecs, PriceDecider, PropertyState, PropertyType, Publisher,
    PublisherId, PublisherSize, Requirements, RoyaltyEstimate, SimConfig, SimRng, SimTime, Space,
    Team, TeamId, TeamKind, UnitPoint, PLAYER_COMPANY,
};

fn platform(
    id: &str,
    name: &str,
    start: SimTime,
    release_offset_days: i64,
    life_days: i64,
    peak_units: f64,
    media: Media,
) -> Platform {
    let release = start + Duration::days(release_offset_days);
    let discontinue = release + Duration::days(life_days);
    let units = vec![
        UnitPoint { date: release, units: peak_units * 0.02 },
        UnitPoint { date: release + Duration::days(life_days / 3), units: peak_units * 0.5 },
        UnitPoint { date: discontinue, units: peak_units },
    ];
    Platform {
        id: PlatformId::new(id),
        tag: Some(id.to_string()),
        name: name.to_string(),
        release_date: release,
        discontinue_date: discontinue,
        released: false,
        discontinued: false,
        generation: 1,
        units,
        units_sold: 0,
        average_game_price: Decimal::from(25),
        media: vec![media],
        license: License::default(),
        specs: PlatformSpecs::default(),
    }
}

fn feature(id: &str, category: &str, scale: f64, skills: &[JobTitle], deps: &[&str]) -> Feature {
    Feature {
        id: FeatureId::new(id),
        tag: id.to_string(),
        name: id.replace('-', " "),
        category: category.to_string(),
        point_scale: vec![scale, scale * 2.0, scale * 3.0, scale * 4.0],
        required_skills: skills.to_vec(),
        required_points_to_unlock: scale,
        researched_points: if deps.is_empty() { scale } else { 0.0 },
        researching: false,
        dependencies: deps.iter().map(|d| d.to_string()).collect(),
        requirements: Requirements::default(),
    }
}

fn team(rng: &mut SimRng, id: &str, name: &str, kinds: Vec<TeamKind>, jobs: &[JobTitle]) -> Team {
    let employees: Vec<Employee> = jobs
        .iter()
        .enumerate()
        .map(|(i, job)| Employee::generate(rng, *job, format!("{name} #{}", i + 1)))
        .collect();
    Team {
        id: TeamId::new(id),
        name: name.to_string(),
        employees,
        company_id: CompanyId::new(PLAYER_COMPANY),
        kinds,
    }
}

fn publisher(id: &str, name: &str, size: PublisherSize, percentage: f64) -> Publisher {
    Publisher {
        id: PublisherId::new(id),
        name: name.to_string(),
        percentage,
        price_decider: PriceDecider::Publisher,
        games_published: 0,
        marketing_budget: Decimal::from(50_000),
        size,
        platform_tags: vec!["vector".into(), "homebit".into()],
        recent_estimate: RoyaltyEstimate::default(),
    }
}

/// The demo world at `start`. Employees are generated from `rng`.
pub fn demo_world(start: SimTime, rng: &mut SimRng) -> World {
    use JobTitle::*;
    let platforms = vec![
        platform("vector", "Vector One", start, -400, 3650, 2_000_000.0, Media::RomCartridge),
        platform("homebit", "HomeBit 8", start, -120, 2900, 900_000.0, Media::CassetteTape),
        platform("ultra", "Ultra 16", start, 500, 3000, 3_000_000.0, Media::FloppyDisk),
    ];
    let game_features = vec![
        feature("sprite-engine", "Graphics", 60.0, &[Programmer, Artist], &[]),
        feature("scrolling", "Graphics", 80.0, &[Programmer], &["sprite-engine"]),
        feature("beeper-sound", "Audio", 40.0, &[AudioEngineer, Programmer], &[]),
        feature("level-design", "Gameplay", 70.0, &[Designer], &[]),
        feature("story", "Narrative", 50.0, &[Writer, Designer], &[]),
        feature("high-scores", "Gameplay", 30.0, &[Programmer], &[]),
    ];
    let hardware_features = vec![
        feature("custom-cpu", "Processing", 120.0, &[HardwareEngineer], &[]),
        feature("color-palette", "Graphics", 90.0, &[HardwareEngineer], &["custom-cpu"]),
    ];
    let teams = vec![
        team(rng, "dev", "Core Team", vec![TeamKind::Dev], &[Programmer, Programmer, Artist, Designer]),
        team(rng, "lab", "Research Lab", vec![TeamKind::Research], &[Designer, Programmer]),
        team(rng, "hw", "Hardware Group", vec![TeamKind::Dev], &[HardwareEngineer, HardwareEngineer]),
    ];
    let companies = vec![Company {
        id: CompanyId::new(PLAYER_COMPANY),
        name: "My Company".into(),
        owner: CompanyOwner::Player,
        kind: CompanyKind::Private,
        location: "Springfield".into(),
    }];
    let buildings = vec![Building {
        id: BuildingId::new("garage"),
        kind: BuildingKind::Studio,
        location: "Springfield".into(),
        state: PropertyState::Lease,
        property_type: PropertyType::Office,
        leasing_cost: Decimal::from(600),
        buying_cost: Decimal::from(60_000),
        bought: false,
        leased: true,
        lease_duration: 12,
        spaces: vec![Space {
            kind: "open-plan".into(),
            size: 12.0,
            quantity: 8,
        }],
    }];
    let hardware_projects = vec![HardwareProject::new(
        HardwareId::new("console-1"),
        "Project Orion",
        TeamId::new("hw"),
        CompanyId::new(PLAYER_COMPANY),
    )];
    World {
        games: Vec::new(),
        companies,
        teams,
        hardware_projects,
        platforms,
        publishers: vec![
            publisher("orbit", "Orbit Soft", PublisherSize::Medium, 0.35),
            publisher("titan", "Titan Interactive", PublisherSize::Giant, 0.55),
        ],
        game_features,
        hardware_features,
        buildings,
    }
}

/// A new demo game: the demo world, competitor backlog and one player game
/// in development on the oldest platform. Returns the simulation and the
/// player game's id.
pub fn demo_simulation(config: SimConfig) -> Result<(Simulation, GameId), SimError> {
    let mut rng = SimRng::seeded(&format!("{}-world", config.rng_seed));
    let world = demo_world(config.start, &mut rng);
    let competitors = config.competitor_games;
    let mut sim = Simulation::new(config, world);
    sim.generate_competitor_games(competitors)?;
    let game = sim.create_game(
        "Space Courier",
        vec![PlatformId::new("vector")],
        vec![Genre::Action, Genre::Adventure],
        TeamId::new("dev"),
        ["sprite-engine", "beeper-sound", "level-design", "high-scores"]
            .into_iter()
            .map(FeatureId::new)
            .collect(),
    )?;
    Ok((sim, game))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::validate_save;

    #[test]
    fn demo_world_is_consistent() {
        let mut rng = SimRng::seeded("demo");
        let world = demo_world(sim_core::starting_time(), &mut rng);
        let sim = Simulation::new(SimConfig::default(), world);
        validate_save(&sim.to_snapshot().data).unwrap();
        assert_eq!(sim.world().teams.iter().filter(|t| t.is_research()).count(), 1);
    }

    #[test]
    fn demo_simulation_runs_a_month() {
        let config = SimConfig {
            competitor_games: 8,
            ..SimConfig::default()
        };
        let (mut sim, game) = demo_simulation(config).unwrap();
        assert_eq!(sim.world().games.len(), 9);
        sim.fast_forward();
        sim.tick(31).unwrap();
        let g = sim.world().games.iter().find(|g| g.id == game).unwrap();
        assert!(g.progress > 0.0);
        assert!(g.phase.is_development());
        assert!(sim.world().platforms[0].released);
        assert!(sim.ledger().sum_for("Building lease cost") < Decimal::ZERO);
    }
}
