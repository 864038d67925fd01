//! Small entity builders shared by unit tests.

use rust_decimal::Decimal;
use sim_core::{
    CompanyId, Effects, Employee, Experience, Feature, FeatureId, Game, GameId, Genre, JobTitle,
    License, Phase, Platform, PlatformId, PlatformSpecs, PriceDecider, Publisher, PublisherId,
    PublisherSize, Requirements, RoyaltyEstimate, Team, TeamId, TeamKind, PLAYER_COMPANY,
};

pub fn employee(id: &str, job: JobTitle) -> Employee {
    Employee {
        id: id.into(),
        name: id.to_uppercase(),
        job,
        salary: Decimal::from(1000),
        energy: 10.0,
        max_energy: 10.0,
        experience: vec![Experience { job, xp: 2 }],
        effects: Effects::default(),
        is_player: false,
    }
}

fn team(id: &str, kind: TeamKind, job: JobTitle, size: usize) -> Team {
    Team {
        id: TeamId::new(id),
        name: format!("Team {id}"),
        employees: (0..size)
            .map(|i| employee(&format!("{id}-e{i}"), job))
            .collect(),
        company_id: CompanyId::new(PLAYER_COMPANY),
        kinds: vec![kind],
    }
}

pub fn dev_team(id: &str, size: usize) -> Team {
    team(id, TeamKind::Dev, JobTitle::Programmer, size)
}

pub fn research_team(id: &str, size: usize) -> Team {
    team(id, TeamKind::Research, JobTitle::Designer, size)
}

pub fn hardware_team(id: &str, size: usize) -> Team {
    team(id, TeamKind::Dev, JobTitle::HardwareEngineer, size)
}

/// Level thresholds 100/200/300/400.
pub fn feature(id: &str, category: &str) -> Feature {
    Feature {
        id: FeatureId::new(id),
        tag: id.to_string(),
        name: id.to_uppercase(),
        category: category.to_string(),
        point_scale: vec![100.0, 200.0, 300.0, 400.0],
        required_skills: vec![JobTitle::Programmer],
        required_points_to_unlock: 50.0,
        researched_points: 0.0,
        researching: false,
        dependencies: vec![],
        requirements: Requirements::default(),
    }
}

pub fn platform(id: &str, units_sold: u64) -> Platform {
    let t = sim_core::starting_time();
    Platform {
        id: PlatformId::new(id),
        tag: Some(id.to_string()),
        name: format!("Platform {id}"),
        release_date: t,
        discontinue_date: t + chrono::Duration::days(3650),
        released: true,
        discontinued: false,
        generation: 1,
        units: vec![],
        units_sold,
        average_game_price: Decimal::from(30),
        media: vec![],
        license: License::default(),
        specs: PlatformSpecs::default(),
    }
}

pub fn publisher(id: &str) -> Publisher {
    Publisher {
        id: PublisherId::new(id),
        name: format!("Publisher {id}"),
        percentage: 0.3,
        price_decider: PriceDecider::Publisher,
        games_published: 0,
        marketing_budget: Decimal::ZERO,
        size: PublisherSize::Medium,
        platform_tags: vec!["p1".into()],
        recent_estimate: RoyaltyEstimate::default(),
    }
}

/// Player game in development on platform `p1`.
pub fn game(id: &str, team: Option<&str>, features: &[&str]) -> Game {
    Game::new(
        GameId::new(id),
        format!("Game {id}"),
        vec![PlatformId::new("p1")],
        vec![Genre::Action],
        team.map(TeamId::new),
        None,
        features.iter().map(|f| FeatureId::new(*f)).collect(),
    )
}

/// Player game on the market at price 20.
pub fn released_game(id: &str, features: &[&str]) -> Game {
    let mut g = game(id, None, features);
    g.phase = Phase::Release;
    g.price = Decimal::from(20);
    for f in features {
        g.feature_progress.insert(FeatureId::new(*f), 250.0);
    }
    g
}
