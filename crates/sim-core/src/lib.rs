#![deny(warnings)]

//! Core domain models and invariants for Studio Tycoon.
//!
//! This crate defines the serializable entity types (games, teams, platforms,
//! features, hardware projects, buildings, publishers), the cash ledger, the
//! news log and the deterministic random source, with validation helpers that
//! guarantee the cross-references the simulation relies on.

pub mod building;
pub mod feature;
pub mod game;
pub mod hardware;
pub mod ids;
pub mod ledger;
pub mod market;
pub mod news;
pub mod platform;
pub mod rng;
pub mod save;
pub mod staff;

pub use building::{Building, BuildingKind, PropertyState, PropertyType, Space};
pub use feature::{Feature, Requirements};
pub use game::{
    AdKind, Advertising, Distribution, Game, Genre, GenreCompatibility, Media, Phase, SalesPoint,
    SALES_WINDOW,
};
pub use hardware::{ClockSpeed, HardwarePhase, HardwareProject, PRODUCTION_THRESHOLD};
pub use ids::*;
pub use ledger::{CashLedger, LedgerEntry};
pub use market::{
    Company, CompanyKind, CompanyOwner, PriceDecider, Publisher, PublisherSize, RoyaltyEstimate,
};
pub use news::{News, NewsKind, NewsLog};
pub use platform::{CpuSpec, GpuSpec, License, MediaSpec, MemSpec, Platform, PlatformSpecs, UnitPoint};
pub use rng::{SimRng, DEFAULT_SEED};
pub use save::{Save, SaveData, SAVE_VERSION};
pub use staff::{Effects, Employee, Experience, JobTitle, Team, TeamKind};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Simulated wall time, minute granularity.
pub type SimTime = NaiveDateTime;

/// First moment of a new game: 1978-05-01 00:00.
pub fn starting_time() -> SimTime {
    NaiveDate::from_ymd_opt(1978, 5, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the deterministic RNG.
    pub rng_seed: String,
    /// Simulated start time of a new game.
    pub start: SimTime,
    /// Opening cash balance.
    pub starting_cash: Decimal,
    /// Real milliseconds per driver tick.
    pub cadence_ms: u64,
    /// Upper bound of ticks handed to the clock in one call.
    pub max_ticks_per_call: u32,
    /// Competitor games generated for a new game.
    pub competitor_games: usize,
    /// Unordered genre pair scores; missing pairs score 1.0.
    pub genre_compatibility: Vec<GenreCompatibility>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: DEFAULT_SEED.to_string(),
            start: starting_time(),
            starting_cash: Decimal::new(100_000, 0),
            cadence_ms: 1000,
            max_ticks_per_call: 72,
            competitor_games: 40,
            genre_compatibility: Vec::new(),
        }
    }
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Names must not be blank.
    #[error("{kind} {id} has an empty name")]
    EmptyName { kind: &'static str, id: String },
    /// Ids must be unique within a collection.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
    /// A reference points at a missing entity.
    #[error("{kind} not found: {id}")]
    MissingReference { kind: &'static str, id: String },
    /// Game size must be within 1..=6.
    #[error("game size {0} is out of range [1, 6]")]
    InvalidGameSize(u8),
    /// Price or cost must be non-negative.
    #[error("negative monetary value is invalid")]
    NegativeMoney,
    /// Numeric field must be finite.
    #[error("non-finite numeric value encountered")]
    NonFinite,
    /// Point scales must be non-empty and ascending.
    #[error("feature {0} has an invalid point scale")]
    InvalidPointScale(String),
    /// Royalty fractions must be within [0, 1].
    #[error("royalty {0} is out of range [0, 1]")]
    InvalidRoyalty(f64),
}

fn finite(v: f64) -> Result<(), ValidationError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite)
    }
}

fn non_negative(v: Decimal) -> Result<(), ValidationError> {
    if v < Decimal::ZERO {
        return Err(ValidationError::NegativeMoney);
    }
    Ok(())
}

/// Validate a game's own fields.
pub fn validate_game(g: &Game) -> Result<(), ValidationError> {
    if g.name.trim().is_empty() {
        return Err(ValidationError::EmptyName {
            kind: "game",
            id: g.id.to_string(),
        });
    }
    if !(1..=6).contains(&g.game_size) {
        return Err(ValidationError::InvalidGameSize(g.game_size));
    }
    non_negative(g.price)?;
    non_negative(g.unit_cost)?;
    finite(g.progress)?;
    if !(0.0..=1.0).contains(&g.publisher_royalties) {
        return Err(ValidationError::InvalidRoyalty(g.publisher_royalties));
    }
    for v in g.feature_progress.values() {
        finite(*v)?;
    }
    Ok(())
}

/// Validate a feature definition.
pub fn validate_feature(f: &Feature) -> Result<(), ValidationError> {
    let ascending = f.point_scale.windows(2).all(|w| w[0] <= w[1]);
    if f.point_scale.is_empty() || !ascending {
        return Err(ValidationError::InvalidPointScale(f.id.to_string()));
    }
    for v in f.point_scale.iter().chain([&f.required_points_to_unlock, &f.researched_points]) {
        finite(*v)?;
    }
    Ok(())
}

/// Validate a platform's installed-base series and prices.
pub fn validate_platform(p: &Platform) -> Result<(), ValidationError> {
    if p.name.trim().is_empty() {
        return Err(ValidationError::EmptyName {
            kind: "platform",
            id: p.id.to_string(),
        });
    }
    non_negative(p.average_game_price)?;
    non_negative(p.license.cost_per_year)?;
    for u in &p.units {
        finite(u.units)?;
    }
    Ok(())
}

/// Validate a team and its employees.
pub fn validate_team(t: &Team) -> Result<(), ValidationError> {
    let mut ids = BTreeSet::new();
    for e in &t.employees {
        if !ids.insert(&e.id) {
            return Err(ValidationError::DuplicateId {
                kind: "employee",
                id: e.id.to_string(),
            });
        }
        finite(e.energy)?;
        finite(e.max_energy)?;
        non_negative(e.salary)?;
    }
    Ok(())
}

fn unique<'a, T: Ord + std::fmt::Display + 'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a T>,
) -> Result<BTreeSet<&'a T>, ValidationError> {
    let mut set = BTreeSet::new();
    for id in ids {
        if !set.insert(id) {
            return Err(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(set)
}

fn require<T: Ord + std::fmt::Display>(
    set: &BTreeSet<&T>,
    kind: &'static str,
    id: &T,
) -> Result<(), ValidationError> {
    if set.contains(id) {
        Ok(())
    } else {
        Err(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
        })
    }
}

/// Validate a whole save, including cross-references between collections.
pub fn validate_save(data: &SaveData) -> Result<(), ValidationError> {
    unique("game", data.games.iter().map(|g| &g.id))?;
    let teams = unique("team", data.teams.iter().map(|t| &t.id))?;
    let platforms = unique("platform", data.platforms.iter().map(|p| &p.id))?;
    let publishers = unique("publisher", data.publishers.iter().map(|p| &p.id))?;
    let features = unique("game feature", data.game_features.iter().map(|f| &f.id))?;
    unique("hardware feature", data.hardware_features.iter().map(|f| &f.id))?;
    unique("hardware project", data.hardware_projects.iter().map(|h| &h.id))?;
    unique("building", data.buildings.iter().map(|b| &b.id))?;
    unique("company", data.companies.iter().map(|c| &c.id))?;

    for t in &data.teams {
        validate_team(t)?;
    }
    for p in &data.platforms {
        validate_platform(p)?;
    }
    for f in data.game_features.iter().chain(&data.hardware_features) {
        validate_feature(f)?;
    }
    for g in &data.games {
        validate_game(g)?;
        if let Some(team) = &g.team_id {
            require(&teams, "team", team)?;
        }
        if let Some(publisher) = &g.publisher_id {
            require(&publishers, "publisher", publisher)?;
        }
        for p in &g.platform_ids {
            require(&platforms, "platform", p)?;
        }
        for f in &g.feature_ids {
            require(&features, "game feature", f)?;
        }
    }
    for h in &data.hardware_projects {
        require(&teams, "team", &h.team_id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feature(id: &str) -> Feature {
        Feature {
            id: FeatureId::new(id),
            tag: id.to_string(),
            name: id.to_uppercase(),
            category: "Gameplay".into(),
            point_scale: vec![100.0, 200.0, 300.0, 400.0],
            required_skills: vec![JobTitle::Designer],
            required_points_to_unlock: 10.0,
            researched_points: 10.0,
            researching: false,
            dependencies: vec![],
            requirements: Requirements::default(),
        }
    }

    fn team(id: &str) -> Team {
        let mut rng = SimRng::seeded(id);
        Team {
            id: TeamId::new(id),
            name: "Core".into(),
            employees: vec![Employee::generate(&mut rng, JobTitle::Programmer, "Ada")],
            company_id: CompanyId::new(PLAYER_COMPANY),
            kinds: vec![TeamKind::Dev, TeamKind::Research],
        }
    }

    fn platform(id: &str) -> Platform {
        Platform {
            id: PlatformId::new(id),
            tag: None,
            name: "Vector One".into(),
            release_date: starting_time(),
            discontinue_date: starting_time(),
            released: false,
            discontinued: false,
            generation: 1,
            units: vec![],
            units_sold: 0,
            average_game_price: Decimal::new(30, 0),
            media: vec![Media::CassetteTape],
            license: License::default(),
            specs: PlatformSpecs::default(),
        }
    }

    fn data() -> SaveData {
        let game = Game::new(
            GameId::new("g"),
            "Space Race",
            vec![PlatformId::new("p")],
            vec![Genre::Action],
            Some(TeamId::new("t")),
            None,
            vec![FeatureId::new("f")],
        );
        SaveData {
            games: vec![game],
            teams: vec![team("t")],
            platforms: vec![platform("p")],
            game_features: vec![feature("f")],
            ..SaveData::default()
        }
    }

    #[test]
    fn starting_time_is_may_1978() {
        assert_eq!(starting_time().to_string(), "1978-05-01 00:00:00");
    }

    #[test]
    fn valid_save_passes() {
        validate_save(&data()).unwrap();
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut d = data();
        d.teams.push(team("t"));
        assert_eq!(
            validate_save(&d),
            Err(ValidationError::DuplicateId {
                kind: "team",
                id: "t".into()
            })
        );
    }

    #[test]
    fn dangling_references_are_rejected() {
        let mut d = data();
        d.games[0].platform_ids.push(PlatformId::new("missing"));
        assert!(matches!(
            validate_save(&d),
            Err(ValidationError::MissingReference { kind: "platform", .. })
        ));
        let mut d = data();
        d.games[0].publisher_id = Some(PublisherId::new("nobody"));
        assert!(validate_save(&d).is_err());
    }

    #[test]
    fn unordered_point_scale_is_rejected() {
        let mut f = feature("x");
        f.point_scale = vec![300.0, 100.0];
        assert!(validate_feature(&f).is_err());
        f.point_scale.clear();
        assert!(validate_feature(&f).is_err());
    }

    #[test]
    fn save_json_roundtrip() {
        let save = Save::new("1", "Campaign", Decimal::new(12345, 2), starting_time(), data());
        let s = serde_json::to_string_pretty(&save).unwrap();
        let back: Save = serde_json::from_str(&s).unwrap();
        assert_eq!(back, save);
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: SimConfig = serde_json::from_str(r#"{"rng_seed":"abc"}"#).unwrap();
        assert_eq!(cfg.rng_seed, "abc");
        assert_eq!(cfg.cadence_ms, 1000);
        assert_eq!(cfg.start, starting_time());
    }

    proptest! {
        #[test]
        fn game_size_range(size in 0u8..20) {
            let mut g = data().games.remove(0);
            g.game_size = size;
            let ok = validate_game(&g).is_ok();
            prop_assert_eq!(ok, (1..=6).contains(&size));
        }
    }
}
