//! Player actions: explicit, immediate mutations outside the periodic steps.

use crate::error::SimError;
use crate::sim::Simulation;
use chrono::Duration;
use rust_decimal::Decimal;
use sim_core::{
    validate_game, AdKind, Advertising, BuildingId, Distribution, Employee, EmployeeId,
    FeatureId, Game, GameId, Genre, HardwareId, HardwarePhase, JobTitle, NewsKind, Phase,
    PlatformId, PropertyState, PublisherId, TeamId,
};
use sim_econ::estimate_royalty;
use tracing::info;

fn not_found(kind: &'static str, id: impl ToString) -> SimError {
    SimError::NotFound {
        kind,
        id: id.to_string(),
    }
}

impl Simulation {
    fn game_mut(&mut self, id: &GameId) -> Result<&mut Game, SimError> {
        self.state
            .world
            .games
            .iter_mut()
            .find(|g| &g.id == id)
            .ok_or_else(|| not_found("game", id))
    }

    /// Start a new player game in PreAlpha. Every referenced platform, team and
    /// feature must exist.
    pub fn create_game(
        &mut self,
        name: &str,
        platform_ids: Vec<PlatformId>,
        genres: Vec<Genre>,
        team_id: TeamId,
        feature_ids: Vec<FeatureId>,
    ) -> Result<GameId, SimError> {
        let world = &self.state.world;
        if let Some(p) = platform_ids
            .iter()
            .find(|p| !world.platforms.iter().any(|x| &x.id == *p))
        {
            return Err(not_found("platform", p));
        }
        if !world.teams.iter().any(|t| t.id == team_id) {
            return Err(not_found("team", &team_id));
        }
        if let Some(f) = feature_ids
            .iter()
            .find(|f| !world.game_features.iter().any(|x| &x.id == *f))
        {
            return Err(not_found("feature", f));
        }
        let id = GameId::new(self.state.rng.unique_id());
        let game = Game::new(
            id.clone(),
            name,
            platform_ids,
            genres,
            Some(team_id),
            None,
            feature_ids,
        );
        validate_game(&game)?;
        info!(game = %id, name, "game created");
        self.state.world.games.push(game);
        Ok(id)
    }

    /// Buy advertising slots; the cost is debited immediately.
    pub fn add_advertising(
        &mut self,
        game_id: &GameId,
        kind: AdKind,
        cost_per_slot: Decimal,
        slots: u32,
    ) -> Result<(), SimError> {
        if cost_per_slot < Decimal::ZERO {
            return Err(SimError::Rejected("advertising cost must not be negative".into()));
        }
        self.game_mut(game_id)?.merge_advertising(Advertising {
            kind,
            cost_per_slot,
            slots,
        });
        self.state
            .ledger
            .add("Advertising", -(Decimal::from(slots) * cost_per_slot));
        Ok(())
    }

    /// Put a game in development on the market now.
    pub fn release_game(&mut self, game_id: &GameId) -> Result<(), SimError> {
        let now = self.clock.now();
        let game = self
            .state
            .world
            .games
            .iter_mut()
            .find(|g| &g.id == game_id)
            .ok_or_else(|| not_found("game", game_id))?;
        if !game.phase.is_development() {
            return Err(SimError::Rejected(format!(
                "{} cannot be released from {:?}",
                game.name, game.phase
            )));
        }
        game.phase = Phase::Release;
        game.release_date = Some(now);
        self.state.news.publish(&game.name, now, NewsKind::ProductReleased);
        info!(game = %game.id, "game released");
        self.state.refresh_market();
        Ok(())
    }

    /// Take a game off the market immediately.
    pub fn discontinue_game(&mut self, game_id: &GameId) -> Result<(), SimError> {
        let now = self.clock.now();
        let game = self
            .state
            .world
            .games
            .iter_mut()
            .find(|g| &g.id == game_id)
            .ok_or_else(|| not_found("game", game_id))?;
        if game.phase == Phase::Discontinue {
            return Err(SimError::Rejected(format!("{} is already discontinued", game.name)));
        }
        game.phase = Phase::Discontinue;
        self.state
            .news
            .publish(&game.name, now, NewsKind::ProductDiscontinued);
        info!(game = %game.id, "game discontinued");
        self.state.refresh_market();
        Ok(())
    }

    /// Buy a one-year development license for a platform.
    pub fn buy_license(&mut self, platform_id: &PlatformId) -> Result<(), SimError> {
        let now = self.clock.now();
        let platform = self
            .state
            .world
            .platforms
            .iter_mut()
            .find(|p| &p.id == platform_id)
            .ok_or_else(|| not_found("platform", platform_id))?;
        if platform.license.bought {
            return Err(SimError::Rejected(format!("license for {} already held", platform.name)));
        }
        platform.license.bought = true;
        platform.license.expires = Some(now + Duration::days(365));
        self.state.ledger.add(
            format!("{} License", platform.name),
            -platform.license.cost_per_year,
        );
        Ok(())
    }

    /// Lease or buy a building according to its offer.
    pub fn buy_or_lease_building(&mut self, building_id: &BuildingId) -> Result<(), SimError> {
        let b = self
            .state
            .world
            .buildings
            .iter_mut()
            .find(|b| &b.id == building_id)
            .ok_or_else(|| not_found("building", building_id))?;
        if b.is_occupied() {
            return Err(SimError::Rejected(format!("building {} is already occupied", b.id)));
        }
        let cost = match b.state {
            PropertyState::Lease => {
                b.leased = true;
                b.leasing_cost
            }
            PropertyState::Buy => {
                b.bought = true;
                b.buying_cost
            }
        };
        self.state.ledger.add("new office", -cost);
        Ok(())
    }

    /// End the lease of a leased building; anything else is left as it is.
    pub fn end_lease(&mut self, building_id: &BuildingId) -> Result<(), SimError> {
        let b = self
            .state
            .world
            .buildings
            .iter_mut()
            .find(|b| &b.id == building_id)
            .ok_or_else(|| not_found("building", building_id))?;
        if b.state == PropertyState::Lease && b.leased {
            b.leased = false;
        }
        Ok(())
    }

    /// Start researching a game or hardware feature. Returns false when the
    /// feature is already researched.
    pub fn begin_research(&mut self, feature_id: &FeatureId) -> Result<bool, SimError> {
        let world = &mut self.state.world;
        let feature = world
            .game_features
            .iter_mut()
            .chain(world.hardware_features.iter_mut())
            .find(|f| &f.id == feature_id)
            .ok_or_else(|| not_found("feature", feature_id))?;
        Ok(feature.begin_research())
    }

    /// Hire a new employee into a team.
    pub fn hire_employee(
        &mut self,
        team_id: &TeamId,
        job: JobTitle,
        name: &str,
    ) -> Result<EmployeeId, SimError> {
        let team = self
            .state
            .world
            .teams
            .iter_mut()
            .find(|t| &t.id == team_id)
            .ok_or_else(|| not_found("team", team_id))?;
        let employee = Employee::generate(&mut self.state.rng, job, name);
        let id = employee.id.clone();
        team.employees.push(employee);
        Ok(id)
    }

    /// Move a hardware project to its next phase.
    pub fn advance_hardware_phase(&mut self, project_id: &HardwareId) -> Result<HardwarePhase, SimError> {
        let project = self
            .state
            .world
            .hardware_projects
            .iter_mut()
            .find(|h| &h.id == project_id)
            .ok_or_else(|| not_found("hardware project", project_id))?;
        let next = project
            .phase
            .next()
            .ok_or_else(|| SimError::Rejected(format!("{} is already released", project.name)))?;
        project.phase = next;
        info!(project = %project.id, phase = ?next, "hardware phase advanced");
        Ok(next)
    }

    /// Royalty a publisher asks to distribute a game.
    pub fn estimate_royalty(&mut self, publisher_id: &PublisherId, game_id: &GameId) -> Result<f64, SimError> {
        let world = &mut self.state.world;
        let game = world
            .games
            .iter()
            .find(|g| &g.id == game_id)
            .ok_or_else(|| not_found("game", game_id))?;
        let tags: Vec<&str> = world
            .platforms
            .iter()
            .filter(|p| game.platform_ids.first() == Some(&p.id))
            .filter_map(|p| p.tag.as_deref())
            .collect();
        let competing = world
            .publishers
            .iter()
            .filter(|p| p.platform_tags.iter().any(|t| tags.contains(&t.as_str())))
            .count();
        let publisher = world
            .publishers
            .iter_mut()
            .find(|p| &p.id == publisher_id)
            .ok_or_else(|| not_found("publisher", publisher_id))?;
        Ok(estimate_royalty(publisher, game_id, competing, &mut self.state.rng))
    }

    /// Have a publisher distribute a game at its quoted royalty.
    pub fn sign_publisher(&mut self, publisher_id: &PublisherId, game_id: &GameId) -> Result<f64, SimError> {
        let royalty = self.estimate_royalty(publisher_id, game_id)?;
        let game = self.game_mut(game_id)?;
        game.distribution = Distribution::Publisher;
        game.publisher_id = Some(publisher_id.clone());
        game.publisher_royalties = royalty;
        Ok(royalty)
    }
}
