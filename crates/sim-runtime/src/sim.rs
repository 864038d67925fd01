//! The simulation context: clock, callback registry and world state in one
//! explicitly owned value.

use crate::clock::{Clock, Speed, TickReport};
use crate::error::SimError;
use crate::registry::{Cadence, Registry};
use crate::steps::{
    charge_license, pay_salaries, rest_team, run_building_step, run_feature_step,
    run_game_step, run_hardware_step, run_hype_step, run_platform_step, GameContext,
};
use persistence::SaveStore;
use serde::{Deserialize, Serialize};
use sim_core::{
    validate_save, Building, CashLedger, Company, Feature, Game, HardwareProject, NewsLog,
    Platform, Publisher, Save, SaveData, SimConfig, SimRng, SimTime, Team,
};
use sim_econ::{ClassicDemand, DemandModel, GenreCompatibilityTable, GenreFactorMatrix};
use tracing::{debug, info};

/// Periodic work the simulation knows how to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handler {
    /// Marks the snapshot for writing to the attached store.
    Autosave,
    /// Recompute the genre factor matrix.
    MarketRefresh,
    StaffRest,
    PlatformUpdate,
    Hype,
    GameProgress,
    HardwareProgress,
    Research,
    Payroll,
    BuildingCosts,
    PlatformLicense,
}

/// Registration id of the persistent weekly autosave.
pub const AUTOSAVE_ID: u32 = 0;

/// Built-in registrations in firing order.
pub const DEFAULT_HANDLERS: [(u32, Cadence, Handler); 11] = [
    (AUTOSAVE_ID, Cadence::Weekly, Handler::Autosave),
    (1, Cadence::Daily, Handler::MarketRefresh),
    (2, Cadence::Daily, Handler::StaffRest),
    (3, Cadence::Daily, Handler::PlatformUpdate),
    (4, Cadence::Daily, Handler::Hype),
    (5, Cadence::Hourly, Handler::GameProgress),
    (6, Cadence::Hourly, Handler::HardwareProgress),
    (7, Cadence::Hourly, Handler::Research),
    (8, Cadence::Monthly, Handler::Payroll),
    (9, Cadence::Monthly, Handler::BuildingCosts),
    (10, Cadence::Yearly, Handler::PlatformLicense),
];

/// Entity collections, one per kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    pub games: Vec<Game>,
    pub companies: Vec<Company>,
    pub teams: Vec<Team>,
    pub hardware_projects: Vec<HardwareProject>,
    pub platforms: Vec<Platform>,
    pub publishers: Vec<Publisher>,
    pub game_features: Vec<Feature>,
    pub hardware_features: Vec<Feature>,
    pub buildings: Vec<Building>,
}

impl World {
    fn from_save_data(data: SaveData) -> (Self, NewsLog) {
        let SaveData {
            games,
            companies,
            teams,
            hardware_projects,
            news,
            platforms,
            publishers,
            game_features,
            hardware_features,
            buildings,
        } = data;
        let world = Self {
            games,
            companies,
            teams,
            hardware_projects,
            platforms,
            publishers,
            game_features,
            hardware_features,
            buildings,
        };
        (world, NewsLog::from_items(news))
    }

    fn to_save_data(&self, news: &NewsLog) -> SaveData {
        SaveData {
            games: self.games.clone(),
            companies: self.companies.clone(),
            teams: self.teams.clone(),
            hardware_projects: self.hardware_projects.clone(),
            news: news.items().to_vec(),
            platforms: self.platforms.clone(),
            publishers: self.publishers.clone(),
            game_features: self.game_features.clone(),
            hardware_features: self.hardware_features.clone(),
            buildings: self.buildings.clone(),
        }
    }
}

/// Mutable state the handlers work on.
#[derive(Debug)]
pub(crate) struct SimState {
    pub(crate) world: World,
    pub(crate) ledger: CashLedger,
    pub(crate) news: NewsLog,
    pub(crate) rng: SimRng,
    pub(crate) demand: Box<dyn DemandModel>,
    pub(crate) matrix: GenreFactorMatrix,
    pub(crate) compatibility: GenreCompatibilityTable,
    autosave_due: bool,
}

impl SimState {
    pub(crate) fn refresh_market(&mut self) {
        self.matrix = GenreFactorMatrix::compute(&self.world.platforms, &self.world.games);
    }

    fn dispatch(&mut self, handler: Handler, now: SimTime) -> Result<(), SimError> {
        let SimState {
            world,
            ledger,
            news,
            rng,
            demand,
            matrix,
            compatibility,
            autosave_due,
        } = self;
        match handler {
            Handler::Autosave => *autosave_due = true,
            Handler::MarketRefresh => {
                *matrix = GenreFactorMatrix::compute(&world.platforms, &world.games);
            }
            Handler::StaffRest => world.teams.iter_mut().for_each(rest_team),
            Handler::PlatformUpdate => {
                for p in &mut world.platforms {
                    run_platform_step(p, now, news)?;
                }
            }
            Handler::Hype => {
                for g in &mut world.games {
                    run_hype_step(g, now, rng);
                }
            }
            Handler::GameProgress => {
                let mut ctx = GameContext {
                    teams: &mut world.teams,
                    features: &world.game_features,
                    platforms: &world.platforms,
                    publishers: &world.publishers,
                    matrix,
                    compatibility,
                    demand: demand.as_ref(),
                    rng,
                    ledger,
                    news,
                };
                for g in &mut world.games {
                    run_game_step(g, now, &mut ctx)?;
                }
            }
            Handler::HardwareProgress => {
                for h in &mut world.hardware_projects {
                    run_hardware_step(h, &mut world.teams, rng)?;
                }
            }
            Handler::Research => {
                for f in world
                    .game_features
                    .iter_mut()
                    .chain(world.hardware_features.iter_mut())
                {
                    run_feature_step(f, &mut world.teams)?;
                }
            }
            Handler::Payroll => {
                for t in &world.teams {
                    pay_salaries(t, ledger);
                }
            }
            Handler::BuildingCosts => {
                for b in &world.buildings {
                    run_building_step(b, ledger);
                }
            }
            Handler::PlatformLicense => {
                for p in &world.platforms {
                    charge_license(p, ledger);
                }
            }
        }
        Ok(())
    }
}

/// A running game: single writer of all simulation state.
pub struct Simulation {
    pub(crate) config: SimConfig,
    pub(crate) clock: Clock,
    pub(crate) registry: Registry<Handler>,
    pub(crate) state: SimState,
    store: Option<Box<dyn SaveStore>>,
    slot: (String, String),
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("now", &self.clock.now())
            .field("speed", &self.clock.speed())
            .field("registrations", &self.registry.len())
            .field("cash", &self.state.ledger.total())
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl Simulation {
    /// New game at the configured start, with the default handlers installed.
    pub fn new(config: SimConfig, world: World) -> Self {
        let mut state = SimState {
            world,
            ledger: CashLedger::with_balance(config.starting_cash),
            news: NewsLog::default(),
            rng: SimRng::seeded(&config.rng_seed),
            demand: Box::new(ClassicDemand),
            matrix: GenreFactorMatrix::default(),
            compatibility: GenreCompatibilityTable::new(&config.genre_compatibility),
            autosave_due: false,
        };
        state.refresh_market();
        let mut sim = Self {
            clock: Clock::new(config.start),
            config,
            registry: Registry::new(),
            state,
            store: None,
            slot: ("autosave".to_string(), "Autosave".to_string()),
        };
        sim.install_default_handlers();
        sim
    }

    /// Replace the demand strategy.
    pub fn with_demand(mut self, demand: Box<dyn DemandModel>) -> Self {
        self.state.demand = demand;
        self
    }

    /// Store written by the autosave handler and [`save_to_store`](Self::save_to_store).
    pub fn attach_store(&mut self, store: Box<dyn SaveStore>) {
        self.store = Some(store);
    }

    pub fn store(&self) -> Option<&dyn SaveStore> {
        self.store.as_deref()
    }

    /// Id and display name of the save slot snapshots are written to.
    pub fn set_save_slot(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.slot = (id.into(), name.into());
    }

    /// Register the built-in handlers. Ids already present are kept as they are.
    pub fn install_default_handlers(&mut self) {
        for (id, cadence, handler) in DEFAULT_HANDLERS {
            self.registry
                .register(id, cadence, handler, id == AUTOSAVE_ID);
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn speed(&self) -> Speed {
        self.clock.speed()
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn play(&mut self) {
        self.clock.play();
    }

    pub fn fast_forward(&mut self) {
        self.clock.fast_forward();
    }

    pub fn registry(&self) -> &Registry<Handler> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry<Handler> {
        &mut self.registry
    }

    pub fn world(&self) -> &World {
        &self.state.world
    }

    /// Direct access to the collections. Call [`refresh_market`](Self::refresh_market)
    /// after adding released games or platforms.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.state.world
    }

    pub fn ledger(&self) -> &CashLedger {
        &self.state.ledger
    }

    pub fn news(&self) -> &NewsLog {
        &self.state.news
    }

    pub fn news_mut(&mut self) -> &mut NewsLog {
        &mut self.state.news
    }

    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.state.rng
    }

    pub fn genre_matrix(&self) -> &GenreFactorMatrix {
        &self.state.matrix
    }

    pub fn refresh_market(&mut self) {
        self.state.refresh_market();
    }

    /// Advance `n` ticks, firing every crossed boundary in order. A due
    /// autosave is written once the tick has completed.
    pub fn tick(&mut self, n: u32) -> Result<TickReport, SimError> {
        let Self {
            clock,
            registry,
            state,
            ..
        } = self;
        let report = clock.tick(n, |now, prev| {
            registry
                .fire_boundary(now, prev, |reg, at| state.dispatch(reg.handler, at))
                .map(|_| ())
        })?;
        if std::mem::take(&mut self.state.autosave_due) {
            self.save_to_store()?;
        }
        Ok(report)
    }

    /// Collect the full state into a save record for the current slot.
    pub fn to_snapshot(&self) -> Save {
        let data = self.state.world.to_save_data(&self.state.news);
        Save::new(
            self.slot.0.clone(),
            self.slot.1.clone(),
            self.state.ledger.total(),
            self.clock.now(),
            data,
        )
    }

    /// Write a snapshot to the attached store; `false` when no store is attached.
    pub fn save_to_store(&mut self) -> Result<bool, SimError> {
        let snapshot = self.to_snapshot();
        let Some(store) = self.store.as_mut() else {
            debug!("no save store attached, snapshot skipped");
            return Ok(false);
        };
        store.put(snapshot)?;
        info!(slot = %self.slot.0, time = %self.clock.now(), "game saved");
        Ok(true)
    }

    /// Replace the whole state with a save.
    ///
    /// Non-persistent registrations are dropped and the defaults reinstalled,
    /// the clock is paused at the saved time and the ledger restarts from the
    /// saved balance. The save becomes the current slot.
    pub fn load(&mut self, save: Save) -> Result<(), SimError> {
        validate_save(&save.data)?;
        self.registry.reset();
        self.clock.pause();
        self.clock.set_now(save.time);
        self.state.ledger.reset(save.cash);
        let (world, news) = World::from_save_data(save.data);
        self.state.world = world;
        self.state.news = news;
        self.state.refresh_market();
        self.state.autosave_due = false;
        self.slot = (save.id, save.name);
        self.install_default_handlers();
        info!(time = %self.clock.now(), games = self.state.world.games.len(), "save loaded");
        Ok(())
    }

    /// Load a save from the attached store by id.
    pub fn load_from_store(&mut self, id: &str) -> Result<(), SimError> {
        let save = self
            .store
            .as_ref()
            .ok_or_else(|| SimError::Rejected("no save store attached".into()))?
            .get(id)?
            .ok_or_else(|| SimError::NotFound {
                kind: "save",
                id: id.to_string(),
            })?;
        self.load(save)
    }
}
