//! Error taxonomy of the runtime.

use persistence::PersistenceError;
use sim_core::{FeatureId, GameId, HardwareId, PlatformId, PublisherId, TeamId, ValidationError};
use sim_econ::EconError;
use thiserror::Error;

/// Clock arithmetic failures.
#[derive(Debug, Error, PartialEq)]
pub enum ClockError {
    /// Advancing would leave the representable date range.
    #[error("simulated time overflow advancing {0} ticks")]
    Overflow(u32),
}

/// A step function found its context inconsistent. These are data-integrity
/// bugs in the caller's setup and abort the tick.
#[derive(Debug, Error, PartialEq)]
pub enum StepError {
    #[error("team {team:?} of game {game} is not set")]
    MissingTeam { game: GameId, team: Option<TeamId> },
    #[error("team {team} of hardware project {project} is not set")]
    MissingHardwareTeam { project: HardwareId, team: TeamId },
    #[error("platform is not set for game {0}")]
    MissingPlatform(GameId),
    #[error("platform {0} not found")]
    UnknownPlatform(PlatformId),
    #[error("publisher {publisher:?} is not set for game {game}")]
    MissingPublisher { game: GameId, publisher: Option<PublisherId> },
    #[error("no research team available for feature {0}")]
    MissingResearchTeam(FeatureId),
    #[error("phase {0:?} does not map to a multiplier")]
    PhaseMultiplier(sim_core::Phase),
    #[error(transparent)]
    Econ(#[from] EconError),
}

/// Top-level error of simulation operations.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Clock(#[from] ClockError),
    #[error(transparent)]
    Step(#[from] StepError),
    #[error("invalid save: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// A player action referenced an unknown entity.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    /// A player action was rejected.
    #[error("action rejected: {0}")]
    Rejected(String),
}

impl From<EconError> for SimError {
    fn from(e: EconError) -> Self {
        SimError::Step(StepError::Econ(e))
    }
}
