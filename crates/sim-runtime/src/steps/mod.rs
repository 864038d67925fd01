//! Per-entity run-steps.
//!
//! Each step mutates one entity for the current simulated time. Collaborators
//! are passed in explicitly; a missing cross-reference is a [`StepError`].

mod building;
mod feature;
mod game;
mod hardware;
mod platform;
mod staff;

pub use building::run_building_step;
pub use feature::run_feature_step;
pub use game::{run_game_step, run_hype_step, GameContext, DISCONTINUE_AFTER_DAYS, IDLE_DAYS_BEFORE_SCHEDULE};
pub use hardware::run_hardware_step;
pub use platform::{charge_license, refresh_units_sold, run_platform_step};
pub use staff::{pay_salaries, rest_team};

use crate::error::StepError;
use sim_core::{Game, Platform};

/// First platform of a game; its installed base drives sales.
pub(crate) fn primary_platform<'a>(
    game: &Game,
    platforms: &'a [Platform],
) -> Result<&'a Platform, StepError> {
    let id = game
        .platform_ids
        .first()
        .ok_or_else(|| StepError::MissingPlatform(game.id.clone()))?;
    platforms
        .iter()
        .find(|p| &p.id == id)
        .ok_or_else(|| StepError::UnknownPlatform(id.clone()))
}
