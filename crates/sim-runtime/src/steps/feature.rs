use crate::error::StepError;
use sim_core::{Feature, Team};
use tracing::info;

/// Hourly research of one feature.
///
/// The first research team pours all of its employees' energy into the
/// feature. Points are capped at the unlock threshold but every employee is
/// still drained, so energy spent past the threshold is lost.
pub fn run_feature_step(feature: &mut Feature, teams: &mut [Team]) -> Result<(), StepError> {
    if !feature.researching {
        return Ok(());
    }
    if feature.is_researched() {
        feature.researching = false;
        return Ok(());
    }
    let team = teams
        .iter_mut()
        .find(|t| t.is_research())
        .ok_or_else(|| StepError::MissingResearchTeam(feature.id.clone()))?;
    for e in &mut team.employees {
        feature.researched_points += e.energy;
        e.energy = 0.0;
        feature.researched_points = feature
            .researched_points
            .min(feature.required_points_to_unlock);
    }
    if feature.is_researched() {
        feature.researching = false;
        info!(feature = %feature.id, "feature researched");
    }
    Ok(())
}
