use crate::error::StepError;
use sim_core::{HardwarePhase, HardwareProject, JobTitle, SimRng, Team, PRODUCTION_THRESHOLD};
use tracing::info;

/// Hourly update of a hardware project: the team's hardware engineers turn
/// energy into progress, and a design past the production threshold moves
/// to production.
pub fn run_hardware_step(
    project: &mut HardwareProject,
    teams: &mut [Team],
    rng: &mut SimRng,
) -> Result<(), StepError> {
    let team = teams
        .iter_mut()
        .find(|t| t.id == project.team_id)
        .ok_or_else(|| StepError::MissingHardwareTeam {
            project: project.id.clone(),
            team: project.team_id.clone(),
        })?;
    for e in team
        .employees
        .iter_mut()
        .filter(|e| e.job == JobTitle::HardwareEngineer && e.energy > 0.0)
    {
        let xp = f64::from(e.xp_for(e.job).unwrap_or(1));
        let base = rng.range_int(1, i64::from(e.effects.productivity))
            + i64::from(e.effects.extra_productivity);
        project.progress += base as f64 * xp * (0.1 + rng.random01());
        e.drain(1.5 * rng.random01());
    }
    if project.phase == HardwarePhase::Design && project.progress > PRODUCTION_THRESHOLD {
        project.phase = HardwarePhase::Production;
        info!(project = %project.id, "hardware entered production");
    }
    Ok(())
}
