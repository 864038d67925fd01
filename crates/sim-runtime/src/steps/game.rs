use super::primary_platform;
use crate::error::StepError;
use chrono::Timelike;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sim_core::{
    CashLedger, Distribution, Feature, Game, NewsKind, NewsLog, Phase, Platform, Publisher,
    SimRng, SimTime, Team,
};
use sim_econ::{
    average_feature_scale, count_days, game_progress, genre_factor, publisher_price,
    DemandModel, EconError, GenreCompatibilityTable, GenreFactorMatrix, SaleContext,
};
use tracing::info;

/// Consecutive days without a sale before a game is scheduled to leave the market.
pub const IDLE_DAYS_BEFORE_SCHEDULE: u32 = 90;
/// Days a scheduled game stays on the market.
pub const DISCONTINUE_AFTER_DAYS: u32 = 120;

/// Collaborators of the hourly game step.
pub struct GameContext<'a> {
    pub teams: &'a mut [Team],
    pub features: &'a [Feature],
    pub platforms: &'a [Platform],
    pub publishers: &'a [Publisher],
    pub matrix: &'a GenreFactorMatrix,
    pub compatibility: &'a GenreCompatibilityTable,
    pub demand: &'a dyn DemandModel,
    pub rng: &'a mut SimRng,
    pub ledger: &'a mut CashLedger,
    pub news: &'a mut NewsLog,
}

/// Hourly update of one game according to its phase.
pub fn run_game_step(game: &mut Game, now: SimTime, ctx: &mut GameContext<'_>) -> Result<(), StepError> {
    match game.phase {
        Phase::PreAlpha | Phase::Alpha | Phase::Beta => develop(game, ctx),
        Phase::Release => sell(game, now, ctx),
        Phase::ScheduleToDiscontinue => {
            if now.hour() == 0 {
                game.discontinue_counter += 1;
                if game.discontinue_counter >= DISCONTINUE_AFTER_DAYS {
                    game.phase = Phase::Discontinue;
                    ctx.news.publish(&game.name, now, NewsKind::ProductDiscontinued);
                    info!(game = %game.id, "game discontinued");
                }
            }
            Ok(())
        }
        Phase::Discontinue => Ok(()),
    }
}

fn develop(game: &mut Game, ctx: &mut GameContext<'_>) -> Result<(), StepError> {
    let multiplier = game
        .phase
        .multiplier()
        .ok_or(StepError::PhaseMultiplier(game.phase))?;
    let team = ctx
        .teams
        .iter_mut()
        .find(|t| game.team_id.as_ref() == Some(&t.id))
        .ok_or_else(|| StepError::MissingTeam {
            game: game.id.clone(),
            team: game.team_id.clone(),
        })?;
    let all_features = ctx.features;
    let features: Vec<&Feature> = all_features
        .iter()
        .filter(|f| game.feature_ids.contains(&f.id))
        .collect();
    let beta = game.phase == Phase::Beta;
    let mut bugs = i64::try_from(game.bugs).unwrap_or(i64::MAX);

    for e in team.employees.iter_mut().filter(|e| e.energy > 0.0) {
        let Some(feature) = ctx.rng.pick(&features).copied() else {
            break;
        };
        let xp = f64::from(e.best_xp_for(&feature.required_skills));
        let base = ctx.rng.range_int(1, i64::from(e.effects.productivity))
            + i64::from(e.effects.extra_productivity);
        let points = base as f64 * xp * (1.0 + ctx.rng.random01()) * multiplier;
        *game.feature_progress.entry(feature.id.clone()).or_insert(0.0) += points;

        e.drain(1.5 * ctx.rng.random01());

        let introduced = ctx.rng.range_int(0, e.fatigue());
        bugs += if beta { introduced / 20 } else { introduced };
        let fixed = ctx.rng.range_int(0, e.energy.floor() as i64);
        bugs -= if beta { fixed * 10 } else { fixed };
        bugs = bugs.max(0);
    }
    game.bugs = u64::try_from(bugs).unwrap_or(0);

    game.progress = game_progress(game, all_features);
    let reached = if game.progress >= 2.0 / 3.0 {
        Phase::Beta
    } else if game.progress >= 1.0 / 3.0 {
        Phase::Alpha
    } else {
        Phase::PreAlpha
    };
    if reached > game.phase {
        info!(game = %game.id, from = ?game.phase, to = ?reached, progress = game.progress, "phase advanced");
        game.phase = reached;
    }
    Ok(())
}

fn sell(game: &mut Game, now: SimTime, ctx: &mut GameContext<'_>) -> Result<(), StepError> {
    if game.release_date.is_none() {
        game.release_date = Some(now);
    }
    if game.distribution == Distribution::Publisher {
        game.price = publisher_price(game.game_size, ctx.rng)?;
    }
    if !game.is_player_owned() {
        return competitor_sales(game, ctx);
    }
    if now.hour() != 0 {
        return Ok(());
    }

    let units = {
        let platform = primary_platform(game, ctx.platforms)?;
        let publisher = match game.distribution {
            Distribution::SelfPublish => None,
            Distribution::Publisher => Some(
                ctx.publishers
                    .iter()
                    .find(|p| game.publisher_id.as_ref() == Some(&p.id))
                    .ok_or_else(|| StepError::MissingPublisher {
                        game: game.id.clone(),
                        publisher: game.publisher_id.clone(),
                    })?,
            ),
        };
        let sale = SaleContext {
            game,
            platform,
            publisher,
            average_feature_scale: average_feature_scale(game, ctx.features),
            genre_factor: genre_factor(game, ctx.matrix, ctx.compatibility)?,
        };
        ctx.demand.player_units(&sale, ctx.rng)?
    };

    if units >= 1 {
        game.discontinue_counter = 0;
    } else {
        game.discontinue_counter += 1;
    }
    if game.discontinue_counter >= IDLE_DAYS_BEFORE_SCHEDULE {
        game.phase = Phase::ScheduleToDiscontinue;
        game.discontinue_counter = 0;
        info!(game = %game.id, "no sales for {IDLE_DAYS_BEFORE_SCHEDULE} days, scheduled to discontinue");
    }
    game.total_units_sold = game.total_units_sold.saturating_add(units);
    report_sales(game, units, now, ctx.ledger)
}

/// Net revenue of a daily report: units x margin, less publisher royalties.
fn report_sales(game: &mut Game, units: u64, now: SimTime, ledger: &mut CashLedger) -> Result<(), StepError> {
    let mut amount = Decimal::from(units) * (game.price - game.unit_cost);
    if game.distribution == Distribution::Publisher {
        let kept = Decimal::from_f64(1.0 - game.publisher_royalties).ok_or(EconError::NonFinite)?;
        amount *= kept;
    }
    game.record_sale(now, amount);
    ledger.add(game.name.clone(), amount);
    Ok(())
}

fn competitor_sales(game: &mut Game, ctx: &mut GameContext<'_>) -> Result<(), StepError> {
    let units = {
        let platform = primary_platform(game, ctx.platforms)?;
        let sale = SaleContext {
            game,
            platform,
            publisher: None,
            average_feature_scale: average_feature_scale(game, ctx.features),
            genre_factor: genre_factor(game, ctx.matrix, ctx.compatibility)?,
        };
        ctx.demand.competitor_units(&sale, ctx.rng)
    };
    game.total_units_sold = game.total_units_sold.saturating_add(units);
    Ok(())
}

/// Daily advertising and hype decay.
///
/// Every running ad consumes a slot and adds a fifth of its slot cost as hype.
/// Hype then decays by an effectiveness factor that drops from 0.98 towards
/// 0.9 as the release ages, plus a small random logarithmic term.
pub fn run_hype_step(game: &mut Game, now: SimTime, rng: &mut SimRng) {
    let mut hype = game.hype;
    for ad in game.ads.iter_mut().filter(|a| a.slots > 0) {
        ad.slots -= 1;
        let generated = (ad.cost_per_slot / Decimal::from(5))
            .floor()
            .to_u64()
            .unwrap_or(0);
        hype = hype.saturating_add(generated);
    }
    game.ads.retain(|a| a.slots > 0);

    if hype > 0 {
        let days = count_days(game.release_date.unwrap_or(now), now) + 1.0;
        let effectiveness = (0.98 - (days.max(1.0) / 90.0).sqrt() * 0.01).clamp(0.9, 0.98);
        let h = hype as f64;
        let next = (h * effectiveness + h.ln() * 2.0 * rng.random01()).floor();
        hype = if next.is_finite() && next > 0.0 { next as u64 } else { 0 };
    }
    game.hype = hype;
}
