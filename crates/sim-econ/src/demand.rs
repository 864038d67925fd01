//! Daily demand: how many copies a released game sells.
//!
//! The step functions only depend on [`DemandModel`]; [`ClassicDemand`] is the
//! default strategy and can be swapped for balancing experiments.

use crate::features::MAX_FEATURE_SCALE;
use crate::pricing::{publisher_awareness, sales_price_acceptability, SELF_PUBLISH_AWARENESS};
use crate::EconError;
use rust_decimal::prelude::ToPrimitive;
use sim_core::{Distribution, Game, Platform, Publisher, SimRng};

/// Everything a demand model may look at for one sale.
#[derive(Clone, Copy, Debug)]
pub struct SaleContext<'a> {
    pub game: &'a Game,
    /// First platform of the game; provides the population.
    pub platform: &'a Platform,
    /// Publisher for publisher-distributed games.
    pub publisher: Option<&'a Publisher>,
    pub average_feature_scale: f64,
    pub genre_factor: f64,
}

impl SaleContext<'_> {
    /// Platform owners that do not own a copy yet.
    pub fn population_without_copy(&self) -> f64 {
        (self.platform.units_sold as f64 - self.game.total_units_sold as f64).max(0.0)
    }
}

/// Strategy computing units sold for one sales period.
pub trait DemandModel: std::fmt::Debug + Send {
    /// Daily units sold by a game of the player's studio.
    fn player_units(&self, ctx: &SaleContext<'_>, rng: &mut SimRng) -> Result<u64, EconError>;
    /// Hourly units sold by a competitor game.
    fn competitor_units(&self, ctx: &SaleContext<'_>, rng: &mut SimRng) -> u64;
}

/// Default formulas: awareness-limited interest scaled by price acceptability.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicDemand;

fn to_int(v: f64) -> i64 {
    if v.is_finite() {
        v.floor() as i64
    } else {
        0
    }
}

impl DemandModel for ClassicDemand {
    fn player_units(&self, ctx: &SaleContext<'_>, rng: &mut SimRng) -> Result<u64, EconError> {
        let game = ctx.game;
        let acceptability = sales_price_acceptability(game.game_size)?;
        let average_price = ctx
            .platform
            .average_game_price
            .to_f64()
            .ok_or(EconError::NonFinite)?
            * acceptability;
        let price = game.price.to_f64().ok_or(EconError::NonFinite)?;
        let scale = ctx.average_feature_scale;
        let price_factor = if price > 0.0 {
            (average_price / price) * (scale / (MAX_FEATURE_SCALE / 2.0))
        } else {
            1.0
        };

        let reach = match game.distribution {
            Distribution::SelfPublish => SELF_PUBLISH_AWARENESS,
            Distribution::Publisher => {
                let publisher = ctx
                    .publisher
                    .ok_or_else(|| EconError::MissingPublisher(game.id.to_string()))?;
                publisher_awareness(publisher.size)
            }
        };
        let awareness = reach + scale / MAX_FEATURE_SCALE / 10.0;

        let hyped = game.hype as f64;
        let aware = ctx.population_without_copy()
            * awareness
            * f64::from(game.game_size)
            * ctx.genre_factor;
        let max_pop = rng.range_int(to_int(hyped * 0.05), to_int(aware));
        let min_pop = rng.range_int(0, to_int(hyped * 0.01));
        let interested = rng.range_int(min_pop, max_pop);
        let units = to_int(interested as f64 * price_factor.min(1.0));
        Ok(units.max(0) as u64)
    }

    fn competitor_units(&self, ctx: &SaleContext<'_>, rng: &mut SimRng) -> u64 {
        let aware = ctx.population_without_copy()
            * 0.01
            * f64::from(ctx.game.game_size)
            * ctx.genre_factor;
        let max_pop = rng.range_int(0, to_int(aware));
        let min_pop = rng.range_int(0, 1);
        let interested = rng.range_int(min_pop, max_pop);
        to_int(interested as f64 * rng.range(0.01, 0.02)).max(0) as u64
    }
}
