//! Price acceptability, publisher reach and royalties.

use crate::EconError;
use rust_decimal::Decimal;
use sim_core::{GameId, Publisher, PublisherSize, SimRng};

/// Awareness reached by a self-published game.
pub const SELF_PUBLISH_AWARENESS: f64 = 0.001;

/// Share of the platform's average price a publisher will ask, by game size.
pub fn publisher_price_acceptability(game_size: u8) -> Result<f64, EconError> {
    match game_size {
        1 => Ok(0.3),
        2 => Ok(0.5),
        3 => Ok(0.7),
        4 => Ok(0.8),
        5 => Ok(0.9),
        6 => Ok(1.0),
        other => Err(EconError::UnknownGameSize(other)),
    }
}

/// Share of the platform's average price buyers accept, by game size.
pub fn sales_price_acceptability(game_size: u8) -> Result<f64, EconError> {
    match game_size {
        1 => Ok(0.2),
        2 => Ok(0.4),
        3 => Ok(0.5),
        4 => Ok(0.6),
        5 => Ok(0.8),
        6 => Ok(1.0),
        other => Err(EconError::UnknownGameSize(other)),
    }
}

/// Maximum share of a platform's population a publisher can make aware of a game.
pub fn publisher_awareness(size: PublisherSize) -> f64 {
    match size {
        PublisherSize::Small => 0.01,
        PublisherSize::Medium => 0.03,
        PublisherSize::Large => 0.05,
        PublisherSize::Giant => 0.1,
        PublisherSize::Global => 0.15,
    }
}

/// Retail price chosen by a publisher: a draw in [18, 35 x acceptability], at least 14.
pub fn publisher_price(game_size: u8, rng: &mut SimRng) -> Result<Decimal, EconError> {
    let acceptability = publisher_price_acceptability(game_size)?;
    let upper = (35.0 * acceptability).floor() as i64;
    let price = rng.range_int(18, upper).max(14);
    Ok(Decimal::from(price))
}

/// Royalty a publisher asks for a game, clamped to [0.01, 0.9].
///
/// A quote for the same game is reused. A publisher that is the only one on
/// the platform adds a monopoly premium.
pub fn estimate_royalty(
    publisher: &mut Publisher,
    game: &GameId,
    publishers_on_platform: usize,
    rng: &mut SimRng,
) -> f64 {
    if publisher.recent_estimate.game_id.as_ref() == Some(game) {
        return publisher.recent_estimate.royalty;
    }
    let monopoly = if publishers_on_platform == 1 {
        rng.range(0.1, 0.3)
    } else {
        0.0
    };
    let royalty = (publisher.percentage + rng.range(-0.25, 0.25) + monopoly).clamp(0.01, 0.9);
    publisher.recent_estimate.game_id = Some(game.clone());
    publisher.recent_estimate.royalty = royalty;
    royalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sim_core::{PriceDecider, PublisherId, RoyaltyEstimate};

    fn publisher(percentage: f64) -> Publisher {
        Publisher {
            id: PublisherId::new("pub"),
            name: "Orbit Soft".into(),
            percentage,
            price_decider: PriceDecider::Publisher,
            games_published: 0,
            marketing_budget: Decimal::ZERO,
            size: PublisherSize::Medium,
            platform_tags: vec![],
            recent_estimate: RoyaltyEstimate::default(),
        }
    }

    #[test]
    fn acceptability_tables() {
        assert_eq!(publisher_price_acceptability(1).unwrap(), 0.3);
        assert_eq!(sales_price_acceptability(4).unwrap(), 0.6);
        assert_eq!(sales_price_acceptability(0), Err(EconError::UnknownGameSize(0)));
        assert_eq!(publisher_price_acceptability(7), Err(EconError::UnknownGameSize(7)));
    }

    #[test]
    fn awareness_grows_with_size() {
        let sizes = [
            PublisherSize::Small,
            PublisherSize::Medium,
            PublisherSize::Large,
            PublisherSize::Giant,
            PublisherSize::Global,
        ];
        let values: Vec<f64> = sizes.iter().map(|s| publisher_awareness(*s)).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(SELF_PUBLISH_AWARENESS < values[0]);
    }

    #[test]
    fn royalty_quote_is_cached_per_game() {
        let mut rng = SimRng::seeded("royalty");
        let mut p = publisher(0.4);
        let g = GameId::new("g1");
        let first = estimate_royalty(&mut p, &g, 3, &mut rng);
        let again = estimate_royalty(&mut p, &g, 1, &mut rng);
        assert_eq!(first, again);
        assert!((0.15..=0.65).contains(&first));
    }

    proptest! {
        #[test]
        fn royalty_is_clamped(pct in -2.0f64..3.0, n in 0usize..4, seed in "[a-z]{1,6}") {
            let mut rng = SimRng::seeded(&seed);
            let mut p = publisher(pct);
            let r = estimate_royalty(&mut p, &GameId::new("g"), n, &mut rng);
            prop_assert!((0.01..=0.9).contains(&r));
        }

        #[test]
        fn publisher_price_bounds(size in 1u8..=6, seed in "[a-z]{1,6}") {
            let mut rng = SimRng::seeded(&seed);
            let price = publisher_price(size, &mut rng).unwrap();
            prop_assert!(price >= Decimal::from(14) && price <= Decimal::from(35));
        }
    }
}
