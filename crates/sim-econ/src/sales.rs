//! Sales totals and trends.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sim_core::{Game, SALES_WINDOW};

/// Percentage change of the latest period against the one before it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesTrend {
    /// Period length in days: 30, 7, or 1 when there is not enough history.
    pub range_days: u32,
    pub percent: f64,
}

impl SalesTrend {
    fn flat() -> Self {
        Self {
            range_days: 1,
            percent: 0.0,
        }
    }
}

/// Lifetime net revenue of a game.
pub fn total_sales(game: &Game) -> Decimal {
    game.sales_data.iter().map(|p| p.amount).sum()
}

/// Trend over the rolling sales window.
///
/// A full window compares the last 30 days with the 30 before, 14 or more
/// entries compare weeks, anything shorter is flat. A silent latest period
/// after sales reports -100%.
pub fn sales_trend(game: &Game) -> SalesTrend {
    let window = &game.sales_window;
    let days = match window.len() {
        n if n >= SALES_WINDOW => 30,
        n if n >= 14 => 7,
        _ => return SalesTrend::flat(),
    };
    let n = window.len();
    let sum = |from: usize, to: usize| -> Decimal { window[from..to].iter().map(|p| p.amount).sum() };
    let pre = sum(n - 2 * days, n - days);
    let curr = sum(n - days, n);
    if curr.is_zero() && pre.is_zero() {
        return SalesTrend::flat();
    }
    let percent = if curr.is_zero() {
        -100.0
    } else {
        ((curr - pre) / curr * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    };
    SalesTrend {
        range_days: days as u32,
        percent,
    }
}
