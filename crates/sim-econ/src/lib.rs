#![deny(warnings)]

//! Economic models and derived views for Studio Tycoon.
//!
//! This crate provides validated aggregation helpers consumed by the step
//! functions and by reporting:
//! - Feature progress by category, average feature scale and game progress
//! - Sales totals and trends over the rolling sales window
//! - Genre factor matrix and genre pair compatibility
//! - Price acceptability, publisher awareness and royalty estimates
//! - Building floor area, platform system specs and installed-base interpolation
//! - A pluggable demand model with the classic default formulas

pub mod building;
pub mod demand;
pub mod features;
pub mod genre;
pub mod platform;
pub mod pricing;
pub mod sales;

pub use building::{electricity_cost, rentable_square_meters, ELECTRICITY_COST_PER_SQM};
pub use demand::{ClassicDemand, DemandModel, SaleContext};
pub use features::{
    average_feature_scale, dependencies_all, feature_progress_by_category, game_progress,
    is_revealed, level2_point_scale, CategoryProgress, MAX_FEATURE_SCALE,
};
pub use genre::{genre_factor, GenreCompatibilityTable, GenreFactorMatrix};
pub use platform::{system_specs, units_sold_at, SystemSpecs};
pub use pricing::{
    estimate_royalty, publisher_awareness, publisher_price, publisher_price_acceptability,
    sales_price_acceptability, SELF_PUBLISH_AWARENESS,
};
pub use sales::{sales_trend, total_sales, SalesTrend};

use chrono::NaiveDateTime;
use sim_core::{Genre, PlatformId};
use thiserror::Error;

/// Errors produced by economic helpers.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Game size has no entry in a price acceptability table.
    #[error("game size {0} does not map to a price acceptability")]
    UnknownGameSize(u8),
    /// A game lists no platform.
    #[error("game {0} has no platform")]
    MissingPlatform(String),
    /// A game lists no genre.
    #[error("game {0} has no genre")]
    MissingGenre(String),
    /// A publisher-distributed game references no known publisher.
    #[error("publisher is not set for game {0}")]
    MissingPublisher(String),
    /// The genre factor matrix has no row for a platform.
    #[error("genre matrix is not available for platform {0}")]
    MissingGenreMatrix(PlatformId),
    /// The platform row has no entry for a genre.
    #[error("genre factor is not available for platform {platform}, genre {genre:?}")]
    MissingGenreFactor { platform: PlatformId, genre: Genre },
    /// Numeric conversion failed or produced a non-finite value.
    #[error("non-finite numeric conversion")]
    NonFinite,
}

/// Linear interpolation between `v0` and `v1`.
///
/// Example:
/// assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
pub fn lerp(v0: f64, v1: f64, t: f64) -> f64 {
    (1.0 - t) * v0 + t * v1
}

/// Fractional days from `from` to `to` (negative when `to` is earlier).
pub fn count_days(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 86_400.0
}
