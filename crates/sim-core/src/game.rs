//! Software (game) projects: lifecycle phases, genres, advertising and sales history.

use crate::ids::{CompanyId, FeatureId, GameId, PlatformId, PublisherId, TeamId, PLAYER_COMPANY};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of daily sales reports kept in the rolling window.
pub const SALES_WINDOW: usize = 60;

/// Release lifecycle of a game. Ordering follows the lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    PreAlpha,
    Alpha,
    Beta,
    Release,
    ScheduleToDiscontinue,
    Discontinue,
}

impl Phase {
    /// True while the team is still building the game.
    pub fn is_development(self) -> bool {
        matches!(self, Self::PreAlpha | Self::Alpha | Self::Beta)
    }

    /// True while the game is on the market.
    pub fn is_on_market(self) -> bool {
        matches!(self, Self::Release | Self::ScheduleToDiscontinue)
    }

    /// Work multiplier applied to development points. `None` outside development.
    pub fn multiplier(self) -> Option<f64> {
        match self {
            Self::PreAlpha | Self::Alpha => Some(1.0),
            Self::Beta => Some(0.7),
            _ => None,
        }
    }
}

/// Game genres known to the market model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genre {
    Strategy,
    Simulation,
    Adventure,
    RolePlaying,
    Action,
    Puzzle,
    Racing,
    Sports,
}

impl Genre {
    /// Every genre in display order.
    pub const ALL: [Genre; 8] = [
        Genre::Strategy,
        Genre::Simulation,
        Genre::Adventure,
        Genre::RolePlaying,
        Genre::Action,
        Genre::Puzzle,
        Genre::Racing,
        Genre::Sports,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strategy => "Strategy",
            Self::Simulation => "Simulation",
            Self::Adventure => "Adventure",
            Self::RolePlaying => "Role-playing",
            Self::Action => "Action",
            Self::Puzzle => "Puzzle",
            Self::Racing => "Racing",
            Self::Sports => "Sports",
        }
    }
}

/// Compatibility score of a genre pair; pairs are unordered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenreCompatibility {
    pub a: Genre,
    pub b: Genre,
    pub score: f64,
}

/// How a game reaches the market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    SelfPublish,
    Publisher,
}

/// Physical distribution media.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Media {
    RomCartridge,
    FloppyDisk,
    CassetteTape,
}

/// Advertising channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdKind {
    Magazine,
    Radio,
    Television,
    Billboard,
}

/// Bought advertising: each remaining slot is consumed once per day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Advertising {
    pub kind: AdKind,
    pub cost_per_slot: Decimal,
    pub slots: u32,
}

/// Net revenue attributed to a calendar month (first day of month).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    pub month: NaiveDate,
    pub amount: Decimal,
}

/// A software project owned by the player's studio or by a competitor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    /// Development progress ratio; 1.0 means every feature reached level 2.
    pub progress: f64,
    pub phase: Phase,
    pub bugs: u64,
    pub hype: u64,
    pub ads: Vec<Advertising>,
    pub total_units_sold: u64,
    pub release_date: Option<NaiveDateTime>,
    /// Days without a sale while released, then days spent scheduled to discontinue.
    pub discontinue_counter: u32,
    /// Monthly revenue buckets.
    pub sales_data: Vec<SalesPoint>,
    /// Last daily sales reports, at most [`SALES_WINDOW`] entries.
    pub sales_window: Vec<SalesPoint>,
    pub price: Decimal,
    pub unit_cost: Decimal,
    /// Size class in 1..=6.
    pub game_size: u8,
    pub distribution: Distribution,
    pub media: Media,
    pub platform_ids: Vec<PlatformId>,
    pub genres: Vec<Genre>,
    /// Development team; competitor games have none.
    pub team_id: Option<TeamId>,
    pub developer_id: CompanyId,
    pub publisher_id: Option<PublisherId>,
    /// Fraction of gross revenue kept by the publisher.
    pub publisher_royalties: f64,
    pub feature_ids: Vec<FeatureId>,
    pub feature_progress: BTreeMap<FeatureId, f64>,
}

impl Game {
    /// New self-published project in PreAlpha with zeroed feature progress.
    pub fn new(
        id: GameId,
        name: impl Into<String>,
        platform_ids: Vec<PlatformId>,
        genres: Vec<Genre>,
        team_id: Option<TeamId>,
        developer_id: Option<CompanyId>,
        feature_ids: Vec<FeatureId>,
    ) -> Self {
        let feature_progress = feature_ids.iter().map(|f| (f.clone(), 0.0)).collect();
        Self {
            id,
            name: name.into(),
            progress: 0.0,
            phase: Phase::PreAlpha,
            bugs: 0,
            hype: 0,
            ads: Vec::new(),
            total_units_sold: 0,
            release_date: None,
            discontinue_counter: 0,
            sales_data: Vec::new(),
            sales_window: Vec::new(),
            price: Decimal::ZERO,
            unit_cost: Decimal::ZERO,
            game_size: 1,
            distribution: Distribution::SelfPublish,
            media: Media::CassetteTape,
            platform_ids,
            genres,
            team_id,
            developer_id: developer_id.unwrap_or_else(|| CompanyId::new(PLAYER_COMPANY)),
            publisher_id: None,
            publisher_royalties: 0.0,
            feature_ids,
            feature_progress,
        }
    }

    /// Owned by the player's studio.
    pub fn is_player_owned(&self) -> bool {
        self.developer_id.as_str() == PLAYER_COMPANY
    }

    /// Sum of progress over all features.
    pub fn total_feature_progress(&self) -> f64 {
        self.feature_progress.values().sum()
    }

    /// Progress accumulated on one feature, 0 when untouched.
    pub fn progress_of(&self, feature: &FeatureId) -> f64 {
        self.feature_progress.get(feature).copied().unwrap_or(0.0)
    }

    /// Record one daily sales report: added to its month bucket and to the rolling window.
    pub fn record_sale(&mut self, at: NaiveDateTime, amount: Decimal) {
        let month = NaiveDate::from_ymd_opt(at.year(), at.month(), 1).unwrap_or(at.date());
        match self.sales_data.iter_mut().find(|p| p.month == month) {
            Some(point) => point.amount += amount,
            None => self.sales_data.push(SalesPoint { month, amount }),
        }
        self.sales_window.push(SalesPoint { month, amount });
        if self.sales_window.len() > SALES_WINDOW {
            let excess = self.sales_window.len() - SALES_WINDOW;
            self.sales_window.drain(..excess);
        }
    }

    /// Add advertising slots; a channel already running gets the slots appended.
    pub fn merge_advertising(&mut self, ad: Advertising) {
        match self.ads.iter_mut().find(|a| a.kind == ad.kind) {
            Some(existing) => existing.slots += ad.slots,
            None => self.ads.push(ad),
        }
    }
}
