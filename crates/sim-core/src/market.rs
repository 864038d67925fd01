//! Publishers and companies.

use crate::ids::{CompanyId, GameId, PublisherId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Publisher reach class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublisherSize {
    Small,
    Medium,
    Large,
    Giant,
    Global,
}

/// Who sets the retail price of a published game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceDecider {
    Publisher,
    Developer,
}

/// Last royalty quote given by a publisher, reused for the same game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoyaltyEstimate {
    pub game_id: Option<GameId>,
    pub royalty: f64,
}

impl Default for RoyaltyEstimate {
    fn default() -> Self {
        Self {
            game_id: None,
            royalty: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: PublisherId,
    pub name: String,
    /// Base royalty fraction.
    pub percentage: f64,
    pub price_decider: PriceDecider,
    pub games_published: u32,
    pub marketing_budget: Decimal,
    pub size: PublisherSize,
    /// Tags of platforms this publisher distributes on.
    pub platform_tags: Vec<String>,
    pub recent_estimate: RoyaltyEstimate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyOwner {
    Player,
    Competition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyKind {
    Public,
    Private,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub owner: CompanyOwner,
    pub kind: CompanyKind,
    pub location: String,
}
