//! Save record exchanged with persistence stores.

use crate::building::Building;
use crate::feature::Feature;
use crate::game::Game;
use crate::hardware::HardwareProject;
use crate::market::{Company, Publisher};
use crate::news::News;
use crate::platform::Platform;
use crate::staff::Team;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Format version written into new saves.
pub const SAVE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Every entity collection of a running simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub games: Vec<Game>,
    pub companies: Vec<Company>,
    pub teams: Vec<Team>,
    pub hardware_projects: Vec<HardwareProject>,
    pub news: Vec<News>,
    pub platforms: Vec<Platform>,
    pub publishers: Vec<Publisher>,
    pub game_features: Vec<Feature>,
    pub hardware_features: Vec<Feature>,
    pub buildings: Vec<Building>,
}

/// A named save: metadata, clock, cash and collections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Save {
    pub id: String,
    pub name: String,
    pub kind: String,
    /// Unix seconds; stamped by the store.
    pub created: u64,
    /// Unix seconds; stamped by the store.
    pub last_saved: u64,
    pub version: String,
    pub cash: Decimal,
    pub time: NaiveDateTime,
    pub data: SaveData,
}

impl Save {
    /// Fresh save record around a snapshot; timestamps are left for the store.
    pub fn new(id: impl Into<String>, name: impl Into<String>, cash: Decimal, time: NaiveDateTime, data: SaveData) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: "default".to_string(),
            created: 0,
            last_saved: 0,
            version: SAVE_VERSION.to_string(),
            cash,
            time,
            data,
        }
    }
}
