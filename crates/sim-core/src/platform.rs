//! Hardware platforms games are released on.

use crate::game::Media;
use crate::ids::PlatformId;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Installed base at a point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitPoint {
    pub date: NaiveDateTime,
    pub units: f64,
}

/// Development license for a platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub bought: bool,
    pub cost_per_year: Decimal,
    pub expires: Option<NaiveDateTime>,
}

impl Default for License {
    fn default() -> Self {
        Self {
            bought: false,
            cost_per_year: Decimal::new(20_000, 0),
            expires: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CpuSpec {
    /// Clock in Hz.
    pub speed: f64,
    pub cores: u32,
    pub sockets: u32,
    /// Dhrystone instructions per clock cycle.
    pub dipcc: f64,
    pub bits: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GpuSpec {
    pub width: u32,
    pub height: u32,
    pub max_sprites: u32,
    pub colors: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemSpec {
    pub speed: f64,
    /// Available memory configurations in KB.
    pub sizes: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaSpec {
    /// Media capacities in bytes.
    pub capacities: Vec<f64>,
    pub format: String,
}

/// Raw hardware description; see `sim_econ::system_specs` for derived scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpecs {
    pub cpu: CpuSpec,
    pub gpu: GpuSpec,
    pub mem: MemSpec,
    pub media: MediaSpec,
}

impl Default for PlatformSpecs {
    fn default() -> Self {
        Self {
            cpu: CpuSpec {
                speed: 1_193_525.28,
                cores: 1,
                sockets: 1,
                dipcc: 0.0,
                bits: 0,
            },
            gpu: GpuSpec {
                width: 0,
                height: 0,
                max_sprites: 0,
                colors: 0,
            },
            mem: MemSpec {
                speed: 0.0,
                sizes: vec![128.0],
            },
            media: MediaSpec {
                capacities: vec![131_072.0, 262_144.0, 524_288.0],
                format: String::new(),
            },
        }
    }
}

/// A console or computer on the market.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub tag: Option<String>,
    pub name: String,
    pub release_date: NaiveDateTime,
    pub discontinue_date: NaiveDateTime,
    pub released: bool,
    pub discontinued: bool,
    pub generation: u32,
    /// Installed-base history, ascending by date.
    pub units: Vec<UnitPoint>,
    /// Installed base at the current simulated time.
    pub units_sold: u64,
    pub average_game_price: Decimal,
    pub media: Vec<Media>,
    pub license: License,
    pub specs: PlatformSpecs,
}

impl Platform {
    /// On the market at the platform's own flags.
    pub fn is_active(&self) -> bool {
        self.released && !self.discontinued
    }
}
