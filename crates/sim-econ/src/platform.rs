//! Platform capability scores and installed-base interpolation.

use crate::{count_days, lerp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sim_core::{Platform, UnitPoint};

/// Derived capability scores compared against feature requirements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemSpecs {
    pub processing: f64,
    pub graphics: f64,
    pub storage: f64,
    pub memory: f64,
}

/// Capability scores of a platform. A sprite count of 0 counts as 1.
pub fn system_specs(platform: &Platform) -> SystemSpecs {
    let cpu = &platform.specs.cpu;
    let gpu = &platform.specs.gpu;
    let dmips = f64::from(cpu.cores) * cpu.speed * f64::from(cpu.sockets) * cpu.dipcc;
    let processing = dmips * f64::from(cpu.bits).sqrt() / 10_000.0;
    let sprites = f64::from(gpu.max_sprites.max(1));
    let graphics = f64::from(gpu.width)
        * f64::from(gpu.height)
        * sprites.sqrt()
        * f64::from(gpu.colors).sqrt()
        * f64::from(platform.generation + 1)
        / 10_000.0;
    let memory = platform
        .specs
        .mem
        .sizes
        .iter()
        .copied()
        .reduce(f64::min)
        .unwrap_or(0.0);
    let storage = platform
        .specs
        .media
        .capacities
        .iter()
        .copied()
        .reduce(f64::max)
        .unwrap_or(0.0);
    SystemSpecs {
        processing,
        graphics,
        storage,
        memory,
    }
}

/// Installed base at `date` from an ascending series.
///
/// Exact matches return the recorded value, dates before the first point
/// return 0, dates between points interpolate linearly and dates after the
/// last point return the last value. An empty series yields 0.
pub fn units_sold_at(units: &[UnitPoint], date: NaiveDateTime) -> f64 {
    let Some(idx) = units.iter().position(|u| u.date >= date) else {
        return units.last().map_or(0.0, |u| u.units);
    };
    let next = &units[idx];
    if next.date == date {
        return next.units;
    }
    let Some(prev) = idx.checked_sub(1).map(|i| &units[i]) else {
        return 0.0;
    };
    let span = count_days(prev.date, next.date);
    if span <= 0.0 {
        return next.units;
    }
    lerp(prev.units, next.units, count_days(prev.date, date) / span)
}
