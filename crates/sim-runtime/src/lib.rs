#![deny(warnings)]

//! Time engine for Studio Tycoon.
//!
//! A [`Simulation`] owns the clock, the periodic callback registry and the
//! world. Every tick walks simulated time in sub-steps; each crossed hour,
//! day, week, month or year boundary dispatches the registered handlers,
//! which run the per-entity steps in [`steps`]. The [`driver`] module paces
//! ticks against wall-clock time.

pub mod actions;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod market;
pub mod registry;
pub mod scenario;
pub mod sim;
pub mod steps;

#[cfg(test)]
mod testing;

pub use clock::{Clock, Speed, SpeedControl, TickReport};
pub use config::{validate_config, ConfigError, LoadConfig};
pub use driver::{
    clamp_ticks, run_realtime, ticks_for, DriverError, Frame, Pacer, RunSummary, SpeedCommand,
};
pub use error::{ClockError, SimError, StepError};
pub use market::{competitor_companies, random_competitor_game, two_word_name, COMPETITOR_COMPANIES};
pub use registry::{Cadence, Registration, Registry};
pub use scenario::{demo_simulation, demo_world};
pub use sim::{Handler, Simulation, World, AUTOSAVE_ID, DEFAULT_HANDLERS};
