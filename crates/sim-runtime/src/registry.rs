//! Periodic callback registry.
//!
//! Registrations are keyed by id and kept in insertion order. On every clock
//! sub-step the simulation asks the registry which cadences were crossed and
//! dispatches the matching handlers.

use chrono::{Datelike, Duration, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use sim_core::SimTime;
use tracing::debug;

/// Periodicity of a registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cadence {
    Hourly,
    Daily,
    /// Fires when the date moves onto a Sunday.
    Weekly,
    Monthly,
    Yearly,
}

impl Cadence {
    /// Whether moving from `old` to `new` crosses this cadence's boundary.
    pub fn crossed(self, new: SimTime, old: SimTime) -> bool {
        if new <= old {
            return false;
        }
        let (n, o) = (new.date(), old.date());
        match self {
            Cadence::Hourly => n != o || new.hour() != old.hour(),
            Cadence::Daily => n != o,
            Cadence::Weekly => {
                if n == o {
                    return false;
                }
                // first Sunday strictly after the old date
                let ahead = (7 - o.weekday().num_days_from_sunday()) % 7;
                let ahead = if ahead == 0 { 7 } else { ahead };
                let sunday = o + Duration::days(i64::from(ahead));
                debug_assert_eq!(sunday.weekday(), Weekday::Sun);
                sunday <= n
            }
            Cadence::Monthly => (n.year(), n.month()) != (o.year(), o.month()),
            Cadence::Yearly => n.year() != o.year(),
        }
    }
}

/// One registered periodic callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registration<H> {
    pub id: u32,
    pub cadence: Cadence,
    pub handler: H,
    /// Survives [`Registry::reset`].
    pub persistent: bool,
}

/// Ordered set of registrations keyed by id.
#[derive(Clone, Debug, PartialEq)]
pub struct Registry<H> {
    entries: Vec<Registration<H>>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a registration; an id that is already present is left untouched
    /// and `false` is returned.
    pub fn register(&mut self, id: u32, cadence: Cadence, handler: H, persistent: bool) -> bool {
        if self.contains(id) {
            return false;
        }
        self.entries.push(Registration {
            id,
            cadence,
            handler,
            persistent,
        });
        true
    }

    /// Drop every non-persistent registration.
    pub fn reset(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|r| r.persistent);
        debug!(removed = before - self.entries.len(), "registry reset");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.iter().any(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration<H>> {
        self.entries.iter()
    }

    /// Dispatch every registration whose cadence was crossed between `old`
    /// and `new`, in insertion order. The first error stops the remaining
    /// dispatches. Returns how many handlers ran.
    pub fn fire_boundary<E, F>(&self, new: SimTime, old: SimTime, mut dispatch: F) -> Result<usize, E>
    where
        F: FnMut(&Registration<H>, SimTime) -> Result<(), E>,
    {
        let mut fired = 0;
        for r in &self.entries {
            if r.cadence.crossed(new, old) {
                dispatch(r, new)?;
                fired += 1;
            }
        }
        Ok(fired)
    }
}
