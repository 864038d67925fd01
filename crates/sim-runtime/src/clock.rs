//! Simulated clock with speed control.
//!
//! A tick advances time by one hour at normal speed and one day when fast
//! forwarding. The jump is walked in sub-steps (minutes, respectively hours)
//! so that every hour, day, week, month and year boundary is observed once
//! and in chronological order, whatever the tick count.

use crate::error::ClockError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use sim_core::SimTime;
use tracing::debug;

/// Simulation speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speed {
    Paused,
    /// One simulated hour per tick.
    Normal,
    /// One simulated day per tick.
    FastForward,
}

impl Speed {
    /// Jump for `n` ticks and sub-step length, `None` while paused.
    fn span(self, n: u32) -> Option<(Duration, Duration)> {
        let n = i64::from(n);
        match self {
            Speed::Paused => None,
            Speed::Normal => Some((Duration::hours(n), Duration::minutes(1))),
            Speed::FastForward => Some((Duration::days(n), Duration::hours(1))),
        }
    }
}

/// Speed state machine with pause/resume memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeedControl {
    current: Speed,
    saved: Option<Speed>,
}

impl SpeedControl {
    pub fn new(initial: Speed) -> Self {
        Self {
            current: initial,
            saved: None,
        }
    }

    pub fn current(&self) -> Speed {
        self.current
    }

    pub fn is_paused(&self) -> bool {
        self.current == Speed::Paused
    }

    /// Pause, remembering the running speed. Pausing twice keeps the first memory.
    pub fn pause(&mut self) {
        if self.current != Speed::Paused {
            self.saved = Some(self.current);
            self.current = Speed::Paused;
        }
    }

    /// Restore the speed saved by [`pause`](Self::pause); no-op if nothing was saved.
    pub fn resume(&mut self) {
        if let Some(speed) = self.saved.take() {
            self.current = speed;
        }
    }

    pub fn play(&mut self) {
        self.current = Speed::Normal;
        self.saved = None;
    }

    pub fn fast_forward(&mut self) {
        self.current = Speed::FastForward;
        self.saved = None;
    }
}

/// Summary of one [`Clock::tick`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub from: SimTime,
    pub to: SimTime,
    pub sub_steps: u64,
}

/// Current simulated time plus speed.
#[derive(Clone, Debug)]
pub struct Clock {
    now: SimTime,
    speed: SpeedControl,
}

impl Clock {
    /// Clock at `start`, running at normal speed.
    pub fn new(start: SimTime) -> Self {
        Self {
            now: start,
            speed: SpeedControl::new(Speed::Normal),
        }
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Jump to `time` without firing anything (save load).
    pub fn set_now(&mut self, time: SimTime) {
        self.now = time;
    }

    pub fn speed(&self) -> Speed {
        self.speed.current()
    }

    pub fn speed_control(&self) -> &SpeedControl {
        &self.speed
    }

    pub fn pause(&mut self) {
        self.speed.pause();
    }

    pub fn resume(&mut self) {
        self.speed.resume();
    }

    pub fn play(&mut self) {
        self.speed.play();
    }

    pub fn fast_forward(&mut self) {
        self.speed.fast_forward();
    }

    /// Advance by `n` ticks at the current speed.
    ///
    /// `now` moves to the target first; `on_sub_step(step, previous_step)` is
    /// then called for every sub-step from the old time to the target. An
    /// error from the callback aborts the walk with `now` already advanced.
    /// `n == 0` and a paused clock are no-ops.
    pub fn tick<E, F>(&mut self, n: u32, mut on_sub_step: F) -> Result<TickReport, E>
    where
        E: From<ClockError>,
        F: FnMut(SimTime, SimTime) -> Result<(), E>,
    {
        let from = self.now;
        let idle = TickReport {
            from,
            to: from,
            sub_steps: 0,
        };
        let Some((jump, step)) = self.speed.current().span(n) else {
            return Ok(idle);
        };
        if n == 0 {
            return Ok(idle);
        }
        let to = from
            .checked_add_signed(jump)
            .ok_or(ClockError::Overflow(n))?;
        self.now = to;

        let mut prev = from;
        let mut sub_steps = 0u64;
        while prev < to {
            let cur = prev.checked_add_signed(step).ok_or(ClockError::Overflow(n))?;
            on_sub_step(cur, prev)?;
            prev = cur;
            sub_steps += 1;
        }
        debug!(%from, %to, sub_steps, "clock tick");
        Ok(TickReport { from, to, sub_steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Cadence;
    use chrono::{Datelike, NaiveDate, Timelike, Weekday};
    use proptest::prelude::*;

    fn start() -> SimTime {
        sim_core::starting_time()
    }

    fn collect(clock: &mut Clock, n: u32) -> Vec<(SimTime, SimTime)> {
        let mut seen = Vec::new();
        clock
            .tick::<ClockError, _>(n, |now, prev| {
                seen.push((now, prev));
                Ok(())
            })
            .unwrap();
        seen
    }

    #[test]
    fn tick_zero_is_noop() {
        let mut clock = Clock::new(start());
        let seen = collect(&mut clock, 0);
        assert!(seen.is_empty());
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn paused_clock_does_not_move() {
        let mut clock = Clock::new(start());
        clock.pause();
        assert!(collect(&mut clock, 24).is_empty());
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn normal_speed_walks_minutes() {
        let mut clock = Clock::new(start());
        let seen = collect(&mut clock, 2);
        assert_eq!(seen.len(), 120);
        assert_eq!(clock.now(), start() + Duration::hours(2));
        assert_eq!(seen[0], (start() + Duration::minutes(1), start()));
        let hours = seen.iter().filter(|(n, p)| Cadence::Hourly.crossed(*n, *p)).count();
        assert_eq!(hours, 2);
    }

    #[test]
    fn fast_forward_walks_hours() {
        let mut clock = Clock::new(start());
        clock.fast_forward();
        let seen = collect(&mut clock, 3);
        assert_eq!(seen.len(), 72);
        assert_eq!(clock.now(), start() + Duration::days(3));
        assert!(seen.iter().all(|(n, _)| n.minute() == 0));
    }

    #[test]
    fn pause_and_resume_restore_speed() {
        let mut s = SpeedControl::new(Speed::FastForward);
        s.pause();
        s.pause();
        assert!(s.is_paused());
        s.resume();
        assert_eq!(s.current(), Speed::FastForward);
        s.resume();
        assert_eq!(s.current(), Speed::FastForward);
        s.pause();
        s.play();
        s.resume();
        assert_eq!(s.current(), Speed::Normal);
    }

    #[test]
    fn overflow_is_an_error() {
        let end = NaiveDate::MAX.and_hms_opt(23, 0, 0).unwrap();
        let mut clock = Clock::new(end);
        let r = clock.tick::<ClockError, _>(2, |_, _| Ok(()));
        assert_eq!(r, Err(ClockError::Overflow(2)));
        assert_eq!(clock.now(), end);
    }

    #[test]
    fn sunday_counted_once_across_fast_forward_week() {
        let mut clock = Clock::new(start());
        clock.fast_forward();
        let seen = collect(&mut clock, 14);
        let sundays = seen
            .iter()
            .filter(|(n, p)| Cadence::Weekly.crossed(*n, *p))
            .inspect(|(n, _)| assert_eq!(n.weekday(), Weekday::Sun))
            .count();
        assert_eq!(sundays, 2);
    }

    proptest! {
        #[test]
        fn boundaries_independent_of_chunking(chunks in proptest::collection::vec(1u32..48, 1..8)) {
            let total: u32 = chunks.iter().sum();
            let mut big = Clock::new(start());
            let all = collect(&mut big, total);
            let mut small = Clock::new(start());
            let mut pieces = Vec::new();
            for c in &chunks {
                pieces.extend(collect(&mut small, *c));
            }
            prop_assert_eq!(big.now(), small.now());
            for cadence in [Cadence::Hourly, Cadence::Daily, Cadence::Weekly, Cadence::Monthly] {
                let a = all.iter().filter(|(n, p)| cadence.crossed(*n, *p)).count();
                let b = pieces.iter().filter(|(n, p)| cadence.crossed(*n, *p)).count();
                prop_assert_eq!(a, b);
            }
            let hours = all.iter().filter(|(n, p)| Cadence::Hourly.crossed(*n, *p)).count();
            prop_assert_eq!(hours as u32, total);
        }
    }
}
