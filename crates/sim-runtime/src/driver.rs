//! Real-time driver: turns wall-clock frames into simulation ticks.
//!
//! Frames are scheduled against a fixed scope start, so late timers are
//! absorbed by the next target instead of accumulating drift. A late frame
//! delivers more than one tick; the surplus is capped per call.

use crate::clock::{Speed, TickReport};
use crate::error::SimError;
use crate::sim::Simulation;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

/// Next scheduled frame, relative to the pacing scope start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Ticks to deliver when the frame fires.
    pub ticks: u32,
    pub deadline: Duration,
}

/// Drift-free frame scheduler.
#[derive(Clone, Debug)]
pub struct Pacer {
    cadence_ms: f64,
    previous_target_ms: f64,
}

impl Pacer {
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence_ms: (cadence.as_secs_f64() * 1000.0).max(1.0),
            previous_target_ms: 0.0,
        }
    }

    pub fn cadence(&self) -> Duration {
        Duration::from_secs_f64(self.cadence_ms / 1000.0)
    }

    /// Forget the previous target; the next frame is scheduled as the first
    /// of a new scope.
    pub fn reset(&mut self) {
        self.previous_target_ms = 0.0;
    }

    /// Schedule the frame following one observed `elapsed` after the scope
    /// start. The deadline is the next cadence multiple after the rounded
    /// elapsed time; ticks are the distance from the previous deadline.
    pub fn schedule(&mut self, elapsed: Duration) -> Frame {
        let ms = self.cadence_ms;
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let target = (elapsed_ms / ms).round() * ms + ms;
        let delta = (target - self.previous_target_ms).round();
        self.previous_target_ms = target;
        Frame {
            ticks: ticks_for(delta, ms),
            deadline: Duration::from_secs_f64(target / 1000.0),
        }
    }
}

/// Whole ticks in `delta_ms` at `cadence_ms`, rounded.
pub fn ticks_for(delta_ms: f64, cadence_ms: f64) -> u32 {
    if cadence_ms <= 0.0 || !delta_ms.is_finite() {
        return 0;
    }
    (delta_ms / cadence_ms).round().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Cap ticks per call, warning when frames fell behind.
pub fn clamp_ticks(ticks: u32, max: u32) -> u32 {
    if ticks > 1 {
        warn!(ticks, max, "driver is being throttled");
    }
    ticks.min(max)
}

/// Commands accepted by [`run_realtime`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedCommand {
    Pause,
    Resume,
    Play,
    FastForward,
    Stop,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Totals of one driver run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub ticks: u64,
    pub sub_steps: u64,
}

impl RunSummary {
    fn record(&mut self, ticks: u32, report: &TickReport) {
        self.frames += 1;
        self.ticks += u64::from(ticks);
        self.sub_steps += report.sub_steps;
    }
}

/// Tick `sim` in real time until [`SpeedCommand::Stop`] arrives or the
/// command channel closes.
pub async fn run_realtime(
    sim: &mut Simulation,
    mut commands: mpsc::Receiver<SpeedCommand>,
) -> Result<RunSummary, DriverError> {
    let max = sim.config().max_ticks_per_call;
    let mut pacer = Pacer::new(Duration::from_millis(sim.config().cadence_ms));
    let mut scope = Instant::now();
    let mut pending = (sim.speed() != Speed::Paused).then(|| pacer.schedule(Duration::ZERO));
    let mut summary = RunSummary::default();
    info!(cadence = ?pacer.cadence(), max, "real-time driver started");

    loop {
        let deadline = pending.map_or_else(|| Instant::now() + pacer.cadence(), |f| scope + f.deadline);
        tokio::select! {
            cmd = commands.recv() => {
                match cmd {
                    None | Some(SpeedCommand::Stop) => break,
                    Some(SpeedCommand::Pause) => {
                        sim.pause();
                        pending = None;
                    }
                    Some(other) => {
                        match other {
                            SpeedCommand::Resume => sim.resume(),
                            SpeedCommand::Play => sim.play(),
                            _ => sim.fast_forward(),
                        }
                        if sim.speed() != Speed::Paused {
                            pacer.reset();
                            scope = Instant::now();
                            pending = Some(pacer.schedule(Duration::ZERO));
                        }
                    }
                }
                debug!(speed = ?sim.speed(), "speed changed");
            }
            _ = sleep_until(deadline), if pending.is_some() => {
                let ticks = clamp_ticks(pending.map_or(0, |f| f.ticks), max);
                let report = sim.tick(ticks)?;
                summary.record(ticks, &report);
                debug!(ticks, now = %report.to, "frame");
                pending = Some(pacer.schedule(Instant::now() - scope));
            }
        }
    }
    info!(frames = summary.frames, ticks = summary.ticks, "real-time driver stopped");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::World;
    use chrono::Duration as SimDuration;
    use sim_core::SimConfig;
    use tokio::time::sleep;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn on_time_frames_deliver_one_tick() {
        let mut p = Pacer::new(ms(1000));
        assert_eq!(p.schedule(ms(0)), Frame { ticks: 1, deadline: ms(1000) });
        assert_eq!(p.schedule(ms(1000)), Frame { ticks: 1, deadline: ms(2000) });
        assert_eq!(p.schedule(ms(2000)), Frame { ticks: 1, deadline: ms(3000) });
    }

    #[test]
    fn small_lateness_does_not_drift() {
        let mut p = Pacer::new(ms(1000));
        p.schedule(ms(0));
        let f = p.schedule(ms(1040));
        assert_eq!(f, Frame { ticks: 1, deadline: ms(2000) });
        let f = p.schedule(ms(2480));
        assert_eq!(f, Frame { ticks: 1, deadline: ms(3000) });
    }

    #[test]
    fn a_stalled_frame_catches_up() {
        let mut p = Pacer::new(ms(1000));
        p.schedule(ms(0));
        let f = p.schedule(ms(4100));
        assert_eq!(f, Frame { ticks: 4, deadline: ms(5000) });
    }

    #[test]
    fn reset_starts_a_new_scope() {
        let mut p = Pacer::new(ms(500));
        p.schedule(ms(0));
        p.schedule(ms(3000));
        p.reset();
        assert_eq!(p.schedule(ms(0)), Frame { ticks: 1, deadline: ms(500) });
    }

    #[test]
    fn clamp_caps_tick_count() {
        assert_eq!(clamp_ticks(1, 72), 1);
        assert_eq!(clamp_ticks(100, 72), 72);
        assert_eq!(clamp_ticks(0, 72), 0);
    }

    #[test]
    fn tick_rounding() {
        assert_eq!(ticks_for(1499.0, 1000.0), 1);
        assert_eq!(ticks_for(1500.0, 1000.0), 2);
        assert_eq!(ticks_for(-10.0, 1000.0), 0);
        assert_eq!(ticks_for(10.0, 0.0), 0);
    }

    fn sim() -> Simulation {
        let mut s = Simulation::new(SimConfig::default(), World::default());
        s.play();
        s
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_until_stopped() {
        let mut s = sim();
        let start = s.now();
        let (tx, rx) = mpsc::channel(4);
        let (summary, _) = tokio::join!(run_realtime(&mut s, rx), async move {
            sleep(ms(5500)).await;
            tx.send(SpeedCommand::Stop).await.unwrap();
        });
        let summary = summary.unwrap();
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.sub_steps, 5 * 60);
        assert_eq!(s.now(), start + SimDuration::hours(5));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_pending_frame_and_resume_restarts_pacing() {
        let mut s = sim();
        let start = s.now();
        let (tx, rx) = mpsc::channel(4);
        let (summary, _) = tokio::join!(run_realtime(&mut s, rx), async move {
            sleep(ms(2500)).await;
            tx.send(SpeedCommand::Pause).await.unwrap();
            sleep(ms(7700)).await;
            tx.send(SpeedCommand::Resume).await.unwrap();
            sleep(ms(2300)).await;
            tx.send(SpeedCommand::Stop).await.unwrap();
        });
        assert_eq!(summary.unwrap().ticks, 4);
        assert_eq!(s.now(), start + SimDuration::hours(4));
        assert_eq!(s.speed(), Speed::Normal);
    }

    #[tokio::test(start_paused = true)]
    async fn fast_forward_advances_days() {
        let mut s = sim();
        let start = s.now();
        let (tx, rx) = mpsc::channel(4);
        let (summary, _) = tokio::join!(run_realtime(&mut s, rx), async move {
            tx.send(SpeedCommand::FastForward).await.unwrap();
            sleep(ms(3500)).await;
            drop(tx);
        });
        assert_eq!(summary.unwrap().ticks, 3);
        assert_eq!(s.now(), start + SimDuration::days(3));
    }

    #[tokio::test(start_paused = true)]
    async fn starts_idle_when_paused() {
        let mut s = sim();
        s.pause();
        let (tx, rx) = mpsc::channel(4);
        let (summary, _) = tokio::join!(run_realtime(&mut s, rx), async move {
            sleep(ms(4000)).await;
            tx.send(SpeedCommand::Stop).await.unwrap();
        });
        assert_eq!(summary.unwrap(), RunSummary::default());
    }
}
