//! Fixed-step scheduling of simulation ticks against a variable frame rate.

use std::time::Duration;
use tracing::trace;

/// Something that advances in discrete ticks at a rate it chooses itself
pub trait Simulation {
    /// Current ticks per second. Read again before every step, so a rate
    /// change takes effect at the next tick boundary.
    fn tick_rate(&self) -> u32;

    /// A paused simulation neither steps nor banks elapsed time
    fn is_paused(&self) -> bool;

    /// Run exactly one tick
    fn step(&mut self);
}

/// Length of one tick at `tick_rate` ticks per second
pub fn tick_interval(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Accumulates frame time and converts it into whole simulation ticks
#[derive(Debug, Default)]
pub struct FixedStepScheduler {
    last_frame: Option<Duration>,
    accumulator: Duration,
}

impl FixedStepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the timestamp of a rendered frame and run every tick that fits.
    ///
    /// `now` must not go backwards; an earlier timestamp counts as zero
    /// elapsed time. The first frame only establishes the time base. Returns
    /// the number of ticks executed, which is zero when the frame came early
    /// and more than one when catching up after a slow frame.
    pub fn advance<S: Simulation>(&mut self, now: Duration, sim: &mut S) -> usize {
        let elapsed = match self.last_frame.replace(now) {
            Some(last) => now.saturating_sub(last),
            None => Duration::ZERO,
        };

        if sim.is_paused() {
            return 0;
        }

        self.accumulator += elapsed;

        let mut steps = 0;
        loop {
            if sim.is_paused() {
                break;
            }
            let interval = tick_interval(sim.tick_rate());
            if self.accumulator < interval {
                break;
            }
            sim.step();
            self.accumulator -= interval;
            steps += 1;
        }

        if steps > 1 {
            trace!(steps, "caught up after a slow frame");
        }
        steps
    }

    /// Drop any banked time and measure the next frame from `now`. With
    /// `None` the next frame becomes a first frame again and runs no steps.
    pub fn rebase(&mut self, now: Option<Duration>) {
        self.last_frame = now;
        self.accumulator = Duration::ZERO;
    }

    /// Time banked toward the next tick
    pub fn accumulated(&self) -> Duration {
        self.accumulator
    }
}
