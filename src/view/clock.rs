//! Frame timing.

use std::thread;
use std::time::{Duration, Instant};

/// Paces the frame loop and reports time for blink state.
pub trait FrameClock {
    /// Time since the clock started.
    fn elapsed(&self) -> Duration;

    /// Block until the next tick is due.
    fn wait_next_tick(&mut self);
}

/// Wall-clock pacing at a fixed tick rate.
#[derive(Debug)]
pub struct FixedRateClock {
    started: Instant,
    next_tick: Instant,
    interval: Duration,
}

impl FixedRateClock {
    /// Tick `fps` times per second (at least once).
    pub fn new(fps: u32) -> Self {
        let interval = Duration::from_secs(1) / fps.max(1);
        let started = Instant::now();
        Self {
            started,
            next_tick: started + interval,
            interval,
        }
    }

    /// Time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameClock for FixedRateClock {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn wait_next_tick(&mut self) {
        let now = Instant::now();
        if self.next_tick > now {
            thread::sleep(self.next_tick - now);
            self.next_tick += self.interval;
        } else {
            // Behind schedule: don't try to catch up with a burst of frames
            self.next_tick = now + self.interval;
        }
    }
}

/// Deterministic clock for tests: every tick moves time forward by a fixed step.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Duration,
    step: Duration,
    ticks: u64,
}

impl ManualClock {
    /// Start at zero and advance by `step` per tick.
    pub fn new(step: Duration) -> Self {
        Self::starting_at(Duration::ZERO, step)
    }

    /// Start at `now` and advance by `step` per tick.
    pub fn starting_at(now: Duration, step: Duration) -> Self {
        Self {
            now,
            step,
            ticks: 0,
        }
    }

    /// Ticks waited so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl FrameClock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now
    }

    fn wait_next_tick(&mut self) {
        self.now += self.step;
        self.ticks += 1;
    }
}
