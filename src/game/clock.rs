use log::warn;
use std::time::Duration;

/// Fixed-step accumulator that turns frame times into simulation ticks
///
/// Each tick consumes exactly one interval from the accumulator, so leftover
/// time carries into the next frame and the simulation rate does not drift
/// with the frame rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    tick_interval: Duration,
    max_catch_up: Option<u32>,
    accumulator: Duration,
}

impl GameClock {
    pub fn new(tick_interval: Duration, max_catch_up: Option<u32>) -> Self {
        Self {
            tick_interval,
            max_catch_up,
            accumulator: Duration::ZERO,
        }
    }

    /// Add a frame's elapsed time and return how many ticks are due.
    ///
    /// A tick is due while the accumulator is strictly greater than the
    /// interval. When the catch-up cap is reached the backlog is dropped,
    /// keeping only the partial tick.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator > self.tick_interval {
            if self.max_catch_up.is_some_and(|max| ticks >= max) {
                let dropped = self.accumulator.as_nanos() / self.tick_interval.as_nanos();
                warn!("Frame fell behind, dropping {} simulation ticks", dropped);
                self.accumulator = remainder(self.accumulator, self.tick_interval);
                break;
            }

            self.accumulator -= self.tick_interval;
            ticks += 1;
        }

        ticks
    }

    /// Forget any accumulated time
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }

    pub fn accumulated(&self) -> Duration {
        self.accumulator
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

fn remainder(value: Duration, interval: Duration) -> Duration {
    let nanos = value.as_nanos() % interval.as_nanos();
    Duration::from_nanos(nanos as u64)
}
