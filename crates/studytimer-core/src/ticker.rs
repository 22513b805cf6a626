//! Tick sources that drive an [`IntervalTimer`](crate::timer::IntervalTimer).
//!
//! The timer never schedules itself. A host pulls ticks from a [`TickSource`]
//! and forwards each one to `tick()`. Real hosts use [`IntervalTicks`]; tests
//! use [`SyntheticTicks`] so no wall-clock waiting is involved.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// A periodic caller delivering at most one tick per elapsed period.
pub trait TickSource {
    /// Wait for the next tick. Returns `false` once the source is exhausted.
    fn next_tick(&mut self) -> impl Future<Output = bool> + Send;
}

/// One tick per `period` from the tokio clock.
///
/// Missed ticks are dropped rather than replayed, so a host that was
/// suspended still sees a single late tick.
#[derive(Debug)]
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    pub fn new(period: Duration) -> Self {
        // First tick after one full period, not immediately.
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickSource for IntervalTicks {
    async fn next_tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// A fixed number of ticks delivered without waiting.
#[derive(Debug, Clone)]
pub struct SyntheticTicks {
    remaining: u64,
}

impl SyntheticTicks {
    pub fn new(count: u64) -> Self {
        Self { remaining: count }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl TickSource for SyntheticTicks {
    async fn next_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
