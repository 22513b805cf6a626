//! Interval timer implementation.
//!
//! The timer is a tick-driven state machine. It owns no thread and reads no
//! clock for its countdown: every honored `tick()` subtracts exactly one
//! second, and the caller is responsible for delivering ticks.
//!
//! ## State Transitions
//!
//! ```text
//! Idle-Study --start--> Running-Study --tick to 0--> Idle-Break (sessions + 1)
//! Idle-Break --start--> Running-Break --tick to 0--> Idle-Study
//! any --skip--> Idle, opposite mode
//! any --reset--> Idle-Study, sessions = 0
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = IntervalTimer::new(TimerConfig::POMODORO);
//! timer.start();
//! // Once per second:
//! if let Some(Event::CycleCompleted { .. }) = timer.tick() {
//!     // prompt the user to continue or reset
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::{minutes_to_secs, TimerConfig, TimerMode};
use crate::error::TimerError;
use crate::events::Event;

/// Observable state of an [`IntervalTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_secs: u64,
    pub mode: TimerMode,
    pub running: bool,
    pub completed_sessions: u32,
}

impl TimerState {
    fn initial(config: &TimerConfig) -> Self {
        Self {
            remaining_secs: config.study_duration_secs(),
            mode: TimerMode::Study,
            running: false,
            completed_sessions: 0,
        }
    }
}

/// Pomodoro-style study/break timer.
///
/// Deserialization repairs a snapshot that no command sequence can produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawIntervalTimer")]
pub struct IntervalTimer {
    config: TimerConfig,
    state: TimerState,
}

#[derive(Deserialize)]
struct RawIntervalTimer {
    config: TimerConfig,
    state: TimerState,
}

impl From<RawIntervalTimer> for IntervalTimer {
    fn from(raw: RawIntervalTimer) -> Self {
        let RawIntervalTimer { config, mut state } = raw;
        let phase_secs = config.duration_secs(state.mode);
        if state.remaining_secs == 0 {
            // A phase never rests at zero; completion already switched modes.
            warn!(mode = ?state.mode, phase_secs, "restored timer had no time left; refilling phase");
            state.remaining_secs = phase_secs;
            state.running = false;
        } else if state.remaining_secs > phase_secs {
            // Legal after set_duration shortened a partly elapsed phase.
            warn!(
                mode = ?state.mode,
                remaining = state.remaining_secs,
                phase_secs,
                "restored timer has more time left than its phase length"
            );
        }
        Self { config, state }
    }
}

impl IntervalTimer {
    /// Create an idle timer in Study mode with the full study duration.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            state: TimerState::initial(&config),
            config,
        }
    }

    /// Validate the durations and create a timer.
    ///
    /// Fails with [`TimerError::InvalidConfig`] if either duration is zero;
    /// no timer is produced in that case.
    pub fn create(study_duration_secs: u64, break_duration_secs: u64) -> Result<Self, TimerError> {
        let config = TimerConfig::new(study_duration_secs, break_duration_secs)?;
        Ok(Self::new(config))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    pub fn completed_sessions(&self) -> u32 {
        self.state.completed_sessions
    }

    /// Full length of the current phase.
    pub fn phase_duration_secs(&self) -> u64 {
        self.config.duration_secs(self.state.mode)
    }

    /// 0.0 .. 100.0 progress within the current phase.
    ///
    /// A preset longer than the configured phase reads as 0.
    pub fn progress_pct(&self) -> f64 {
        let total = self.phase_duration_secs();
        if total == 0 || self.state.remaining_secs >= total {
            return 0.0;
        }
        (total - self.state.remaining_secs) as f64 / total as f64 * 100.0
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.state.mode,
            running: self.state.running,
            remaining_secs: self.state.remaining_secs,
            total_secs: self.phase_duration_secs(),
            completed_sessions: self.state.completed_sessions,
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. Returns `None` if already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            return None;
        }
        self.state.running = true;
        debug!(mode = ?self.state.mode, remaining = self.state.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Freeze the countdown. Returns `None` if already paused.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        debug!(mode = ?self.state.mode, remaining = self.state.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance by one second.
    ///
    /// Ignored while paused. When the phase reaches zero the timer stops,
    /// switches to the other mode with its full duration and returns
    /// `Event::CycleCompleted`; the caller must `start()` again.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }

        if self.state.remaining_secs > 1 {
            self.state.remaining_secs -= 1;
            return Some(Event::Ticked {
                mode: self.state.mode,
                remaining_secs: self.state.remaining_secs,
            });
        }

        let previous_mode = self.state.mode;
        let duration_secs = self.phase_duration_secs();
        if previous_mode == TimerMode::Study {
            self.state.completed_sessions = self.state.completed_sessions.saturating_add(1);
        }
        self.enter(previous_mode.opposite());
        info!(
            previous = ?previous_mode,
            sessions = self.state.completed_sessions,
            "cycle completed"
        );
        Some(Event::CycleCompleted {
            previous_mode,
            next_mode: self.state.mode,
            duration_secs,
            completed_sessions: self.state.completed_sessions,
            at: Utc::now(),
        })
    }

    /// Return to the initial idle Study state, discarding the session count.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::initial(&self.config);
        debug!("timer reset");
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Replace the configuration and reset.
    pub fn reconfigure(&mut self, config: TimerConfig) -> Option<Event> {
        self.config = config;
        self.reset()
    }

    /// Jump to the other mode with its full duration.
    ///
    /// A skipped phase never counts as a completed session.
    pub fn skip(&mut self) -> Option<Event> {
        let from = self.state.mode;
        self.enter(from.opposite());
        debug!(from = ?from, to = ?self.state.mode, "phase skipped");
        Some(Event::TimerSkipped {
            from,
            to: self.state.mode,
            at: Utc::now(),
        })
    }

    /// Set the current mode's countdown to `minutes` and keep that length
    /// for future cycles of this mode.
    ///
    /// Only allowed while paused; on error nothing changes.
    pub fn set_preset(&mut self, minutes: u64) -> Result<Event, TimerError> {
        if self.state.running {
            warn!(minutes, "preset rejected while running");
            return Err(TimerError::InvalidState {
                operation: "apply preset",
                reason: "timer is running; pause it first",
            });
        }
        let secs = minutes_to_secs("minutes", minutes)?;
        let mode = self.state.mode;
        self.config = self.config.with_duration(mode, secs)?;
        self.state.remaining_secs = secs;
        debug!(mode = ?mode, secs, "preset applied");
        Ok(Event::PresetApplied {
            mode,
            duration_secs: secs,
            at: Utc::now(),
        })
    }

    /// Change the configured length of `mode`.
    ///
    /// The running or partially elapsed phase keeps its remaining time. Only an
    /// idle, untouched phase of the same mode picks up the new length.
    pub fn set_duration(&mut self, mode: TimerMode, secs: u64) -> Result<(), TimerError> {
        let previous = self.config.duration_secs(mode);
        self.config = self.config.with_duration(mode, secs)?;
        let untouched = !self.state.running
            && self.state.mode == mode
            && self.state.remaining_secs == previous;
        if untouched {
            self.state.remaining_secs = secs;
        }
        debug!(mode = ?mode, secs, applied_now = untouched, "duration changed");
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter(&mut self, mode: TimerMode) {
        self.state.mode = mode;
        self.state.running = false;
        self.state.remaining_secs = self.config.duration_secs(mode);
    }
}
