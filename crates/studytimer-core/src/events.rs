use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

/// Every state change of the timer produces an Event.
/// Hosts render them; observers such as the session store subscribe to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// One honored tick that did not finish the phase.
    Ticked {
        mode: TimerMode,
        remaining_secs: u64,
    },
    /// A phase counted down to zero. The timer is now idle in `next_mode`.
    CycleCompleted {
        previous_mode: TimerMode,
        next_mode: TimerMode,
        /// Full length of the phase that just finished.
        duration_secs: u64,
        completed_sessions: u32,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    PresetApplied {
        mode: TimerMode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        running: bool,
        remaining_secs: u64,
        total_secs: u64,
        completed_sessions: u32,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// `Some(previous_mode)` for a completion event.
    pub fn completed_mode(&self) -> Option<TimerMode> {
        match self {
            Event::CycleCompleted { previous_mode, .. } => Some(*previous_mode),
            _ => None,
        }
    }
}
