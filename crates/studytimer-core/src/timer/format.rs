//! Rendering helpers for hosts that display the timer.

use serde::{Deserialize, Serialize};

use super::engine::IntervalTimer;

/// `mm:ss`, zero-padded. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `"{h}h {m}m"`, seconds truncated.
pub fn format_hours_minutes(secs: u64) -> String {
    let minutes = secs / 60;
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Progress of the current hosting session, derived from the session count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub sessions: u32,
    pub study_secs: u64,
    pub break_secs: u64,
}

impl ProgressSummary {
    pub fn from_timer(timer: &IntervalTimer) -> Self {
        let sessions = timer.completed_sessions();
        let config = timer.config();
        Self {
            sessions,
            study_secs: config.study_duration_secs().saturating_mul(sessions as u64),
            break_secs: config.break_duration_secs().saturating_mul(sessions as u64),
        }
    }

    pub fn study_time(&self) -> String {
        format_hours_minutes(self.study_secs)
    }

    pub fn break_time(&self) -> String {
        format_hours_minutes(self.break_secs)
    }
}

/// One-line status such as `Study Session 24:59 (session 1)`.
pub fn status_line(timer: &IntervalTimer) -> String {
    let state = timer.state();
    let suffix = if state.running { "" } else { " [paused]" };
    format!(
        "{} {} (session {}){}",
        state.mode.label(),
        format_clock(state.remaining_secs),
        state.completed_sessions.saturating_add(1),
        suffix
    )
}
