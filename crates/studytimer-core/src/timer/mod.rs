mod config;
mod engine;
mod format;
mod preset;

pub use config::{TimerConfig, TimerMode};
pub use engine::{IntervalTimer, TimerState};
pub use format::{format_clock, format_hours_minutes, status_line, ProgressSummary};
pub use preset::{Preset, PresetMinutes, LONG_BREAK_MIN, SHORT_BREAK_MIN};
