use serde::{Deserialize, Serialize};

use crate::error::TimerError;

pub const SHORT_BREAK_MIN: u64 = 5;
pub const LONG_BREAK_MIN: u64 = 15;

/// Quick-start durations offered next to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "preset", content = "minutes")]
pub enum Preset {
    /// The configured study length.
    Pomodoro,
    ShortBreak,
    LongBreak,
    Custom(u64),
}

/// Minute values the presets resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetMinutes {
    pub pomodoro: u64,
    pub short_break: u64,
    pub long_break: u64,
}

impl Default for PresetMinutes {
    fn default() -> Self {
        Self {
            pomodoro: 25,
            short_break: SHORT_BREAK_MIN,
            long_break: LONG_BREAK_MIN,
        }
    }
}

impl Preset {
    pub fn minutes(&self, table: &PresetMinutes) -> u64 {
        match self {
            Preset::Pomodoro => table.pomodoro,
            Preset::ShortBreak => table.short_break,
            Preset::LongBreak => table.long_break,
            Preset::Custom(m) => *m,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preset::Pomodoro => "Pomodoro",
            Preset::ShortBreak => "Short Break",
            Preset::LongBreak => "Long Break",
            Preset::Custom(_) => "Custom",
        }
    }

    /// Parse a preset name. `custom` needs `minutes`.
    pub fn parse(name: &str, minutes: Option<u64>) -> Result<Self, TimerError> {
        match (name, minutes) {
            ("pomodoro", _) => Ok(Preset::Pomodoro),
            ("short-break" | "short_break", _) => Ok(Preset::ShortBreak),
            ("long-break" | "long_break", _) => Ok(Preset::LongBreak),
            ("custom", Some(m)) => Ok(Preset::Custom(m)),
            ("custom", None) => Err(TimerError::invalid_config(
                "minutes",
                "custom preset needs a minute value",
            )),
            (other, _) => Err(TimerError::invalid_config(
                "preset",
                format!("unknown preset '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_against_table() {
        let table = PresetMinutes {
            pomodoro: 50,
            ..PresetMinutes::default()
        };
        assert_eq!(Preset::Pomodoro.minutes(&table), 50);
        assert_eq!(Preset::ShortBreak.minutes(&table), 5);
        assert_eq!(Preset::LongBreak.minutes(&table), 15);
        assert_eq!(Preset::Custom(40).minutes(&table), 40);
    }

    #[test]
    fn parse_names() {
        assert_eq!(Preset::parse("long-break", None).unwrap(), Preset::LongBreak);
        assert_eq!(Preset::parse("custom", Some(12)).unwrap(), Preset::Custom(12));
        assert!(Preset::parse("custom", None).is_err());
        assert!(Preset::parse("nap", None).is_err());
    }
}
