use serde::{Deserialize, Serialize};

use crate::error::TimerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Study,
    Break,
}

impl TimerMode {
    /// The mode that follows this one.
    pub fn opposite(self) -> Self {
        match self {
            TimerMode::Study => TimerMode::Break,
            TimerMode::Break => TimerMode::Study,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Study => "study",
            TimerMode::Break => "break",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Study => "Study Session",
            TimerMode::Break => "Break Time",
        }
    }
}

impl std::str::FromStr for TimerMode {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "study" => Ok(TimerMode::Study),
            "break" => Ok(TimerMode::Break),
            other => Err(TimerError::invalid_config(
                "mode",
                format!("unknown mode '{other}'"),
            )),
        }
    }
}

/// Phase durations for one timer instance.
///
/// Both durations are strictly positive; construction rejects anything else,
/// so a `TimerConfig` value is always usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimerConfig")]
pub struct TimerConfig {
    study_duration_secs: u64,
    break_duration_secs: u64,
}

#[derive(Deserialize)]
struct RawTimerConfig {
    study_duration_secs: u64,
    break_duration_secs: u64,
}

impl TryFrom<RawTimerConfig> for TimerConfig {
    type Error = TimerError;

    fn try_from(raw: RawTimerConfig) -> Result<Self, Self::Error> {
        TimerConfig::new(raw.study_duration_secs, raw.break_duration_secs)
    }
}

impl TimerConfig {
    /// 25 minute study, 5 minute break.
    pub const POMODORO: TimerConfig = TimerConfig {
        study_duration_secs: 25 * 60,
        break_duration_secs: 5 * 60,
    };

    pub fn new(study_duration_secs: u64, break_duration_secs: u64) -> Result<Self, TimerError> {
        validate_secs("study_duration_secs", study_duration_secs)?;
        validate_secs("break_duration_secs", break_duration_secs)?;
        Ok(Self {
            study_duration_secs,
            break_duration_secs,
        })
    }

    pub fn from_minutes(study_min: u64, break_min: u64) -> Result<Self, TimerError> {
        Self::new(
            minutes_to_secs("study_minutes", study_min)?,
            minutes_to_secs("break_minutes", break_min)?,
        )
    }

    pub fn study_duration_secs(&self) -> u64 {
        self.study_duration_secs
    }

    pub fn break_duration_secs(&self) -> u64 {
        self.break_duration_secs
    }

    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Study => self.study_duration_secs,
            TimerMode::Break => self.break_duration_secs,
        }
    }

    /// Copy of this config with `mode`'s duration replaced.
    pub fn with_duration(self, mode: TimerMode, secs: u64) -> Result<Self, TimerError> {
        match mode {
            TimerMode::Study => Self::new(secs, self.break_duration_secs),
            TimerMode::Break => Self::new(self.study_duration_secs, secs),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::POMODORO
    }
}

fn validate_secs(field: &str, secs: u64) -> Result<(), TimerError> {
    if secs == 0 {
        return Err(TimerError::invalid_config(field, "must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn minutes_to_secs(field: &str, minutes: u64) -> Result<u64, TimerError> {
    if minutes == 0 {
        return Err(TimerError::invalid_config(field, "must be greater than zero"));
    }
    minutes
        .checked_mul(60)
        .ok_or_else(|| TimerError::invalid_config(field, format!("{minutes} minutes is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_durations() {
        assert!(matches!(
            TimerConfig::new(0, 300),
            Err(TimerError::InvalidConfig { ref field, .. }) if field == "study_duration_secs"
        ));
        assert!(matches!(
            TimerConfig::new(1500, 0),
            Err(TimerError::InvalidConfig { ref field, .. }) if field == "break_duration_secs"
        ));
    }

    #[test]
    fn from_minutes_converts_and_checks_overflow() {
        let cfg = TimerConfig::from_minutes(25, 5).unwrap();
        assert_eq!(cfg, TimerConfig::POMODORO);
        assert!(TimerConfig::from_minutes(u64::MAX, 5).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: TimerConfig =
            serde_json::from_str(r#"{"study_duration_secs":60,"break_duration_secs":30}"#).unwrap();
        assert_eq!(ok.duration_secs(TimerMode::Break), 30);

        let bad = serde_json::from_str::<TimerConfig>(
            r#"{"study_duration_secs":0,"break_duration_secs":30}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn mode_alternates() {
        assert_eq!(TimerMode::Study.opposite(), TimerMode::Break);
        assert_eq!(TimerMode::Break.opposite().opposite(), TimerMode::Break);
        assert_eq!("break".parse::<TimerMode>().unwrap(), TimerMode::Break);
        assert!("nap".parse::<TimerMode>().is_err());
    }
}
