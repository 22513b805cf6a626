use clap::Subcommand;
use studytimer_core::{Config, Database, TimerMode};

use super::{load_timer, save_timer};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "timer.study_minutes", "log.level")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

/// Timer mode whose length a config key controls.
fn duration_key_mode(key: &str) -> Option<TimerMode> {
    match key {
        "timer.study_minutes" => Some(TimerMode::Study),
        "timer.break_minutes" => Some(TimerMode::Break),
        _ => None,
    }
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;

            // Keep the saved timer in step; a phase already underway keeps its time.
            if let Some(mode) = duration_key_mode(&key) {
                let db = Database::open()?;
                let mut timer = load_timer(&db, &config)?;
                let secs = config.timer_config()?.duration_secs(mode);
                timer.set_duration(mode, secs)?;
                save_timer(&db, &timer)?;
            }
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;

            // The saved timer restarts on the default lengths.
            let db = Database::open()?;
            let mut timer = load_timer(&db, &config)?;
            timer.reconfigure(config.timer_config()?);
            save_timer(&db, &timer)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
