pub mod config;
pub mod stats;
pub mod timer;

use studytimer_core::{Config, Database, IntervalTimer};
use tracing::warn;

const TIMER_KEY: &str = "interval_timer";

/// Restore the timer kept between invocations, or build a fresh one from config.
pub fn load_timer(db: &Database, config: &Config) -> Result<IntervalTimer, Box<dyn std::error::Error>> {
    if let Some(json) = db.kv_get(TIMER_KEY)? {
        match serde_json::from_str::<IntervalTimer>(&json) {
            Ok(timer) => return Ok(timer),
            Err(e) => warn!(error = %e, "discarding unreadable saved timer"),
        }
    }
    Ok(IntervalTimer::new(config.timer_config()?))
}

pub fn save_timer(db: &Database, timer: &IntervalTimer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    db.kv_set(TIMER_KEY, &json)?;
    Ok(())
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
