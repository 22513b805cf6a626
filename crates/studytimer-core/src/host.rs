//! Event dispatch around a single timer.
//!
//! [`TimerHost`] is the exclusive owner of an [`IntervalTimer`]. Every command
//! goes through it, and the event the timer returns is handed to each
//! subscribed [`TimerObserver`] before the command returns.

use tracing::{debug, warn};

use crate::error::TimerError;
use crate::events::Event;
use crate::ticker::TickSource;
use crate::timer::{IntervalTimer, Preset, PresetMinutes, TimerConfig};

/// Receives timer events synchronously.
pub trait TimerObserver {
    fn on_event(&mut self, event: &Event);
}

impl<F> TimerObserver for F
where
    F: FnMut(&Event),
{
    fn on_event(&mut self, event: &Event) {
        self(event)
    }
}

/// Why [`TimerHost::run_phase`] returned.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseOutcome {
    /// The phase counted down to zero.
    Completed(Event),
    /// The timer was not running.
    Paused,
    /// The tick source ran out before the phase finished.
    TicksExhausted,
}

pub struct TimerHost<'a> {
    timer: IntervalTimer,
    observers: Vec<Box<dyn TimerObserver + 'a>>,
}

impl<'a> TimerHost<'a> {
    pub fn new(timer: IntervalTimer) -> Self {
        Self {
            timer,
            observers: Vec::new(),
        }
    }

    pub fn with_config(config: TimerConfig) -> Self {
        Self::new(IntervalTimer::new(config))
    }

    pub fn subscribe(&mut self, observer: impl TimerObserver + 'a) {
        self.observers.push(Box::new(observer));
    }

    pub fn timer(&self) -> &IntervalTimer {
        &self.timer
    }

    pub fn into_timer(self) -> IntervalTimer {
        self.timer
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.timer.start();
        self.dispatch(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.timer.pause();
        self.dispatch(event)
    }

    pub fn tick(&mut self) -> Option<Event> {
        let event = self.timer.tick();
        self.dispatch(event)
    }

    pub fn skip(&mut self) -> Option<Event> {
        let event = self.timer.skip();
        self.dispatch(event)
    }

    pub fn reset(&mut self) -> Option<Event> {
        let event = self.timer.reset();
        self.dispatch(event)
    }

    pub fn reconfigure(&mut self, config: TimerConfig) -> Option<Event> {
        let event = self.timer.reconfigure(config);
        self.dispatch(event)
    }

    pub fn set_preset(&mut self, minutes: u64) -> Result<Event, TimerError> {
        match self.timer.set_preset(minutes) {
            Ok(event) => {
                for observer in self.observers.iter_mut() {
                    observer.on_event(&event);
                }
                Ok(event)
            }
            Err(e) => {
                warn!(error = %e, "preset not applied");
                Err(e)
            }
        }
    }

    pub fn apply_preset(&mut self, preset: Preset, table: &PresetMinutes) -> Result<Event, TimerError> {
        self.set_preset(preset.minutes(table))
    }

    /// Feed ticks from `source` until the current phase ends.
    ///
    /// Returns immediately with [`PhaseOutcome::Paused`] if the timer is not
    /// running.
    pub async fn run_phase<S: TickSource>(&mut self, source: &mut S) -> PhaseOutcome {
        while self.timer.is_running() {
            if !source.next_tick().await {
                debug!(remaining = self.timer.remaining_secs(), "tick source exhausted");
                return PhaseOutcome::TicksExhausted;
            }
            if let Some(event) = self.tick() {
                if event.completed_mode().is_some() {
                    return PhaseOutcome::Completed(event);
                }
            }
        }
        PhaseOutcome::Paused
    }

    fn dispatch(&mut self, event: Option<Event>) -> Option<Event> {
        if let Some(ref e) = event {
            for observer in self.observers.iter_mut() {
                observer.on_event(e);
            }
        }
        event
    }
}
