//! # Study Timer Core Library
//!
//! Core logic for a Pomodoro-style study timer that alternates Study and
//! Break phases and counts completed study sessions. Hosts (the CLI, or any
//! UI) own a timer, feed it one tick per second and render its state.
//!
//! ## Architecture
//!
//! - **Timer**: A tick-driven state machine. It holds no thread and performs
//!   no I/O; after each phase it stops and waits for an explicit `start()`
//! - **Tick sources**: Injected periodic callers, real (tokio interval) or
//!   synthetic for tests
//! - **Host**: Owns one timer and dispatches its events to observers
//! - **Storage**: SQLite session records and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`IntervalTimer`]: Core timer state machine
//! - [`TimerHost`]: Command forwarding and event dispatch
//! - [`TickSource`]: Trait for tick delivery
//! - [`Database`]: Session and statistics persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod host;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, TimerError};
pub use events::Event;
pub use host::{PhaseOutcome, TimerHost, TimerObserver};
pub use storage::{Config, Database, SessionRecorder, Stats};
pub use ticker::{IntervalTicks, SyntheticTicks, TickSource};
pub use timer::{IntervalTimer, Preset, TimerConfig, TimerMode, TimerState};
