//! Property tests for the interval timer.
//!
//! Arbitrary command sequences are applied to timers with arbitrary valid
//! configurations, and the state-machine invariants are checked after each
//! step.

use proptest::prelude::*;
use studytimer_core::{Event, IntervalTimer, TimerConfig, TimerError, TimerMode};

#[derive(Debug, Clone)]
enum Op {
    Start,
    Pause,
    Tick,
    Skip,
    Reset,
    Reconfigure(TimerConfig),
    Preset(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Start),
        1 => Just(Op::Pause),
        8 => Just(Op::Tick),
        1 => Just(Op::Skip),
        1 => Just(Op::Reset),
        1 => config_strategy().prop_map(Op::Reconfigure),
        1 => (0u64..5).prop_map(Op::Preset),
    ]
}

fn config_strategy() -> impl Strategy<Value = TimerConfig> {
    (1u64..20, 1u64..20).prop_map(|(s, b)| TimerConfig::new(s, b).unwrap())
}

fn apply(timer: &mut IntervalTimer, op: &Op) -> Option<Event> {
    match op {
        Op::Start => timer.start(),
        Op::Pause => timer.pause(),
        Op::Tick => timer.tick(),
        Op::Skip => timer.skip(),
        Op::Reset => timer.reset(),
        Op::Reconfigure(config) => timer.reconfigure(*config),
        Op::Preset(m) => timer.set_preset(*m).ok(),
    }
}

proptest! {
    #[test]
    fn create_yields_initial_state(study in 1u64..100_000, brk in 1u64..100_000) {
        let timer = IntervalTimer::create(study, brk).unwrap();
        let state = timer.state();
        prop_assert_eq!(state.remaining_secs, study);
        prop_assert_eq!(state.mode, TimerMode::Study);
        prop_assert!(!state.running);
        prop_assert_eq!(state.completed_sessions, 0);
    }

    #[test]
    fn zero_durations_never_create(other in 0u64..1000) {
        prop_assert!(
            matches!(IntervalTimer::create(0, other), Err(TimerError::InvalidConfig { .. })),
            "zero study duration must be rejected"
        );
        prop_assert!(
            matches!(IntervalTimer::create(other, 0), Err(TimerError::InvalidConfig { .. })),
            "zero break duration must be rejected"
        );
    }

    #[test]
    fn invariants_hold_for_any_command_sequence(
        config in config_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut timer = IntervalTimer::new(config);
        for op in &ops {
            let before = timer.clone();
            let event = apply(&mut timer, op);
            let (b, a) = (before.state(), timer.state());

            match op {
                Op::Tick if !b.running => {
                    prop_assert_eq!(&timer, &before);
                    prop_assert!(event.is_none());
                }
                Op::Tick if b.remaining_secs > 1 => {
                    prop_assert_eq!(a.remaining_secs, b.remaining_secs - 1);
                    prop_assert_eq!(a.mode, b.mode);
                    prop_assert!(a.running);
                    prop_assert_eq!(a.completed_sessions, b.completed_sessions);
                }
                Op::Tick => {
                    prop_assert_eq!(a.mode, b.mode.opposite());
                    prop_assert!(!a.running);
                    prop_assert_eq!(a.remaining_secs, timer.config().duration_secs(a.mode));
                    let expected = match b.mode {
                        TimerMode::Study => b.completed_sessions + 1,
                        TimerMode::Break => b.completed_sessions,
                    };
                    prop_assert_eq!(a.completed_sessions, expected);
                    prop_assert_eq!(event.and_then(|e| e.completed_mode()), Some(b.mode));
                }
                Op::Skip => {
                    prop_assert_eq!(a.mode, b.mode.opposite());
                    prop_assert!(!a.running);
                    prop_assert_eq!(a.completed_sessions, b.completed_sessions);
                }
                Op::Reset => {
                    prop_assert_eq!(a.mode, TimerMode::Study);
                    prop_assert_eq!(a.remaining_secs, timer.config().study_duration_secs());
                    prop_assert!(!a.running);
                    prop_assert_eq!(a.completed_sessions, 0);
                }
                Op::Reconfigure(new) => {
                    prop_assert_eq!(timer.config(), new);
                    prop_assert_eq!(a.mode, TimerMode::Study);
                    prop_assert_eq!(a.remaining_secs, new.study_duration_secs());
                    prop_assert!(!a.running);
                    prop_assert_eq!(a.completed_sessions, 0);
                    let is_reset = matches!(event, Some(Event::TimerReset { .. }));
                    prop_assert!(is_reset);
                }
                Op::Preset(_) if b.running => {
                    prop_assert_eq!(&timer, &before);
                }
                Op::Start | Op::Pause | Op::Preset(_) => {
                    prop_assert_eq!(a.completed_sessions, b.completed_sessions);
                    prop_assert_eq!(a.mode, b.mode);
                }
            }
        }
    }

    #[test]
    fn start_never_decrements(config in config_strategy(), starts in 1usize..5) {
        let mut timer = IntervalTimer::new(config);
        for _ in 0..starts {
            timer.start();
        }
        prop_assert_eq!(timer.remaining_secs(), config.study_duration_secs());
        prop_assert!(timer.is_running());
    }
}
