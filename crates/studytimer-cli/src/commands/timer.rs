use clap::Subcommand;
use studytimer_core::timer::{format_clock, status_line, ProgressSummary};
use studytimer_core::{
    Config, Database, Event, IntervalTicks, PhaseOutcome, Preset, SessionRecorder, SyntheticTicks,
    TimerHost, TimerMode,
};
use tracing::info;

use super::{load_timer, print_json, save_timer};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state
    Status {
        /// Print a single human-readable line instead of JSON
        #[arg(long)]
        plain: bool,
    },
    /// Start or continue the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Deliver ticks without waiting (one second each)
    Tick {
        #[arg(long, default_value = "1")]
        count: u64,
    },
    /// Switch to the other mode without counting a session
    Skip,
    /// Back to an idle study phase, session count zeroed
    Reset,
    /// Apply a quick-start preset to the current mode (timer must be paused)
    Preset {
        /// pomodoro, short-break, long-break or custom
        name: String,
        /// Minutes for the custom preset
        #[arg(long)]
        minutes: Option<u64>,
    },
    /// Sessions, study time and break time since the last reset
    Progress,
    /// Run the current phase in the foreground until it completes (Ctrl-C pauses)
    Run,
}

#[derive(serde::Serialize)]
struct ProgressView {
    #[serde(flatten)]
    summary: ProgressSummary,
    study_time: String,
    break_time: String,
}

pub async fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let timer = load_timer(&db, &config)?;

    let mut host = TimerHost::new(timer);
    host.subscribe(SessionRecorder::new(&db));

    match action {
        TimerAction::Status { plain } => {
            if plain {
                println!("{}", status_line(host.timer()));
            } else {
                print_json(&host.timer().snapshot())?;
            }
        }
        TimerAction::Start => {
            let event = host.start();
            print_or_snapshot(&host, event)?;
        }
        TimerAction::Pause => {
            let event = host.pause();
            print_or_snapshot(&host, event)?;
        }
        TimerAction::Tick { count } => {
            let outcome = host.run_phase(&mut SyntheticTicks::new(count)).await;
            report_outcome(&host, outcome)?;
        }
        TimerAction::Skip => {
            let event = host.skip();
            print_or_snapshot(&host, event)?;
        }
        TimerAction::Reset => {
            let event = host.reset();
            print_or_snapshot(&host, event)?;
        }
        TimerAction::Preset { name, minutes } => {
            let minutes = match name.as_str() {
                "custom" => minutes.or(Some(config.timer.custom_minutes)),
                _ => minutes,
            };
            let preset = Preset::parse(&name, minutes)?;
            let event = host.apply_preset(preset, &config.preset_minutes())?;
            print_json(&event)?;
        }
        TimerAction::Progress => {
            let summary = ProgressSummary::from_timer(host.timer());
            print_json(&ProgressView {
                study_time: summary.study_time(),
                break_time: summary.break_time(),
                summary,
            })?;
        }
        TimerAction::Run => {
            host.subscribe(|e: &Event| {
                if let Event::Ticked {
                    mode,
                    remaining_secs,
                } = e
                {
                    eprint!("\r{} {}  ", mode.label(), format_clock(*remaining_secs));
                }
            });
            host.start();

            let mut ticks = IntervalTicks::every_second();
            let outcome = tokio::select! {
                outcome = host.run_phase(&mut ticks) => Some(outcome),
                _ = tokio::signal::ctrl_c() => None,
            };
            eprintln!();
            match outcome {
                Some(outcome) => report_outcome(&host, outcome)?,
                None => {
                    info!("interrupted, pausing timer");
                    let event = host.pause();
                    print_or_snapshot(&host, event)?;
                }
            }
        }
    }

    let timer = host.into_timer();
    save_timer(&db, &timer)?;
    Ok(())
}

fn print_or_snapshot(host: &TimerHost<'_>, event: Option<Event>) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => print_json(&event),
        None => print_json(&host.timer().snapshot()),
    }
}

fn report_outcome(host: &TimerHost<'_>, outcome: PhaseOutcome) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        PhaseOutcome::Completed(event) => {
            print_json(&event)?;
            let prompt = match event.completed_mode() {
                Some(TimerMode::Study) => "Great work! Time for a break.",
                _ => "Break time is over. Ready to study?",
            };
            eprintln!("{prompt} Run `studytimer timer start` to continue or `studytimer timer reset`.");
            Ok(())
        }
        PhaseOutcome::Paused | PhaseOutcome::TicksExhausted => print_json(&host.timer().snapshot()),
    }
}
