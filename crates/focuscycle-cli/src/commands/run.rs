//! The foreground countdown loop.
//!
//! A tokio interval drives `tick()` at 1 Hz. The interval handle lives
//! inside this loop only; when the loop pauses or exits, the interval is
//! dropped with it, so no ambient timer survives a boundary or Ctrl-C.

use std::time::Duration;

use clap::Args;
use focuscycle_core::{
    Config, Event, NoopNotifier, Notifier, SessionController, TimerSettings,
};

use crate::notifier::DesktopNotifier;

#[derive(Args)]
pub struct RunArgs {
    /// Work session length in minutes
    #[arg(long)]
    work: Option<u64>,
    /// Short break length in minutes
    #[arg(long)]
    short_break: Option<u64>,
    /// Long break length in minutes
    #[arg(long)]
    long_break: Option<u64>,
    /// Work sessions between long breaks
    #[arg(long)]
    cadence: Option<u64>,
    /// Start the next session automatically at each boundary
    #[arg(long)]
    auto: bool,
    /// Stop after this many completed work sessions
    #[arg(long)]
    sessions: Option<u64>,
}

impl RunArgs {
    /// Effective settings: config file values with flag overrides.
    fn settings(&self, config: &Config) -> TimerSettings {
        let mut s = config.timer;
        if let Some(v) = self.work {
            s.work_minutes = v;
        }
        if let Some(v) = self.short_break {
            s.short_break_minutes = v;
        }
        if let Some(v) = self.long_break {
            s.long_break_minutes = v;
        }
        if let Some(v) = self.cadence {
            s.sessions_until_long_break = v;
        }
        s
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let settings = args.settings(&config);
    let notifier: Box<dyn Notifier> = if config.notifications.enabled {
        Box::new(DesktopNotifier)
    } else {
        Box::new(NoopNotifier)
    };
    let controller = SessionController::new(settings)?.with_notifier(notifier);
    let auto_advance = args.auto || config.auto_advance;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_loop(controller, auto_advance, args.sessions))
}

async fn run_loop(
    mut controller: SessionController,
    auto_advance: bool,
    max_work_sessions: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(event) = controller.start() {
        print_event(&event)?;
    }

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // The first interval tick completes immediately; consume it so the
    // countdown starts a full second after start().
    interval.tick().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                controller.pause();
                eprintln!();
                print_event(&controller.snapshot())?;
                break;
            }
            _ = interval.tick() => {
                if let Some(event) = controller.tick() {
                    eprintln!();
                    print_event(&event)?;

                    if let Some(max) = max_work_sessions {
                        if controller.completed_work_sessions() >= max
                            && controller.kind().is_break()
                        {
                            break;
                        }
                    }

                    if !auto_advance {
                        wait_for_enter(&controller).await?;
                    }
                    if let Some(event) = controller.start() {
                        print_event(&event)?;
                    }
                    // Re-align the cadence after the boundary.
                    interval.reset();
                } else {
                    eprint!(
                        "\r{:<12} {}  ",
                        controller.kind().label(),
                        controller.clock()
                    );
                }
            }
        }
    }

    print_summary(&controller)
}

/// Pause-at-boundary: block until the user confirms the next session.
async fn wait_for_enter(
    controller: &SessionController,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!(
        "next: {} ({}) -- press Enter to start",
        controller.kind().label(),
        controller.clock()
    );
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| ())
    })
    .await??;
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

fn print_summary(controller: &SessionController) -> Result<(), Box<dyn std::error::Error>> {
    let completed: Vec<_> = controller.log().iter().collect();
    eprintln!(
        "completed work sessions: {}",
        controller.completed_work_sessions()
    );
    if !completed.is_empty() {
        println!("{}", serde_json::to_string_pretty(&completed)?);
    }
    Ok(())
}
