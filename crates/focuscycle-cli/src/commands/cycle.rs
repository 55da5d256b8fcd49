//! Preview the session sequence produced by the cycling policy.

use clap::Args;
use focuscycle_core::{format_clock, Config, SessionKind, TimerSettings};

#[derive(Args)]
pub struct CycleArgs {
    /// Number of work sessions to preview
    #[arg(long, default_value = "4")]
    count: u64,
}

/// The break following the nth completed work session (1-indexed).
fn break_after(settings: &TimerSettings, nth_work: u64) -> SessionKind {
    if nth_work % settings.sessions_until_long_break == 0 {
        SessionKind::LongBreak
    } else {
        SessionKind::ShortBreak
    }
}

pub fn run(args: CycleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let settings = config.timer;
    settings.validate()?;

    for n in 1..=args.count {
        println!(
            "{n:>3}. {:<12} {}",
            SessionKind::Work.label(),
            format_clock(settings.duration_secs(SessionKind::Work))
        );
        let brk = break_after(&settings, n);
        println!(
            "     {:<12} {}",
            brk.label(),
            format_clock(settings.duration_secs(brk))
        );
    }
    Ok(())
}
