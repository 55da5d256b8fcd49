//! Session controller implementation.
//!
//! The controller is a tick-driven state machine. It owns no timer of its
//! own -- the caller invokes `tick()` once per elapsed second while the
//! controller is running.
//!
//! ## Cycle policy
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work -> LongBreak -> Work -> ...
//! ```
//!
//! Every Nth completed work session (N = `sessions_until_long_break`) is
//! followed by a long break; every other break is short; every break is
//! followed by work. The controller pauses at each boundary rather than
//! auto-continuing.

use std::fmt;

use chrono::Utc;

use crate::error::ValidationError;
use crate::events::Event;
use crate::notify::{NoopNotifier, Notifier};
use crate::session::{CompletedSession, SessionKind, SessionLog};
use crate::settings::TimerSettings;

/// Core session controller.
///
/// Owns the countdown, the cycle position, and the completed-session log
/// exclusively; the presentation layer only reads state and invokes the
/// commands below.
pub struct SessionController {
    settings: TimerSettings,
    kind: SessionKind,
    /// Remaining time in seconds for the current session.
    remaining_secs: u64,
    running: bool,
    completed_work_sessions: u64,
    log: SessionLog,
    notifier: Box<dyn Notifier>,
}

impl SessionController {
    /// Create a controller with validated settings.
    ///
    /// Starts paused on a fresh work session.
    pub fn new(settings: TimerSettings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(Self {
            settings,
            kind: SessionKind::Work,
            remaining_secs: settings.duration_secs(SessionKind::Work),
            running: false,
            completed_work_sessions: 0,
            log: SessionLog::default(),
            notifier: Box::new(NoopNotifier),
        })
    }

    /// Replace the notification side-channel.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_work_sessions(&self) -> u64 {
        self.completed_work_sessions
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Remaining time formatted as `mm:ss`.
    pub fn clock(&self) -> String {
        format_clock(self.remaining_secs)
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.settings.duration_secs(self.kind);
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::Snapshot {
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            clock: self.clock(),
            running: self.running,
            completed_work_sessions: self.completed_work_sessions,
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or continue) the countdown. No-op while already running.
    ///
    /// A zero countdown is treated as "needs transition": the completion
    /// runs first so a tick loop is never armed on an empty session.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        if self.remaining_secs == 0 {
            self.complete_session();
        }
        self.running = true;
        Some(Event::Started {
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop the countdown. No-op while already paused.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::Paused {
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop the countdown and restore the current kind's full duration.
    ///
    /// The cycle position, the work-session counter, and the log are
    /// untouched.
    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.remaining_secs = self.settings.duration_secs(self.kind);
        Some(Event::Reset {
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Call once per elapsed second while running. Returns
    /// `Some(Event::SessionCompleted)` when the countdown reaches zero;
    /// the controller is then paused at the boundary with the next
    /// session's full duration loaded.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            return None;
        }
        let event = self.complete_session();
        self.running = false;
        Some(event)
    }

    /// Swap in new settings, rejecting invalid values.
    ///
    /// On rejection no state changes. When the timer is idle the cycle
    /// restarts on a fresh work session at the new duration; while
    /// running, the new durations take effect from the next transition.
    pub fn update_settings(&mut self, settings: TimerSettings) -> Result<Event, ValidationError> {
        settings.validate()?;
        self.settings = settings;
        if !self.running {
            self.kind = SessionKind::Work;
            self.remaining_secs = settings.duration_secs(SessionKind::Work);
        }
        Ok(Event::SettingsUpdated {
            settings,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Finalize the current session and select the next kind.
    ///
    /// Log append and counter increment happen in the same step as the
    /// transition. The long-break cadence counts completed work sessions
    /// only: the modulo check runs after the increment, so the Nth work
    /// session triggers the long break.
    fn complete_session(&mut self) -> Event {
        let now = Utc::now();
        let record = CompletedSession {
            kind: self.kind,
            duration_minutes: self.settings.duration_min(self.kind),
            completed_at: now,
        };
        self.log.push(record.clone());

        let next = if self.kind.is_work() {
            self.completed_work_sessions += 1;
            if self.completed_work_sessions % self.settings.sessions_until_long_break == 0 {
                SessionKind::LongBreak
            } else {
                SessionKind::ShortBreak
            }
        } else {
            SessionKind::Work
        };

        tracing::debug!(
            kind = record.kind.label(),
            next = next.label(),
            completed_work_sessions = self.completed_work_sessions,
            "session completed"
        );
        self.notifier.session_completed(&record, next);

        let event = Event::SessionCompleted {
            kind: record.kind,
            next_kind: next,
            duration_minutes: record.duration_minutes,
            completed_work_sessions: self.completed_work_sessions,
            at: now,
        };
        self.kind = next;
        self.remaining_secs = self.settings.duration_secs(next);
        event
    }
}

impl Default for SessionController {
    fn default() -> Self {
        // Default settings always validate.
        Self::new(TimerSettings::default()).expect("default settings are valid")
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("settings", &self.settings)
            .field("kind", &self.kind)
            .field("remaining_secs", &self.remaining_secs)
            .field("running", &self.running)
            .field("completed_work_sessions", &self.completed_work_sessions)
            .field("log_len", &self.log.len())
            .finish()
    }
}

/// Format a second count as `mm:ss`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn controller() -> SessionController {
        SessionController::default()
    }

    /// Run one full session to its boundary. Assumes the controller is
    /// paused with a fresh countdown.
    fn finish_session(c: &mut SessionController) -> Event {
        c.start();
        let mut last = None;
        for _ in 0..c.settings().duration_secs(c.kind()) {
            last = c.tick();
        }
        last.expect("session should complete on its final tick")
    }

    #[test]
    fn fresh_controller_is_paused_work() {
        let c = controller();
        assert_eq!(c.kind(), SessionKind::Work);
        assert_eq!(c.remaining_secs(), 25 * 60);
        assert!(!c.is_running());
        assert_eq!(c.completed_work_sessions(), 0);
        assert!(c.log().is_empty());
    }

    #[test]
    fn start_is_idempotent() {
        let mut c = controller();
        assert!(c.start().is_some());
        assert!(c.start().is_none());
        assert!(c.is_running());
    }

    #[test]
    fn pause_is_idempotent() {
        let mut c = controller();
        c.start();
        assert!(c.pause().is_some());
        let before = (c.kind(), c.remaining_secs(), c.completed_work_sessions());
        assert!(c.pause().is_none());
        assert_eq!(
            before,
            (c.kind(), c.remaining_secs(), c.completed_work_sessions())
        );
    }

    #[test]
    fn tick_while_paused_does_nothing() {
        let mut c = controller();
        assert!(c.tick().is_none());
        assert_eq!(c.remaining_secs(), 25 * 60);
    }

    #[test]
    fn single_tick_decrements_one_second() {
        // Scenario C.
        let mut c = controller();
        let before = c.remaining_secs();
        c.start();
        assert!(c.tick().is_none());
        c.pause();
        assert_eq!(c.remaining_secs(), before - 1);
        assert!(!c.is_running());
    }

    #[test]
    fn reset_restores_full_duration_only() {
        // Scenario D.
        let mut c = controller();
        c.start();
        for _ in 0..(20 * 60) {
            c.tick();
        }
        assert_eq!(c.remaining_secs(), 5 * 60);
        c.reset();
        assert_eq!(c.remaining_secs(), 25 * 60);
        assert!(!c.is_running());
        assert_eq!(c.kind(), SessionKind::Work);
        assert_eq!(c.completed_work_sessions(), 0);
    }

    #[test]
    fn work_completion_pauses_at_short_break() {
        let mut c = controller();
        let event = finish_session(&mut c);
        match event {
            Event::SessionCompleted {
                kind,
                next_kind,
                duration_minutes,
                completed_work_sessions,
                ..
            } => {
                assert_eq!(kind, SessionKind::Work);
                assert_eq!(next_kind, SessionKind::ShortBreak);
                assert_eq!(duration_minutes, 25);
                assert_eq!(completed_work_sessions, 1);
            }
            other => panic!("expected SessionCompleted, got {other:?}"),
        }
        assert!(!c.is_running());
        assert_eq!(c.kind(), SessionKind::ShortBreak);
        assert_eq!(c.remaining_secs(), 5 * 60);
    }

    #[test]
    fn log_and_counter_update_in_same_tick() {
        let mut c = controller();
        finish_session(&mut c);
        assert_eq!(c.completed_work_sessions(), 1);
        assert_eq!(c.log().len(), 1);
        let latest = c.log().latest().unwrap();
        assert_eq!(latest.kind, SessionKind::Work);
        assert_eq!(latest.duration_minutes, 25);
    }

    #[test]
    fn fourth_work_session_earns_long_break() {
        // Scenario A: three short breaks, then a long one.
        let mut c = controller();
        for n in 1..=4u64 {
            let event = finish_session(&mut c);
            let expected = if n == 4 {
                SessionKind::LongBreak
            } else {
                SessionKind::ShortBreak
            };
            match event {
                Event::SessionCompleted { next_kind, .. } => assert_eq!(
                    next_kind, expected,
                    "work session {n} should be followed by {expected:?}"
                ),
                other => panic!("expected SessionCompleted, got {other:?}"),
            }
            // Take the break; breaks always return to work.
            let event = finish_session(&mut c);
            match event {
                Event::SessionCompleted { next_kind, .. } => {
                    assert_eq!(next_kind, SessionKind::Work)
                }
                other => panic!("expected SessionCompleted, got {other:?}"),
            }
        }
        assert_eq!(c.completed_work_sessions(), 4);
        assert_eq!(c.log().len(), 8);
    }

    #[test]
    fn breaks_do_not_advance_the_cadence() {
        let mut c = controller();
        finish_session(&mut c); // work 1 -> short break
        finish_session(&mut c); // short break -> work
        assert_eq!(c.completed_work_sessions(), 1);
        assert_eq!(c.kind(), SessionKind::Work);
    }

    #[test]
    fn start_on_zero_countdown_transitions_first() {
        let mut c = controller();
        c.start();
        // Drain to the final tick, which completes and pauses.
        for _ in 0..(25 * 60) {
            c.tick();
        }
        assert_eq!(c.kind(), SessionKind::ShortBreak);
        // Force the guard path.
        let mut c2 = controller();
        c2.start();
        for _ in 0..(25 * 60 - 1) {
            c2.tick();
        }
        assert_eq!(c2.remaining_secs(), 1);
        // Final tick completes; starting again arms the short break.
        c2.tick();
        let started = c2.start().unwrap();
        match started {
            Event::Started {
                kind,
                remaining_secs,
                ..
            } => {
                assert_eq!(kind, SessionKind::ShortBreak);
                assert_eq!(remaining_secs, 5 * 60);
            }
            other => panic!("expected Started, got {other:?}"),
        }
    }

    #[test]
    fn invalid_settings_rejected_without_state_change() {
        // Scenario B.
        let mut c = controller();
        c.start();
        c.tick();
        let before = (c.kind(), c.remaining_secs(), *c.settings());
        let result = c.update_settings(TimerSettings {
            work_minutes: 0,
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(before, (c.kind(), c.remaining_secs(), *c.settings()));
        assert!(c.is_running());
    }

    #[test]
    fn settings_update_while_idle_restarts_cycle() {
        let mut c = controller();
        finish_session(&mut c);
        assert_eq!(c.kind(), SessionKind::ShortBreak);
        let new = TimerSettings {
            work_minutes: 50,
            ..Default::default()
        };
        c.update_settings(new).unwrap();
        assert_eq!(c.kind(), SessionKind::Work);
        assert_eq!(c.remaining_secs(), 50 * 60);
        // Counter and log survive the restart.
        assert_eq!(c.completed_work_sessions(), 1);
        assert_eq!(c.log().len(), 1);
    }

    #[test]
    fn settings_update_while_running_defers_to_next_transition() {
        let mut c = controller();
        c.start();
        c.tick();
        let remaining = c.remaining_secs();
        c.update_settings(TimerSettings {
            work_minutes: 50,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(c.remaining_secs(), remaining);
        assert!(c.is_running());
    }

    #[test]
    fn notifier_fires_once_per_completion() {
        struct Counting(Arc<AtomicUsize>);
        impl Notifier for Counting {
            fn session_completed(&self, _: &CompletedSession, _: SessionKind) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        let count = Arc::new(AtomicUsize::new(0));
        let mut c = controller().with_notifier(Box::new(Counting(count.clone())));
        finish_session(&mut c);
        finish_session(&mut c);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clock_formats_mm_ss() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(125 * 60 + 9), "125:09");
    }

    #[test]
    fn progress_runs_zero_to_one() {
        let mut c = controller();
        assert_eq!(c.progress(), 0.0);
        c.start();
        for _ in 0..(25 * 60 / 2) {
            c.tick();
        }
        assert!((c.progress() - 0.5).abs() < 1e-9);
    }
}
