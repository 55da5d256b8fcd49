//! Notification capability.
//!
//! The controller announces each completed session through a `Notifier`.
//! Delivery is best-effort: implementations handle their own failures
//! (logging at most) and must never block or return an error into the
//! state machine.

use crate::session::{CompletedSession, SessionKind};

/// Side-channel invoked when a session completes.
pub trait Notifier: Send + Sync {
    /// Called once per completed session, after the log and counters
    /// have been updated. `next` is the kind the controller moved to.
    fn session_completed(&self, session: &CompletedSession, next: SessionKind);
}

/// Default notifier: does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn session_completed(&self, session: &CompletedSession, next: SessionKind) {
        tracing::debug!(
            kind = session.kind.label(),
            next = next.label(),
            "session completed (no notifier configured)"
        );
    }
}
