//! Desktop notification side-channel.

use focuscycle_core::{CompletedSession, Notifier, SessionKind};
use notify_rust::Notification;

/// Sends a desktop notification for each completed session.
///
/// Failures are logged and swallowed; the state machine never sees them.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn session_completed(&self, session: &CompletedSession, next: SessionKind) {
        let summary = format!("{} finished", session.kind.label());
        let body = format!("Up next: {}", next.label());
        if let Err(e) = Notification::new()
            .summary(&summary)
            .body(&body)
            .appname("focuscycle")
            .show()
        {
            tracing::warn!(error = %e, "desktop notification failed");
        }
    }
}
