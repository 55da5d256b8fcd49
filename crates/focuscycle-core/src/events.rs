use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionKind;
use crate::settings::TimerSettings;

/// Every state change in the controller produces an Event.
/// The presentation layer polls for events or prints them directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Started {
        kind: SessionKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Paused {
        kind: SessionKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Reset {
        kind: SessionKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero: the session was logged and the next
    /// kind selected. The controller is paused at this boundary.
    SessionCompleted {
        kind: SessionKind,
        next_kind: SessionKind,
        duration_minutes: u64,
        completed_work_sessions: u64,
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        settings: TimerSettings,
        at: DateTime<Utc>,
    },
    /// Full state snapshot, produced on demand.
    Snapshot {
        kind: SessionKind,
        remaining_secs: u64,
        clock: String,
        running: bool,
        completed_work_sessions: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
}
