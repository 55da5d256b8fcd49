//! Session kinds and the completed-session log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three phases of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    /// Human-readable label, used for notifications and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Work => "Work",
            SessionKind::ShortBreak => "Short Break",
            SessionKind::LongBreak => "Long Break",
        }
    }

    pub fn is_work(&self) -> bool {
        matches!(self, SessionKind::Work)
    }

    pub fn is_break(&self) -> bool {
        !self.is_work()
    }
}

/// One finished session, recorded at the moment the countdown reached zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSession {
    pub kind: SessionKind,
    /// The configured duration at the time the session completed.
    pub duration_minutes: u64,
    pub completed_at: DateTime<Utc>,
}

/// Append-only log of completed sessions, capped to a fixed capacity.
///
/// Reads are most-recent-first. When full, the oldest entry is evicted;
/// the controller's work-session counter is not affected by eviction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    entries: Vec<CompletedSession>,
    capacity: usize,
}

/// Default log capacity.
pub const DEFAULT_LOG_CAPACITY: usize = 256;

impl Default for SessionLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl SessionLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, session: CompletedSession) {
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(session);
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &CompletedSession> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&CompletedSession> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: SessionKind, minutes: u64) -> CompletedSession {
        CompletedSession {
            kind,
            duration_minutes: minutes,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn labels() {
        assert_eq!(SessionKind::Work.label(), "Work");
        assert_eq!(SessionKind::ShortBreak.label(), "Short Break");
        assert_eq!(SessionKind::LongBreak.label(), "Long Break");
    }

    #[test]
    fn kind_predicates() {
        assert!(SessionKind::Work.is_work());
        assert!(SessionKind::ShortBreak.is_break());
        assert!(SessionKind::LongBreak.is_break());
    }

    #[test]
    fn log_reads_most_recent_first() {
        let mut log = SessionLog::default();
        log.push(entry(SessionKind::Work, 25));
        log.push(entry(SessionKind::ShortBreak, 5));
        let kinds: Vec<_> = log.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SessionKind::ShortBreak, SessionKind::Work]);
        assert_eq!(log.latest().unwrap().kind, SessionKind::ShortBreak);
    }

    #[test]
    fn log_evicts_oldest_at_capacity() {
        let mut log = SessionLog::with_capacity(2);
        log.push(entry(SessionKind::Work, 25));
        log.push(entry(SessionKind::ShortBreak, 5));
        log.push(entry(SessionKind::Work, 25));
        assert_eq!(log.len(), 2);
        // The first work entry is gone; the short break is now oldest.
        let kinds: Vec<_> = log.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SessionKind::Work, SessionKind::ShortBreak]);
    }

    #[test]
    fn zero_capacity_clamps_to_one() {
        let mut log = SessionLog::with_capacity(0);
        log.push(entry(SessionKind::Work, 25));
        log.push(entry(SessionKind::Work, 25));
        assert_eq!(log.len(), 1);
    }
}
