//! Timer settings: the four knobs of the classic Pomodoro cycle.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::session::SessionKind;

/// User-editable timer settings.
///
/// All durations are whole minutes. `validate()` must pass before a
/// settings value is allowed anywhere near the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u64,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u64,
    /// Every Nth completed work session is followed by a long break.
    #[serde(default = "default_sessions_until_long_break")]
    pub sessions_until_long_break: u64,
}

fn default_work_minutes() -> u64 {
    25
}
fn default_short_break_minutes() -> u64 {
    5
}
fn default_long_break_minutes() -> u64 {
    15
}
fn default_sessions_until_long_break() -> u64 {
    4
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_until_long_break: default_sessions_until_long_break(),
        }
    }
}

impl TimerSettings {
    /// Reject out-of-range values.
    ///
    /// Zero durations would produce a countdown that completes on its
    /// first tick; a cadence of 1 would make every break a long break.
    /// Neither is clamped -- the input is refused as-is.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("work_minutes", self.work_minutes),
            ("short_break_minutes", self.short_break_minutes),
            ("long_break_minutes", self.long_break_minutes),
        ] {
            if value == 0 {
                return Err(ValidationError::ZeroDuration { field, value });
            }
        }
        if self.sessions_until_long_break < 2 {
            return Err(ValidationError::DegenerateCadence {
                value: self.sessions_until_long_break,
            });
        }
        Ok(())
    }

    /// Configured duration in minutes for a session kind.
    pub fn duration_min(&self, kind: SessionKind) -> u64 {
        match kind {
            SessionKind::Work => self.work_minutes,
            SessionKind::ShortBreak => self.short_break_minutes,
            SessionKind::LongBreak => self.long_break_minutes,
        }
    }

    /// Configured duration in seconds for a session kind.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn duration_secs(&self, kind: SessionKind) -> u64 {
        self.duration_min(kind).saturating_mul(60)
    }
}
