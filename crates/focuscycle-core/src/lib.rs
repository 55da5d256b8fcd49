//! # Focuscycle Core Library
//!
//! Core business logic for the Focuscycle Pomodoro timer. The CLI binary
//! is a thin adapter over this library.
//!
//! ## Architecture
//!
//! - **Session controller**: a tick-driven state machine that requires
//!   the caller to invoke `tick()` once per elapsed second
//! - **Settings**: validated cycle configuration (work / short break /
//!   long break durations, long-break cadence)
//! - **Session log**: capped, in-memory, most-recent-first record of
//!   completed sessions
//! - **Notifier**: best-effort capability trait for completion
//!   notifications
//! - **Config**: TOML-based preference storage
//!
//! Timer state and the session log live for the process only;
//! configuration is the sole thing persisted.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod settings;

pub use config::{data_dir, Config, NotificationsConfig};
pub use controller::{format_clock, SessionController};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use events::Event;
pub use notify::{NoopNotifier, Notifier};
pub use session::{CompletedSession, SessionKind, SessionLog};
pub use settings::TimerSettings;
