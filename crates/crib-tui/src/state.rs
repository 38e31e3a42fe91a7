//! Application state composition.
//!
//! One owned state object per verification session. Only the reducer in
//! `update.rs` mutates it.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: VerificationSession (user id + email)
//! │   ├── code: CodeEntry              (pending code, 0..4 chars)
//! │   ├── countdown: Countdown         (resend eligibility clock)
//! │   ├── verification: VerificationState
//! │   ├── resend: ResendState
//! │   ├── task_seq / tasks             (in-flight request tracking)
//! │   └── authenticated: Option<Credentials>
//! └── alerts: AlertQueue               (blocking alerts)
//! ```

use std::time::Duration;

use crib_core::config::Config;
use crib_core::session::VerificationSession;
use crib_core::store::Credentials;

use crate::common::{TaskSeq, Tasks};
use crate::features::code_entry::CodeEntry;
use crate::features::countdown::Countdown;
use crate::features::resend::ResendState;
use crate::features::verification::VerificationState;
use crate::overlays::AlertQueue;

/// Timings for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSettings {
    /// Countdown before resend becomes available.
    pub resend_window: Duration,
    /// How long "Sent!"/"Failed!" stays up before the countdown restarts.
    pub resend_hold: Duration,
    /// Countdown tick period.
    pub tick_period: Duration,
}

impl FlowSettings {
    pub const RESEND_HOLD: Duration = Duration::from_secs(5);
    pub const TICK_PERIOD: Duration = Duration::from_secs(1);

    pub fn from_config(config: &Config) -> Self {
        Self {
            resend_window: config.resend_window(),
            ..Self::default()
        }
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            resend_window: Duration::from_secs(Config::DEFAULT_RESEND_WINDOW_SECS),
            resend_hold: Self::RESEND_HOLD,
            tick_period: Self::TICK_PERIOD,
        }
    }
}

/// Combined application state.
pub struct AppState {
    pub tui: TuiState,
    pub alerts: AlertQueue,
}

impl AppState {
    pub fn new(session: VerificationSession, settings: FlowSettings) -> Self {
        Self {
            tui: TuiState::new(session, settings),
            alerts: AlertQueue::default(),
        }
    }
}

/// Flow state (everything except blocking alerts).
pub struct TuiState {
    /// Flag indicating the screen should close.
    pub should_quit: bool,
    pub session: VerificationSession,
    pub settings: FlowSettings,
    pub code: CodeEntry,
    pub countdown: Countdown,
    pub verification: VerificationState,
    pub resend: ResendState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// In-flight request tracking.
    pub tasks: Tasks,
    /// Set once verified credentials were persisted.
    pub authenticated: Option<Credentials>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(session: VerificationSession, settings: FlowSettings) -> Self {
        Self {
            should_quit: false,
            session,
            settings,
            code: CodeEntry::default(),
            countdown: Countdown::new(settings.resend_window),
            verification: VerificationState::default(),
            resend: ResendState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            authenticated: None,
            spinner_frame: 0,
        }
    }
}
