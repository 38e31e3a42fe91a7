//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O, timers and task spawning only (no direct UI mutations).
//!
//! ## Timer ordering
//!
//! `StopCountdown` cancels the ticker task synchronously when executed, and
//! the reducer always emits it before `RequestResend`, so no tick from the old
//! deadline can re-enable resend while a request is in flight.

use std::time::Duration;

use tokio::time::Instant;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Leave the screen.
    Quit,

    /// Replace the countdown ticker with one for this generation.
    StartCountdown { generation: u64, deadline: Instant },

    /// Cancel the countdown ticker (idempotent).
    StopCountdown,

    /// `POST /user/verifyOTP`.
    SubmitVerification {
        task: TaskId,
        user_id: String,
        otp: String,
    },

    /// `POST /user/resendOTPVerificationCode`.
    RequestResend {
        task: TaskId,
        email: String,
        user_id: String,
    },

    /// Report `ResendHoldElapsed` after `delay`.
    ScheduleResendReset { generation: u64, delay: Duration },

    /// Cancel a pending resend reset (screen exit).
    CancelResendReset,

    /// Promote the staged user to stored credentials.
    PersistCredentials { task: TaskId },
}
