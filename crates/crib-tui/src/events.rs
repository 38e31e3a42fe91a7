//! UI event types.
//!
//! Everything that can change flow state arrives as a `UiEvent`: terminal
//! input, the runtime's frame tick, and results reported back by async
//! handlers through the inbox. Timer events carry the instant they fired
//! so the reducer never reads the clock itself.

use crib_core::error::FlowResult;
use crib_core::store::Credentials;
use tokio::time::Instant;

use crate::common::{TaskCompleted, TaskKind};

#[derive(Debug)]
pub enum UiEvent {
    /// Frame tick (redraw cadence only).
    Tick,

    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    /// The screen was entered; starts the first countdown.
    SessionEntered { at: Instant },

    /// One-second tick from the countdown ticker.
    CountdownTick { generation: u64, at: Instant },

    /// Backend answered the verification request.
    VerificationFinished { result: FlowResult<()> },

    /// Backend answered the resend request.
    ResendFinished { result: FlowResult<()> },

    /// The "Sent!"/"Failed!" display delay is over.
    ResendHoldElapsed { generation: u64, at: Instant },

    /// Staged session data was (or failed to be) written as credentials.
    CredentialsPersisted { result: FlowResult<Credentials> },

    /// Completion wrapper for reducer-tracked tasks; stale ids are dropped.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },
}
