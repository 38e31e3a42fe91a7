use crate::features::countdown::Countdown;

/// `Idle -> Requesting -> {Sent | Failed} -> (hold) -> Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResendPhase {
    #[default]
    Idle,
    Requesting,
    Sent,
    Failed,
}

impl ResendPhase {
    pub fn label(self) -> &'static str {
        match self {
            ResendPhase::Idle | ResendPhase::Requesting => "Resend",
            ResendPhase::Sent => "Sent!",
            ResendPhase::Failed => "Failed!",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResendState {
    pub phase: ResendPhase,
    /// Identifies the pending status reset; older resets are ignored.
    pub hold_generation: u64,
}

impl ResendState {
    pub fn is_in_flight(&self) -> bool {
        self.phase == ResendPhase::Requesting
    }

    /// Showing "Sent!" or "Failed!" until the reset fires.
    pub fn is_holding(&self) -> bool {
        matches!(self.phase, ResendPhase::Sent | ResendPhase::Failed)
    }

    pub fn status_label(&self) -> &'static str {
        self.phase.label()
    }
}

/// Snapshot handed to the resend control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendView {
    pub active_resend: bool,
    pub resending_email: bool,
    pub resend_status: &'static str,
    pub time_left: Option<u64>,
}

impl ResendView {
    pub fn new(resend: &ResendState, countdown: &Countdown) -> Self {
        Self {
            active_resend: countdown.resend_eligible() && resend.phase == ResendPhase::Idle,
            resending_email: resend.is_in_flight(),
            resend_status: resend.status_label(),
            time_left: countdown.remaining_secs(),
        }
    }
}
