//! Verification request lifecycle state.

use crate::features::code_entry::CodeEntry;

/// Result of a verification attempt, as shown in the outcome modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Pending,
    Success,
    Failure { message: String },
}

/// `Idle -> Verifying -> {Succeeded | Failed}`; dismissing the modal
/// returns a failed attempt to `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VerificationPhase {
    #[default]
    Idle,
    Verifying,
    Succeeded,
    Failed {
        message: String,
    },
}

/// How the verify control should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyButton {
    Active,
    Inert,
    Busy,
}

#[derive(Debug, Clone, Default)]
pub struct VerificationState {
    pub phase: VerificationPhase,
    /// Success was acknowledged and credentials are being written.
    pub persisting: bool,
}

impl VerificationState {
    pub fn can_submit(&self, code: &CodeEntry) -> bool {
        code.is_complete() && self.phase == VerificationPhase::Idle
    }

    pub fn is_verifying(&self) -> bool {
        self.phase == VerificationPhase::Verifying
    }

    pub fn modal_open(&self) -> bool {
        matches!(
            self.phase,
            VerificationPhase::Succeeded | VerificationPhase::Failed { .. }
        )
    }

    pub fn outcome(&self) -> Option<VerificationOutcome> {
        match &self.phase {
            VerificationPhase::Idle => None,
            VerificationPhase::Verifying => Some(VerificationOutcome::Pending),
            VerificationPhase::Succeeded => Some(VerificationOutcome::Success),
            VerificationPhase::Failed { message } => Some(VerificationOutcome::Failure {
                message: message.clone(),
            }),
        }
    }

    pub fn button(&self, code: &CodeEntry) -> VerifyButton {
        if self.is_verifying() {
            VerifyButton::Busy
        } else if self.can_submit(code) {
            VerifyButton::Active
        } else {
            VerifyButton::Inert
        }
    }
}
