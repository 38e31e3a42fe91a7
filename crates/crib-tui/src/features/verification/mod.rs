//! Verification request lifecycle.

mod render;
mod state;
mod update;

pub use render::verify_button_line;
pub use state::{VerificationOutcome, VerificationPhase, VerificationState, VerifyButton};
pub use update::{
    PERSIST_FAILED_ALERT, acknowledge_outcome, handle_credentials_persisted,
    handle_verification_result, submit_verification,
};
