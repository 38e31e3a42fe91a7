//! Resend control: request lifecycle plus the transient status label.

mod render;
mod state;
mod update;

pub use render::resend_line;
pub use state::{ResendPhase, ResendState, ResendView};
pub use update::{RESEND_FAILED_ALERT, handle_hold_elapsed, handle_resend_result, request_resend};
