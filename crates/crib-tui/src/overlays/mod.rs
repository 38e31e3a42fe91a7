//! Modal overlays drawn above the verification screen.
//!
//! Alerts block all other input until dismissed. The outcome modal is
//! driven by the verification phase rather than stored separately.

mod alert;
mod outcome;
pub mod render_utils;

pub use alert::{Alert, AlertQueue, handle_alert_key, render_alert};
pub use outcome::render_outcome_modal;
