//! Resend countdown timer.

mod state;

pub use state::{Countdown, CountdownTick, remaining_at};
