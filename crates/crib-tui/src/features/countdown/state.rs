//! Resend countdown state.
//!
//! Remaining time is always derived from an absolute deadline, never by
//! decrementing, so a late or skipped tick corrects itself on the next one.
//! Every `start`/`stop` bumps the generation; ticks carrying an older
//! generation are dropped.

use std::time::Duration;

use tokio::time::Instant;

/// Result of applying a tick to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Still counting; whole seconds left (rounded).
    Remaining(u64),
    /// Deadline reached on this tick. Resend is now eligible.
    Expired,
    /// Tick from a cancelled or finished timer.
    Stale,
}

/// Whole seconds between `now` and `deadline`, rounded to nearest.
///
/// `None` once `now` has reached the deadline.
pub fn remaining_at(deadline: Instant, now: Instant) -> Option<u64> {
    if now >= deadline {
        return None;
    }
    let millis = deadline.duration_since(now).as_millis();
    Some(((millis + 500) / 1000) as u64)
}

#[derive(Debug, Clone)]
pub struct Countdown {
    window: Duration,
    deadline: Option<Instant>,
    remaining: Option<u64>,
    generation: u64,
    resend_eligible: bool,
}

impl Countdown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            remaining: None,
            generation: 0,
            resend_eligible: false,
        }
    }

    /// Starts a new window at `now`, invalidating any previous timer.
    ///
    /// Returns the generation and deadline the runtime ticker must carry.
    pub fn start(&mut self, now: Instant) -> (u64, Instant) {
        self.generation = self.generation.wrapping_add(1);
        let deadline = now + self.window;
        self.deadline = Some(deadline);
        self.remaining = remaining_at(deadline, now);
        self.resend_eligible = false;
        (self.generation, deadline)
    }

    /// Cancels the running timer. Idempotent; eligibility is left as is.
    pub fn stop(&mut self) {
        if self.deadline.is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
        self.deadline = None;
        self.remaining = None;
    }

    pub fn on_tick(&mut self, generation: u64, now: Instant) -> CountdownTick {
        let Some(deadline) = self.deadline else {
            return CountdownTick::Stale;
        };
        if generation != self.generation {
            return CountdownTick::Stale;
        }

        match remaining_at(deadline, now) {
            Some(secs) => {
                self.remaining = Some(secs);
                CountdownTick::Remaining(secs)
            }
            None => {
                self.deadline = None;
                self.remaining = None;
                self.resend_eligible = true;
                CountdownTick::Expired
            }
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn remaining_secs(&self) -> Option<u64> {
        self.remaining
    }

    pub fn resend_eligible(&self) -> bool {
        self.resend_eligible
    }
}
