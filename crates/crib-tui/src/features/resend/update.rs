//! Resend reducer.
//!
//! Handles the trigger, the backend result and the status reset.

use crib_core::error::FlowResult;
use tokio::time::Instant;

use super::state::ResendPhase;
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::overlays::Alert;
use crate::state::TuiState;

pub const RESEND_FAILED_ALERT: &str = "Resending verification email failed!";

/// Issues a resend request if the control is active.
///
/// The countdown is stopped before the request so no tick of the old window
/// lands while the request is in flight.
pub fn request_resend(tui: &mut TuiState) -> Vec<UiEffect> {
    if !tui.countdown.resend_eligible() || tui.resend.phase != ResendPhase::Idle {
        return vec![];
    }
    if tui.tasks.resend.is_running() {
        return vec![];
    }

    tui.countdown.stop();
    tui.resend.phase = ResendPhase::Requesting;

    let task = tui.task_seq.next_id();
    tui.tasks.state_mut(TaskKind::Resend).start(task);

    tracing::info!(email = %tui.session.email, "requesting a new verification code");
    vec![
        UiEffect::StopCountdown,
        UiEffect::RequestResend {
            task,
            email: tui.session.email.clone(),
            user_id: tui.session.user_id.clone(),
        },
    ]
}

/// Applies the backend answer and schedules the status reset.
pub fn handle_resend_result(
    tui: &mut TuiState,
    result: FlowResult<()>,
) -> (Vec<UiEffect>, Option<Alert>) {
    if tui.resend.phase != ResendPhase::Requesting {
        return (vec![], None);
    }

    let alert = match result {
        Ok(()) => {
            tui.resend.phase = ResendPhase::Sent;
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "resend failed");
            tui.resend.phase = ResendPhase::Failed;
            Some(Alert::new(RESEND_FAILED_ALERT).with_detail(err.to_string()))
        }
    };

    tui.resend.hold_generation = tui.resend.hold_generation.wrapping_add(1);
    let effects = vec![UiEffect::ScheduleResendReset {
        generation: tui.resend.hold_generation,
        delay: tui.settings.resend_hold,
    }];
    (effects, alert)
}

/// Returns the label to "Resend" and restarts the countdown.
pub fn handle_hold_elapsed(tui: &mut TuiState, generation: u64, at: Instant) -> Vec<UiEffect> {
    if generation != tui.resend.hold_generation || !tui.resend.is_holding() {
        return vec![];
    }

    tui.resend.phase = ResendPhase::Idle;
    let (generation, deadline) = tui.countdown.start(at);
    vec![UiEffect::StartCountdown {
        generation,
        deadline,
    }]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crib_core::error::FlowError;
    use crib_core::session::VerificationSession;

    use super::*;
    use crate::state::FlowSettings;

    fn eligible_state(now: Instant) -> TuiState {
        let session = VerificationSession::new("u1", "a@b.co").unwrap();
        let mut tui = TuiState::new(session, FlowSettings::default());
        let (generation, _) = tui.countdown.start(now);
        tui.countdown.on_tick(generation, now + Duration::from_secs(30));
        assert!(tui.countdown.resend_eligible());
        tui
    }

    #[test]
    fn test_request_is_inert_until_eligible() {
        let session = VerificationSession::new("u1", "a@b.co").unwrap();
        let mut tui = TuiState::new(session, FlowSettings::default());
        tui.countdown.start(Instant::now());

        assert!(request_resend(&mut tui).is_empty());
        assert_eq!(tui.resend.phase, ResendPhase::Idle);
    }

    #[test]
    fn test_request_stops_countdown_then_dispatches_once() {
        let mut tui = eligible_state(Instant::now());

        let effects = request_resend(&mut tui);
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], UiEffect::StopCountdown);
        assert!(matches!(
            &effects[1],
            UiEffect::RequestResend { email, user_id, .. } if email == "a@b.co" && user_id == "u1"
        ));
        assert_eq!(tui.resend.phase.label(), "Resend");

        assert!(request_resend(&mut tui).is_empty());
    }

    #[test]
    fn test_failure_raises_alert_and_ignores_old_hold() {
        let now = Instant::now();
        let mut tui = eligible_state(now);
        request_resend(&mut tui);

        let (effects, alert) =
            handle_resend_result(&mut tui, Err(FlowError::Network("Network Error".into())));
        assert_eq!(tui.resend.phase.label(), "Failed!");
        assert_eq!(alert.unwrap().message, RESEND_FAILED_ALERT);
        assert_eq!(
            effects,
            vec![UiEffect::ScheduleResendReset {
                generation: tui.resend.hold_generation,
                delay: FlowSettings::RESEND_HOLD,
            }]
        );

        let stale = tui.resend.hold_generation.wrapping_sub(1);
        assert!(handle_hold_elapsed(&mut tui, stale, now).is_empty());
        assert_eq!(tui.resend.phase, ResendPhase::Failed);

        let current = tui.resend.hold_generation;
        let effects = handle_hold_elapsed(&mut tui, current, now);
        assert!(matches!(effects[..], [UiEffect::StartCountdown { .. }]));
        assert_eq!(tui.resend.phase, ResendPhase::Idle);
        assert!(!tui.countdown.resend_eligible());
        assert_eq!(tui.countdown.remaining_secs(), Some(30));
    }
}
