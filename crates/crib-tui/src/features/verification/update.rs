//! Verification reducer.

use crib_core::error::FlowResult;
use crib_core::store::Credentials;

use super::state::VerificationPhase;
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::overlays::Alert;
use crate::state::TuiState;

pub const PERSIST_FAILED_ALERT: &str = "Error with persisting user data.";

/// Dispatches the pending code if the verify action is active.
pub fn submit_verification(tui: &mut TuiState) -> Vec<UiEffect> {
    if !tui.verification.can_submit(&tui.code) || tui.tasks.verify.is_running() {
        return vec![];
    }

    tui.verification.phase = VerificationPhase::Verifying;
    let task = tui.task_seq.next_id();
    tui.tasks.state_mut(TaskKind::Verify).start(task);

    tracing::info!(user_id = %tui.session.user_id, "submitting verification code");
    vec![UiEffect::SubmitVerification {
        task,
        user_id: tui.session.user_id.clone(),
        otp: tui.code.code().to_string(),
    }]
}

pub fn handle_verification_result(tui: &mut TuiState, result: FlowResult<()>) {
    if !tui.verification.is_verifying() {
        return;
    }
    tui.verification.phase = match result {
        Ok(()) => {
            tracing::info!("verification succeeded");
            VerificationPhase::Succeeded
        }
        Err(err) => {
            tracing::warn!(error = %err, "verification failed");
            VerificationPhase::Failed {
                message: err.to_string(),
            }
        }
    };
}

/// Enter/Esc on the outcome modal.
///
/// A failure closes the modal and keeps the typed code so it can be
/// resubmitted. A success starts persisting the staged user; while that
/// is in flight further acknowledgments are ignored.
pub fn acknowledge_outcome(tui: &mut TuiState) -> Vec<UiEffect> {
    match tui.verification.phase {
        VerificationPhase::Failed { .. } => {
            tui.verification.phase = VerificationPhase::Idle;
            vec![]
        }
        VerificationPhase::Succeeded if !tui.verification.persisting => {
            tui.verification.persisting = true;
            let task = tui.task_seq.next_id();
            tui.tasks.state_mut(TaskKind::Persist).start(task);
            vec![UiEffect::PersistCredentials { task }]
        }
        _ => vec![],
    }
}

/// Finishes the flow once credentials are stored; otherwise raises an alert
/// and leaves the success modal up for another attempt.
pub fn handle_credentials_persisted(
    tui: &mut TuiState,
    result: FlowResult<Credentials>,
) -> (Vec<UiEffect>, Option<Alert>) {
    tui.verification.persisting = false;
    match result {
        Ok(credentials) => {
            tracing::info!(email = %credentials.user.email, "credentials stored");
            tui.authenticated = Some(credentials);
            tui.countdown.stop();
            (
                vec![
                    UiEffect::StopCountdown,
                    UiEffect::CancelResendReset,
                    UiEffect::Quit,
                ],
                None,
            )
        }
        Err(err) => {
            tracing::error!(error = %err, "persisting credentials failed");
            (
                vec![],
                Some(Alert::new(PERSIST_FAILED_ALERT).with_detail(err.to_string())),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crib_core::error::FlowError;
    use crib_core::session::VerificationSession;
    use crib_core::store::StoredUser;

    use super::*;
    use crate::features::verification::VerificationOutcome;
    use crate::state::FlowSettings;

    fn state_with_code(code: &str) -> TuiState {
        let session = VerificationSession::new("u1", "a@b.co").unwrap();
        let mut tui = TuiState::new(session, FlowSettings::default());
        tui.code.paste(code);
        tui
    }

    #[test]
    fn test_incomplete_code_dispatches_nothing() {
        let mut tui = state_with_code("123");
        assert!(submit_verification(&mut tui).is_empty());
        assert_eq!(tui.verification.phase, VerificationPhase::Idle);
    }

    #[test]
    fn test_submit_is_single_flight() {
        let mut tui = state_with_code("1234");
        let effects = submit_verification(&mut tui);
        assert!(matches!(
            &effects[..],
            [UiEffect::SubmitVerification { user_id, otp, .. }] if user_id == "u1" && otp == "1234"
        ));
        assert!(submit_verification(&mut tui).is_empty());
    }

    #[test]
    fn test_failure_then_dismiss_keeps_code() {
        let mut tui = state_with_code("0000");
        submit_verification(&mut tui);
        handle_verification_result(&mut tui, Err(FlowError::application("Invalid code")));

        assert_eq!(
            tui.verification.outcome(),
            Some(VerificationOutcome::Failure {
                message: "Invalid code".to_string()
            })
        );
        assert!(acknowledge_outcome(&mut tui).is_empty());
        assert_eq!(tui.verification.phase, VerificationPhase::Idle);
        assert_eq!(tui.code.code(), "0000");
        assert!(tui.verification.can_submit(&tui.code));
    }

    #[test]
    fn test_persist_failure_allows_retry() {
        let mut tui = state_with_code("1234");
        submit_verification(&mut tui);
        handle_verification_result(&mut tui, Ok(()));

        assert!(matches!(
            acknowledge_outcome(&mut tui)[..],
            [UiEffect::PersistCredentials { .. }]
        ));
        assert!(acknowledge_outcome(&mut tui).is_empty());

        let (effects, alert) = handle_credentials_persisted(
            &mut tui,
            Err(FlowError::persistence("No staged user data found")),
        );
        assert!(effects.is_empty());
        assert_eq!(alert.unwrap().message, PERSIST_FAILED_ALERT);
        assert_eq!(tui.verification.phase, VerificationPhase::Succeeded);

        assert!(matches!(
            acknowledge_outcome(&mut tui)[..],
            [UiEffect::PersistCredentials { .. }]
        ));
        let credentials = Credentials {
            user: StoredUser::new("u1", "a@b.co"),
            stored_at: Utc::now(),
        };
        let (effects, alert) = handle_credentials_persisted(&mut tui, Ok(credentials));
        assert!(alert.is_none());
        assert_eq!(effects.last(), Some(&UiEffect::Quit));
        assert!(tui.authenticated.is_some());
    }
}
