//! Flow reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects in order.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::countdown::CountdownTick;
use crate::features::{resend, verification};
use crate::overlays::{self, Alert};
use crate::state::{AppState, TuiState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::SessionEntered { at } => {
            let (generation, deadline) = app.tui.countdown.start(at);
            tracing::debug!(generation, "countdown started");
            vec![UiEffect::StartCountdown {
                generation,
                deadline,
            }]
        }
        UiEvent::CountdownTick { generation, at } => {
            match app.tui.countdown.on_tick(generation, at) {
                CountdownTick::Expired => tracing::debug!(generation, "countdown expired"),
                CountdownTick::Stale => tracing::trace!(generation, "dropped stale tick"),
                CountdownTick::Remaining(_) => {}
            }
            vec![]
        }
        UiEvent::VerificationFinished { result } => {
            verification::handle_verification_result(&mut app.tui, result);
            vec![]
        }
        UiEvent::ResendFinished { result } => {
            let (effects, alert) = resend::handle_resend_result(&mut app.tui, result);
            push_alert(app, alert);
            effects
        }
        UiEvent::ResendHoldElapsed { generation, at } => {
            resend::handle_hold_elapsed(&mut app.tui, generation, at)
        }
        UiEvent::CredentialsPersisted { result } => {
            let (effects, alert) = verification::handle_credentials_persisted(&mut app.tui, result);
            push_alert(app, alert);
            effects
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if !ok || app.tui.should_quit {
                vec![]
            } else {
                update(app, *completed.result)
            }
        }
    }
}

fn push_alert(app: &mut AppState, alert: Option<Alert>) {
    if let Some(alert) = alert {
        app.alerts.push(alert);
    }
}

/// Leaves the screen, cancelling both timers.
fn quit(tui: &mut TuiState) -> Vec<UiEffect> {
    tui.countdown.stop();
    tui.should_quit = true;
    vec![
        UiEffect::StopCountdown,
        UiEffect::CancelResendReset,
        UiEffect::Quit,
    ]
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            if app.alerts.is_empty() && accepts_code_edits(&app.tui) {
                app.tui.code.paste(&text);
            }
            vec![]
        }
        _ => vec![],
    }
}

/// Routing order: Ctrl+C, alerts, outcome modal, main screen.
fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return quit(&mut app.tui);
    }

    if overlays::handle_alert_key(&mut app.alerts, key) {
        return vec![];
    }

    if app.tui.verification.modal_open() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => verification::acknowledge_outcome(&mut app.tui),
            _ => vec![],
        };
    }

    handle_main_key(&mut app.tui, key)
}

fn handle_main_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => quit(tui),
        KeyCode::Enter => verification::submit_verification(tui),
        KeyCode::Char('r') if ctrl => resend::request_resend(tui),
        KeyCode::Backspace if accepts_code_edits(tui) => {
            tui.code.backspace();
            vec![]
        }
        KeyCode::Char(c) if !ctrl && !alt && accepts_code_edits(tui) => {
            tui.code.insert_char(c);
            vec![]
        }
        _ => vec![],
    }
}

/// The code is frozen while it is being verified.
fn accepts_code_edits(tui: &TuiState) -> bool {
    !tui.verification.is_verifying() && !tui.verification.modal_open()
}
