use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::render_utils::render_modal;
use crate::features::verification::{VerificationOutcome, VerificationState};

/// Renders the verification outcome modal, if the phase calls for one.
pub fn render_outcome_modal(frame: &mut Frame, area: Rect, verification: &VerificationState) {
    if !verification.modal_open() {
        return;
    }

    match verification.outcome() {
        Some(VerificationOutcome::Success) => {
            let body = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Verified!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from("Your account has been verified."),
            ];
            let hint = if verification.persisting {
                "Saving login..."
            } else {
                "Enter to continue"
            };
            render_modal(frame, area, "Verification", Color::Green, body, hint);
        }
        Some(VerificationOutcome::Failure { message }) => {
            let body = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Failed!",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(message),
            ];
            render_modal(
                frame,
                area,
                "Verification",
                Color::Red,
                body,
                "Enter to try again",
            );
        }
        Some(VerificationOutcome::Pending) | None => {}
    }
}
