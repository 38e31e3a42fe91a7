//! Pure view/render functions for the verification screen.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::features::code_entry::code_slots_line;
use crate::features::resend::{ResendView, resend_line};
use crate::features::verification::verify_button_line;
use crate::overlays::{render_alert, render_outcome_modal};
use crate::state::{AppState, TuiState};

/// Spinner frames for in-flight requests.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Frame ticks per spinner step.
const SPINNER_SPEED_DIVISOR: usize = 6;

const HINT: &str = "Enter verify · Ctrl+R resend · Esc quit";

/// Renders the entire screen, overlays last.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Verify your account ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [_, body, _, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(9),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let lines = body_lines(state);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        body,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            HINT,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center),
        footer,
    );

    render_outcome_modal(frame, area, &state.verification);
    if let Some(alert) = app.alerts.current() {
        render_alert(frame, area, alert);
    }
}

fn body_lines(state: &TuiState) -> Vec<Line<'static>> {
    let spinner = spinner(state);
    let view = ResendView::new(&state.resend, &state.countdown);

    vec![
        Line::from("Enter the 4-digit code sent to"),
        Line::from(Span::styled(
            state.session.email.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        code_slots_line(&state.code),
        Line::from(""),
        verify_button_line(state.verification.button(&state.code), spinner),
        Line::from(""),
        resend_line(&view, spinner),
    ]
}

fn spinner(state: &TuiState) -> &'static str {
    SPINNER_FRAMES[(state.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use crib_core::session::VerificationSession;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio::time::Instant;

    use super::*;
    use crate::features::verification::VerificationPhase;
    use crate::overlays::Alert;
    use crate::state::FlowSettings;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> AppState {
        let session = VerificationSession::new("u1", "a@b.co").unwrap();
        AppState::new(session, FlowSettings::default())
    }

    #[test]
    fn test_renders_email_slots_and_countdown() {
        let mut app = app();
        app.tui.code.paste("42");
        app.tui.countdown.start(Instant::now());

        let screen = draw(&app);
        assert!(screen.contains("a@b.co"));
        assert!(screen.contains("[ 4 ]  [ 2 ]  [ _ ]  [ _ ]"));
        assert!(screen.contains("Resend in 30 second(s)"));
        assert!(screen.contains("Verify"));
    }

    #[test]
    fn test_renders_failure_modal_and_alert() {
        let mut app = app();
        app.tui.verification.phase = VerificationPhase::Failed {
            message: "Invalid code".to_string(),
        };
        let screen = draw(&app);
        assert!(screen.contains("Failed!"));
        assert!(screen.contains("Invalid code"));

        app.alerts.push(Alert::new("Resending verification email failed!"));
        let screen = draw(&app);
        assert!(screen.contains("Resending verification email failed!"));
    }
}
