use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::state::VerifyButton;

pub fn verify_button_line(button: VerifyButton, spinner: &str) -> Line<'static> {
    let (label, style) = match button {
        VerifyButton::Active => (
            " Verify ".to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        VerifyButton::Inert => (
            " Verify ".to_string(),
            Style::default().fg(Color::DarkGray).bg(Color::Black),
        ),
        VerifyButton::Busy => (
            format!(" {spinner} Verifying "),
            Style::default().fg(Color::Yellow),
        ),
    };
    Line::from(Span::styled(label, style))
}
