use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::state::ResendView;

const PROMPT: &str = "Didn't receive the email? ";

/// Builds the resend line: prompt, control label and countdown.
pub fn resend_line(view: &ResendView, spinner: &str) -> Line<'static> {
    let prompt = Span::styled(PROMPT, Style::default().fg(Color::Gray));

    if view.resending_email {
        return Line::from(vec![
            prompt,
            Span::styled(
                format!("{spinner} sending"),
                Style::default().fg(Color::Yellow),
            ),
        ]);
    }

    let label_style = if view.active_resend {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        match view.resend_status {
            "Sent!" => Style::default().fg(Color::Green),
            "Failed!" => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::DarkGray),
        }
    };

    let mut spans = vec![prompt, Span::styled(view.resend_status, label_style)];
    if let Some(secs) = view.time_left {
        spans.push(Span::styled(
            format!(" in {secs} second(s)"),
            Style::default().fg(Color::DarkGray),
        ));
    } else if view.active_resend {
        spans.push(Span::styled(" (Ctrl+R)", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}
