use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::render_utils::render_modal;

/// A blocking notice the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub detail: Option<String>,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Alerts shown one at a time, oldest first.
#[derive(Debug, Clone, Default)]
pub struct AlertQueue {
    queue: VecDeque<Alert>,
}

impl AlertQueue {
    pub fn push(&mut self, alert: Alert) {
        self.queue.push_back(alert);
    }

    pub fn current(&self) -> Option<&Alert> {
        self.queue.front()
    }

    pub fn dismiss(&mut self) -> Option<Alert> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Routes a key to the alert on top. Returns true if an alert consumed it.
///
/// Every key is swallowed while an alert is showing.
pub fn handle_alert_key(alerts: &mut AlertQueue, key: KeyEvent) -> bool {
    if alerts.is_empty() {
        return false;
    }
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        alerts.dismiss();
    }
    true
}

pub fn render_alert(frame: &mut Frame, area: Rect, alert: &Alert) {
    let mut body = vec![
        Line::from(""),
        Line::from(Span::styled(
            alert.message.clone(),
            Style::default().fg(Color::White),
        )),
    ];
    if let Some(detail) = &alert.detail {
        body.push(Line::from(""));
        body.push(Line::from(Span::styled(
            detail.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    render_modal(frame, area, "Alert", Color::Yellow, body, "Enter to dismiss");
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_alerts_block_keys_and_dismiss_in_order() {
        let mut alerts = AlertQueue::default();
        assert!(!handle_alert_key(&mut alerts, key(KeyCode::Enter)));

        alerts.push(Alert::new("first"));
        alerts.push(Alert::new("second").with_detail("why"));

        assert!(handle_alert_key(&mut alerts, key(KeyCode::Char('1'))));
        assert_eq!(alerts.len(), 2);

        assert!(handle_alert_key(&mut alerts, key(KeyCode::Enter)));
        assert_eq!(alerts.current().map(|a| a.message.as_str()), Some("second"));

        assert!(handle_alert_key(&mut alerts, key(KeyCode::Esc)));
        assert!(alerts.is_empty());
    }
}
