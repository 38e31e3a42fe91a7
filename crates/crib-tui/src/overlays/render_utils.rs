use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Centers a box of at most `width` x `height` inside `area`.
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Renders the base container for an overlay (clears background, draws border and title).
pub fn render_overlay_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

/// Draws a bordered modal with a wrapped body and a dim hint line at the bottom.
pub fn render_modal(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    body: Vec<Line<'static>>,
    hint: &str,
) {
    let popup = centered_area(area, 52, 9);
    render_overlay_container(frame, popup, title, border_color);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );
    let body_height = inner.height.saturating_sub(1);

    let para = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(
        para,
        Rect::new(inner.x, inner.y, inner.width, body_height),
    );

    let footer = Paragraph::new(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(
        footer,
        Rect::new(inner.x, inner.y + body_height, inner.width, 1),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_area_fits_inside_small_terminals() {
        let area = Rect::new(0, 0, 30, 6);
        let popup = centered_area(area, 52, 9);
        assert!(popup.width <= 26);
        assert!(popup.height <= 4);
        assert!(popup.right() <= area.right());
        assert!(popup.bottom() <= area.bottom());
    }
}
