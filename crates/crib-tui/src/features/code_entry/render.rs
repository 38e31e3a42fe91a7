use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::state::CodeEntry;

const EMPTY_SLOT: char = '_';

/// Renders the code as one boxed slot per position.
///
/// The first empty slot is highlighted as the cursor position.
pub fn code_slots_line(entry: &CodeEntry) -> Line<'static> {
    let cursor = entry.len();
    let mut spans = Vec::new();

    for (idx, slot) in entry.slots().iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let (symbol, style) = match slot {
            Some(c) => (
                *c,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            None if idx == cursor => (EMPTY_SLOT, Style::default().fg(Color::Cyan)),
            None => (EMPTY_SLOT, Style::default().fg(Color::DarkGray)),
        };
        let border = if idx == cursor {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled("[ ", border));
        spans.push(Span::styled(symbol.to_string(), style));
        spans.push(Span::styled(" ]", border));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_slots_show_typed_and_empty_positions() {
        let mut entry = CodeEntry::default();
        entry.paste("42");
        assert_eq!(plain(&code_slots_line(&entry)), "[ 4 ]  [ 2 ]  [ _ ]  [ _ ]");
    }
}
