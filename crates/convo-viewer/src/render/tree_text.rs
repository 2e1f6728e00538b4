use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::empty_pane;
use crate::app::TreeView;

/// The conversation on screen as a column of cards, root first.
pub(super) fn render(frame: &mut Frame, area: Rect, view: &TreeView) {
    let block = Block::default()
        .title(" Conversation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let nodes = view.current_path();
    if nodes.is_empty() {
        let message = if view.loading { "Fetching tree..." } else { "No conversations." };
        empty_pane(frame, area, block, message);
        return;
    }

    let last = nodes.len() - 1;
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line> = Vec::new();
    for (depth, node) in nodes.iter().enumerate() {
        let (branch, continuation) = match depth {
            0 => ("  ", "  "),
            d if d == last => ("  └─ ", "     "),
            _ => ("  ├─ ", "  │  "),
        };
        let tag = format!("[{}] ", node.id);
        let indent = format!("{continuation}{}", " ".repeat(tag.chars().count()));

        let mut text_lines = node.text.lines();
        lines.push(Line::from(vec![
            Span::styled(branch, dim),
            Span::styled(tag, dim),
            Span::styled(text_lines.next().unwrap_or_default().to_string(), Style::default().fg(Color::White)),
        ]));
        for rest in text_lines {
            lines.push(Line::from(vec![
                Span::styled(indent.clone(), dim),
                Span::styled(rest.to_string(), Style::default().fg(Color::White)),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}
