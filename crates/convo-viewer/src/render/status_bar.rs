use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{TreePane, Viewer};

pub(super) fn render(frame: &mut Frame, area: Rect, viewer: &Viewer) {
    let title = match viewer {
        Viewer::Chains(_) => " Conversation Chains ",
        Viewer::Tree(_) => " Conversation Tree ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut spans: Vec<Span> = Vec::new();
    let mut field = |label: &str, value: String, color: Color| {
        if !spans.is_empty() {
            spans.push(Span::styled("  |  ", Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(Span::raw("  "));
        }
        if !label.is_empty() {
            spans.push(Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)));
        }
        spans.push(Span::styled(value, Style::default().fg(color)));
    };

    let (position, fetched_at, loading) = match viewer {
        Viewer::Chains(v) => {
            if let Some(last_run) = v.last_run_at() {
                field("Last run", format_timestamp(last_run), Color::Magenta);
            }
            if v.show_refetch {
                field("", "No completed run yet".to_string(), Color::Yellow);
            }
            (v.position_label(), v.fetched_at, v.loading)
        }
        Viewer::Tree(v) => {
            let pane = match v.pane {
                TreePane::Text => "text",
                TreePane::Diagram => "diagram",
            };
            field("View", pane.to_string(), Color::LightCyan);
            if let Some(loaded) = &v.loaded {
                field("Nodes", loaded.tree.len().to_string(), Color::Green);
            }
            (v.position_label(), v.fetched_at, v.loading)
        }
    };

    if let Some(position) = position {
        field("", position, Color::White);
    }
    if let Some(at) = fetched_at {
        field("Fetched", format_clock(at), Color::Gray);
    }

    if loading {
        spans.push(Span::styled(
            "  Loading...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn format_clock(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Render an RFC 3339 timestamp in local time; anything else verbatim.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}
