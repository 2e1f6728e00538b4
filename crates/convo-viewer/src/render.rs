//! Frame rendering for both viewers.
//!
//! Layout, top to bottom: status bar, main pane, footer with key hints
//! and the error region. Every draw renders the whole frame from state.

mod chains_pane;
mod diagram;
mod status_bar;
mod tree_text;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{TreePane, Viewer};

pub use status_bar::format_timestamp;

pub fn draw(frame: &mut Frame, viewer: &Viewer) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(5),    // Main pane
            Constraint::Length(4), // Hints + errors
        ])
        .split(frame.area());

    status_bar::render(frame, outer[0], viewer);
    match viewer {
        Viewer::Chains(view) => chains_pane::render(frame, outer[1], view),
        Viewer::Tree(view) => match view.pane {
            TreePane::Text => tree_text::render(frame, outer[1], view),
            TreePane::Diagram => diagram::render(frame, outer[1], view),
        },
    }
    render_footer(frame, outer[2], viewer);
}

fn render_footer(frame: &mut Frame, area: Rect, viewer: &Viewer) {
    let (hints, error) = match viewer {
        Viewer::Chains(v) => {
            let mut hints = "  ←/p prev  |  →/n next  |  q quit".to_string();
            if v.can_refetch() {
                hints.push_str("  |  r refetch");
            }
            (hints, v.error.as_deref())
        }
        Viewer::Tree(v) => {
            let hints = match v.pane {
                TreePane::Text => "  ←/p prev  |  →/n next  |  Tab diagram  |  r refetch  |  q quit",
                TreePane::Diagram => "  WASD/drag pan  |  +/- zoom  |  Tab text  |  r refetch  |  q quit",
            };
            (hints.to_string(), v.error.as_deref())
        }
    };

    let error_line = match error {
        Some(message) => Line::from(Span::styled(
            format!("  Error: {message}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    };

    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        error_line,
    ])
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Green)))
    .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Placeholder shown in a pane with nothing to draw.
fn empty_pane(frame: &mut Frame, area: Rect, block: Block<'_>, message: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
}
