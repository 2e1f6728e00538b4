use convo_tree::{extract_first_url, Linkified, Tweet};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::empty_pane;
use crate::app::ChainsView;

pub(super) fn render(frame: &mut Frame, area: Rect, view: &ChainsView) {
    let block = Block::default()
        .title(" Conversation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let chain = view.current_chain();
    if chain.is_empty() {
        let message = if view.loading {
            "Fetching conversations..."
        } else if view.show_refetch {
            "The server has not finished a run yet. Press r to fetch again."
        } else {
            "No conversations."
        };
        empty_pane(frame, area, block, message);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, (_, tweet)) in chain.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(Span::styled(
                "  ────",
                Style::default().fg(Color::DarkGray),
            )));
        }
        tweet_lines(tweet, &mut lines);
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Author, text with its first link split out, photos, timestamp.
fn tweet_lines(tweet: &Tweet, lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(Span::styled(
        format!("  {}", tweet.author_name),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));

    // one row per source line; the link trails the line it came from
    let mut link_found = false;
    for raw in tweet.text.lines() {
        let linked = if link_found {
            Linkified {
                text: raw.to_string(),
                url: None,
            }
        } else {
            extract_first_url(raw)
        };
        let mut row = vec![Span::styled(
            format!("  {}", linked.text.trim_end()),
            Style::default().fg(Color::Gray),
        )];
        if let Some(url) = linked.url {
            link_found = true;
            row.push(Span::raw(" "));
            row.push(Span::styled(
                url,
                Style::default().fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED),
            ));
        }
        lines.push(Line::from(row));
    }

    for photo in tweet.photo_urls() {
        lines.push(Line::from(vec![
            Span::styled("  [photo] ", Style::default().fg(Color::DarkGray)),
            Span::styled(photo.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }

    lines.push(Line::from(Span::styled(
        format!("  {}", tweet.created_at),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));
}
