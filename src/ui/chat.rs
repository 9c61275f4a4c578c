//! The chat screen: transcript, streaming indicator, input line.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::models::MessageRole;

use super::theme::{COLOR_ACCENT, COLOR_ASSISTANT, COLOR_BORDER, COLOR_DIM, COLOR_STREAMING};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [transcript_area, input_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(area);

    render_transcript(frame, app, transcript_area);
    render_input(frame, app, input_area);
}

fn render_transcript(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if app.chat_log.is_empty() {
        lines.push(Line::from(Span::styled(
            "Say hello to start a conversation.",
            Style::default().fg(COLOR_DIM),
        )));
    }

    for message in &app.chat_log {
        let (label, style) = match message.role {
            MessageRole::User => (
                "You",
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            MessageRole::Assistant => (
                "Zen",
                Style::default()
                    .fg(COLOR_ASSISTANT)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(Span::styled(label, style)));
        for text_line in message.content.lines() {
            lines.push(Line::from(text_line.to_string()));
        }
        lines.push(Line::default());
    }

    if app.streaming {
        lines.push(Line::from(Span::styled(
            "…",
            Style::default().fg(COLOR_STREAMING),
        )));
    }

    // Pin the tail of the transcript into view.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER)),
        );
    frame.render_widget(transcript, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.streaming {
        Style::default().fg(COLOR_DIM)
    } else {
        Style::default()
    };
    let input = Paragraph::new(app.input.as_str()).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(if app.streaming { " waiting… " } else { " message " }),
    );
    frame.render_widget(input, area);
}
