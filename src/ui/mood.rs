//! The mood screen: score picker, note input, recent entries.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::models::{mood_glyph, mood_label};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let [picker_area, note_area, entries_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    render_picker(frame, app, picker_area);
    render_note(frame, app, note_area);
    render_entries(frame, app, entries_area);
}

fn render_picker(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for score in 1..=5 {
        let selected = app.mood_score == Some(score);
        let style = if selected {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_DIM)
        };
        spans.push(Span::styled(
            format!(" {} {} {} ", score, mood_glyph(score), mood_label(score)),
            style,
        ));
    }

    let picker = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(" how are you feeling? "),
    );
    frame.render_widget(picker, area);
}

fn render_note(frame: &mut Frame, app: &App, area: Rect) {
    let note = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(" note (optional) "),
    );
    frame.render_widget(note, area);
}

fn render_entries(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .mood_entries
        .iter()
        .map(|entry| {
            let when = entry.created_at.format("%Y-%m-%d %H:%M");
            let line = format!(
                "{} {} {}  {}",
                when,
                mood_glyph(entry.mood_score),
                entry.mood_label,
                entry.notes.as_deref().unwrap_or("")
            );
            ListItem::new(line.trim_end().to_string())
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().fg(COLOR_ACCENT))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" recent entries "),
        );

    let mut state = ListState::default();
    if !app.mood_entries.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
