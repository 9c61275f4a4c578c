//! The exercise, crisis-resource and therapist list screens.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_EMERGENCY};

pub fn render_exercises(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .exercises
        .iter()
        .map(|exercise| {
            ListItem::new(format!(
                "{}  [{} · {} · {} min]",
                exercise.title, exercise.category, exercise.difficulty, exercise.duration_minutes
            ))
        })
        .collect();
    render_list(frame, app, area, " exercises ", items, app.exercises.len());
}

pub fn render_crisis_resources(frame: &mut Frame, app: &App, area: Rect) {
    let [banner_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let banner = Paragraph::new(
        "If you are in immediate danger, call your local emergency number now.",
    )
    .style(Style::default().fg(COLOR_EMERGENCY).add_modifier(Modifier::BOLD))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_EMERGENCY)),
    );
    frame.render_widget(banner, banner_area);

    let items: Vec<ListItem> = app
        .crisis_resources
        .iter()
        .map(|resource| {
            let phone = resource.phone_number.as_deref().unwrap_or("-");
            let always_on = if resource.available_24_7 { " 24/7" } else { "" };
            ListItem::new(format!(
                "[{}] {}  {}{}",
                resource.country, resource.name, phone, always_on
            ))
        })
        .collect();
    render_list(
        frame,
        app,
        list_area,
        " crisis resources ",
        items,
        app.crisis_resources.len(),
    );
}

pub fn render_therapists(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .therapists
        .iter()
        .map(|therapist| {
            ListItem::new(format!("{}  ({})", therapist.name, therapist.specialization))
        })
        .collect();
    render_list(frame, app, area, " therapists ", items, app.therapists.len());
}

fn render_list(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    mut items: Vec<ListItem>,
    len: usize,
) {
    if items.is_empty() {
        items.push(ListItem::new("Loading…").style(Style::default().fg(COLOR_DIM)));
    }

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(title),
        );

    let mut state = ListState::default();
    if len > 0 {
        state.select(Some(app.selected.min(len - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
