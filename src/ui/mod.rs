//! Terminal rendering.
//!
//! One `render` entry point dispatching to a screen renderer; shared
//! chrome (tab bar, footer/toast) lives here.

mod chat;
mod lists;
mod mood;
pub mod theme;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Frame;

use crate::app::{App, Screen};
use theme::{COLOR_ACCENT, COLOR_DIM, COLOR_TOAST};

pub fn render(frame: &mut Frame, app: &App) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_tabs(frame, app, header);

    match app.screen {
        Screen::Chat => chat::render(frame, app, body),
        Screen::Mood => mood::render(frame, app, body),
        Screen::Exercises => lists::render_exercises(frame, app, body),
        Screen::Resources => lists::render_crisis_resources(frame, app, body),
        Screen::Therapy => lists::render_therapists(frame, app, body),
    }

    render_footer(frame, app, footer);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::ALL.iter().map(|s| Line::from(s.title())).collect();
    let selected = Screen::ALL
        .iter()
        .position(|s| *s == app.screen)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(COLOR_DIM))
        .highlight_style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(toast) = &app.toast {
        Line::from(Span::styled(
            toast.text.clone(),
            Style::default().fg(COLOR_TOAST),
        ))
    } else {
        let hint = match app.screen {
            Screen::Chat => "Enter send · Tab switch screen · Ctrl+C quit",
            Screen::Mood => "1-5 pick mood · type a note · Enter save",
            Screen::Exercises => "↑/↓ select · Enter mark complete",
            Screen::Resources => "↑/↓ scroll",
            Screen::Therapy => "↑/↓ select · Enter book",
        };
        Line::from(Span::styled(hint, Style::default().fg(COLOR_DIM)))
    };
    frame.render_widget(Paragraph::new(line), area);
}
