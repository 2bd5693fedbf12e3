use chrono::Utc;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::browser::FilterState;
use crate::types::format_created_at;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_title(frame, app, chunks[0]);

    if app.browser.is_empty() {
        let message = if app.browser.total() == 0 {
            "No open pull requests"
        } else {
            "No pull requests match the filter"
        };
        let empty = Paragraph::new(message).style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = app
        .browser
        .entries()
        .map(|(pr, selected)| {
            let title_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let desc = format!(
                "#{} opened {} by {}",
                pr.number,
                format_created_at(now, pr.created_at),
                pr.author
            );

            ListItem::new(vec![
                Line::from(Span::styled(pr.title.clone(), title_style)),
                Line::from(Span::styled(desc, Style::default().fg(Color::Gray))),
            ])
        })
        .collect();

    let list = List::new(items).highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.browser.cursor()));

    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.browser.filter_state() {
        FilterState::Editing => Line::from(vec![
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(app.browser.query().to_string()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]),
        FilterState::Applied => Line::from(vec![
            Span::styled(
                format!("Open pull requests ({})", app.browser.len()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  filter: {}", app.browser.query()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        FilterState::Off => Line::from(Span::styled(
            format!("Open pull requests ({})", app.browser.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}
